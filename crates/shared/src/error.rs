use serde::{Deserialize, Serialize};

pub const GENERIC_CHECK_FAILURE: &str = "Failed to check message";

/// Error body the classification service attaches to non-success responses.
///
/// The service also sends `is_scam: false` next to `error`; that flag carries
/// no verdict and is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ServiceErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// The service's message, or the generic failure text when absent or blank.
    pub fn message_or_generic(&self) -> String {
        match self.error.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => GENERIC_CHECK_FAILURE.to_string(),
        }
    }
}
