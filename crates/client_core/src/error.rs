use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckErrorKind {
    Validation,
    Service,
    Transport,
    Busy,
    UnknownSample,
}

/// Failure of one user action. None of these end the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Service {
        status: Option<u16>,
        message: String,
    },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("a check is already in progress")]
    Busy,
    #[error("no sample message at index {0}")]
    UnknownSample(usize),
}

impl CheckError {
    pub fn empty_input() -> Self {
        Self::Validation("Please enter a message to check".to_string())
    }

    pub fn input_too_long(max_chars: usize) -> Self {
        Self::Validation(format!("Text too long (max {max_chars} characters)"))
    }

    pub fn kind(&self) -> CheckErrorKind {
        match self {
            Self::Validation(_) => CheckErrorKind::Validation,
            Self::Service { .. } => CheckErrorKind::Service,
            Self::Transport(_) => CheckErrorKind::Transport,
            Self::Busy => CheckErrorKind::Busy,
            Self::UnknownSample(_) => CheckErrorKind::UnknownSample,
        }
    }

    /// Whether the service round trip failed, as opposed to the action being
    /// refused locally.
    pub fn is_terminal_for_request(&self) -> bool {
        matches!(self, Self::Service { .. } | Self::Transport(_))
    }
}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("timed out waiting for classification service: {err}"))
        } else if err.is_connect() {
            Self::Transport(format!("classification service unreachable: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_round_trip_failures_are_terminal() {
        assert!(CheckError::Transport("offline".into()).is_terminal_for_request());
        assert!(CheckError::Service {
            status: Some(500),
            message: "boom".into(),
        }
        .is_terminal_for_request());
        assert!(!CheckError::empty_input().is_terminal_for_request());
        assert!(!CheckError::Busy.is_terminal_for_request());
        assert!(!CheckError::UnknownSample(3).is_terminal_for_request());
    }

    #[test]
    fn validation_messages_match_service_wording() {
        assert_eq!(
            CheckError::input_too_long(10_000).to_string(),
            "Text too long (max 10000 characters)"
        );
        assert_eq!(CheckError::empty_input().kind(), CheckErrorKind::Validation);
    }
}
