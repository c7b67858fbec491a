use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verdict returned by the classification service for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_scam: bool,
    pub confidence_score: f64,
    pub matched_keywords: Vec<String>,
    pub categories: Vec<String>,
    pub matched_patterns: Vec<String>,
    /// Echo of the checked text. Never rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResultShapeError {
    #[error("confidence_score {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

impl ClassificationResult {
    pub fn new(is_scam: bool, confidence_score: f64) -> Self {
        Self {
            is_scam,
            confidence_score,
            matched_keywords: Vec::new(),
            categories: Vec::new(),
            matched_patterns: Vec::new(),
            text: None,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matched_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matched_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the invariants serde cannot express. NaN is rejected too.
    pub fn validate(&self) -> Result<(), ResultShapeError> {
        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(ResultShapeError::ConfidenceOutOfRange(self.confidence_score));
        }
        Ok(())
    }
}
