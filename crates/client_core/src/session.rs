//! Session state and its reducer.

use shared::domain::ClassificationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

pub enum SessionEvent {
    InputChanged(String),
    RequestStarted,
    RequestSucceeded(ClassificationResult),
    RequestFailed(String),
    Cleared,
}

/// State of one interactive session. Result and error are kept across
/// phases but only count as current in the matching phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    input_text: String,
    phase: Phase,
    last_result: Option<ClassificationResult>,
    last_error_message: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_result(&self) -> Option<&ClassificationResult> {
        self.last_result.as_ref()
    }

    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error_message.as_deref()
    }

    pub fn current_result(&self) -> Option<&ClassificationResult> {
        match self.phase {
            Phase::Success => self.last_result.as_ref(),
            _ => None,
        }
    }

    pub fn current_error(&self) -> Option<&str> {
        match self.phase {
            Phase::Error => self.last_error_message.as_deref(),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::InputChanged(text) => self.input_text = text,
            SessionEvent::RequestStarted => self.phase = Phase::Loading,
            SessionEvent::RequestSucceeded(result) => {
                self.last_result = Some(result);
                self.phase = Phase::Success;
            }
            SessionEvent::RequestFailed(message) => {
                self.last_error_message = Some(message);
                self.phase = Phase::Error;
            }
            SessionEvent::Cleared => *self = Self::default(),
        }
    }
}
