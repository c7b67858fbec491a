//! Request lifecycle: validate, load, call the service once, settle.

use std::time::Duration;

use tracing::{info, warn};

use crate::{
    display::Presenter,
    error::CheckError,
    report::{render, render_error, Report},
    service::ClassificationService,
    session::{Phase, SessionEvent, SessionState},
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_MAX_INPUT_CHARS: usize = 10_000;

#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    pub request_timeout: Duration,
    pub max_input_chars: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

pub struct RequestOrchestrator<S> {
    service: S,
    config: OrchestratorConfig,
}

impl<S: ClassificationService> RequestOrchestrator<S> {
    pub fn new(service: S, config: OrchestratorConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Runs one check. Controls are enabled again on every return path
    /// except [`CheckError::Busy`], where the in-flight request owns them.
    ///
    /// Rejected input leaves an idle session idle; after a finished check it
    /// becomes the current error, matching the banner on screen.
    pub async fn submit(
        &self,
        session: &mut SessionState,
        text: &str,
        presenter: &mut Presenter,
    ) -> Result<Report, CheckError> {
        if session.is_loading() {
            warn!("rejecting submit while a check is in flight");
            return Err(CheckError::Busy);
        }

        let text = match self.validate(text) {
            Ok(text) => text,
            Err(err) => {
                info!(%err, "input rejected before contacting service");
                let message = err.to_string();
                presenter.show_error(&render_error(&message));
                // An idle session has nothing on screen to replace.
                if session.phase() != Phase::Idle {
                    session.apply(SessionEvent::RequestFailed(message));
                }
                presenter.enable_controls();
                return Err(err);
            }
        };

        session.apply(SessionEvent::RequestStarted);
        presenter.begin_loading();

        let outcome = match tokio::time::timeout(
            self.config.request_timeout,
            self.service.classify(text),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(CheckError::Transport(format!(
                "no response from classification service within {}s",
                self.config.request_timeout.as_secs_f32()
            ))),
        };

        let settled = match outcome {
            Ok(result) => {
                let report = render(&result);
                info!(
                    is_scam = result.is_scam,
                    confidence = result.confidence_score,
                    patterns = result.matched_patterns.len(),
                    "check completed"
                );
                session.apply(SessionEvent::RequestSucceeded(result));
                presenter.show_report(&report);
                Ok(report)
            }
            Err(err) => {
                warn!(kind = ?err.kind(), %err, "check failed");
                let message = err.to_string();
                presenter.show_error(&render_error(&message));
                session.apply(SessionEvent::RequestFailed(message));
                Err(err)
            }
        };

        presenter.end_loading();
        settled
    }

    fn validate<'a>(&self, text: &'a str) -> Result<&'a str, CheckError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CheckError::empty_input());
        }
        if trimmed.chars().count() > self.config.max_input_chars {
            return Err(CheckError::input_too_long(self.config.max_input_chars));
        }
        Ok(trimmed)
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
