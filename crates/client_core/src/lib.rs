//! Client-side controller for the scam-check service: session state,
//! request orchestration, and rendering of verdicts into reports.

pub mod controller;
pub mod display;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod samples;
pub mod sanitize;
pub mod service;
pub mod session;

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::error;

pub use controller::{Action, InputController, DEFAULT_SAMPLE_DELAY};
pub use display::{
    DisplaySurface, GlyphRenderer, HtmlBackend, NoGlyphs, Presenter, ReportBackend, TextBackend,
    UnicodeGlyphs,
};
pub use error::{CheckError, CheckErrorKind};
pub use orchestrator::{OrchestratorConfig, RequestOrchestrator};
pub use report::{render, render_error, Report};
pub use samples::{SampleMessage, SAMPLE_MESSAGES};
pub use service::{ClassificationService, HttpClassificationClient};
pub use session::{Phase, SessionEvent, SessionState};

/// Spawns a background task whose failure is logged instead of propagated.
pub fn spawn_logged<F>(name: &'static str, task: F) -> JoinHandle<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = task.await {
            error!(task = name, "background task failed: {err:#}");
        }
    })
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
mod tests {
    #[tokio::test]
    async fn spawn_logged_swallows_task_failure() {
        let handle = super::spawn_logged("failing", async { Err(anyhow::anyhow!("boom")) });
        assert!(handle.await.is_ok());
    }
}
