//! Top-level coordinator mapping user actions onto the session.

use std::time::Duration;

use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::{
    display::Presenter,
    error::CheckError,
    orchestrator::RequestOrchestrator,
    report::{render_error, Report},
    samples::{SampleMessage, SAMPLE_MESSAGES},
    service::ClassificationService,
    session::{SessionEvent, SessionState},
};

pub const DEFAULT_SAMPLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(String),
    Submit,
    Clear,
    PickSample(usize),
    /// Posted by the delayed task a sample pick schedules.
    ScheduledSubmit(u64),
    Quit,
}

struct PendingSubmit {
    ticket: u64,
    handle: JoinHandle<()>,
}

impl PendingSubmit {
    fn cancel(self) {
        self.handle.abort();
        debug!(ticket = self.ticket, "cancelled scheduled submit");
    }
}

pub struct InputController<S> {
    session: SessionState,
    orchestrator: RequestOrchestrator<S>,
    presenter: Presenter,
    samples: &'static [SampleMessage],
    sample_delay: Duration,
    scheduler: UnboundedSender<Action>,
    pending: Option<PendingSubmit>,
    next_ticket: u64,
}

impl<S: ClassificationService> InputController<S> {
    /// `scheduler` must feed the receiver later passed to [`Self::run`];
    /// delayed sample submits come back through it.
    pub fn new(
        orchestrator: RequestOrchestrator<S>,
        presenter: Presenter,
        sample_delay: Duration,
        scheduler: UnboundedSender<Action>,
    ) -> Self {
        Self {
            session: SessionState::new(),
            orchestrator,
            presenter,
            samples: SAMPLE_MESSAGES,
            sample_delay,
            scheduler,
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn with_samples(mut self, samples: &'static [SampleMessage]) -> Self {
        self.samples = samples;
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn samples(&self) -> &'static [SampleMessage] {
        self.samples
    }

    pub fn has_pending_sample(&self) -> bool {
        self.pending.is_some()
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.presenter.show_input(&text);
        self.session.apply(SessionEvent::InputChanged(text));
    }

    pub async fn submit(&mut self) -> Result<Report, CheckError> {
        self.cancel_pending();
        let text = self.session.input_text().to_string();
        self.orchestrator
            .submit(&mut self.session, &text, &mut self.presenter)
            .await
    }

    pub fn clear(&mut self) {
        self.cancel_pending();
        self.session.apply(SessionEvent::Cleared);
        self.presenter.reset();
        info!("session cleared");
    }

    /// Loads a sample into the input and schedules its submission. Returns
    /// the ticket the scheduled action will carry.
    pub fn pick_sample(&mut self, index: usize) -> Result<u64, CheckError> {
        let sample = *self
            .samples
            .get(index)
            .ok_or(CheckError::UnknownSample(index))?;

        self.cancel_pending();
        self.presenter.show_sample(&sample);
        self.session
            .apply(SessionEvent::InputChanged(sample.text.to_string()));

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let scheduler = self.scheduler.clone();
        let delay = self.sample_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if scheduler.send(Action::ScheduledSubmit(ticket)).is_err() {
                debug!(ticket, "controller gone, dropping scheduled submit");
            }
        });
        self.pending = Some(PendingSubmit { ticket, handle });
        info!(sample = sample.label, ticket, "sample loaded, submit scheduled");
        Ok(ticket)
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<Option<Report>, CheckError> {
        match action {
            Action::Edit(text) => {
                self.edit(text);
                Ok(None)
            }
            Action::Submit => self.submit().await.map(Some),
            Action::Clear => {
                self.clear();
                Ok(None)
            }
            Action::PickSample(index) => match self.pick_sample(index) {
                Ok(_) => Ok(None),
                Err(err) => {
                    self.presenter.show_error(&render_error(&err.to_string()));
                    Err(err)
                }
            },
            Action::ScheduledSubmit(ticket) => {
                if self.pending.as_ref().map(|p| p.ticket) == Some(ticket) {
                    self.pending = None;
                    self.submit().await.map(Some)
                } else {
                    debug!(ticket, "dropping stale scheduled submit");
                    Ok(None)
                }
            }
            Action::Quit => Ok(None),
        }
    }

    /// Processes actions one at a time until `Quit` or the channel closes.
    pub async fn run(mut self, mut actions: UnboundedReceiver<Action>) -> SessionState {
        while let Some(action) = actions.recv().await {
            if action == Action::Quit {
                break;
            }
            if let Err(err) = self.dispatch(action).await {
                debug!(
                    kind = ?err.kind(),
                    round_trip = err.is_terminal_for_request(),
                    %err,
                    "action finished with error"
                );
            }
        }
        self.cancel_pending();
        self.session
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
