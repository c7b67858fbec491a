use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use shared::domain::ClassificationResult;

use crate::{
    display::{DisplaySurface, NoGlyphs, Presenter, TextBackend},
    error::CheckError,
    service::ClassificationService,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Controls(bool),
    Loading(bool),
    Input(String),
    Sample { label: String, text: String },
    Output(String),
    Cleared,
    Flushed,
}

#[derive(Default)]
struct ProbeState {
    events: Vec<SurfaceEvent>,
    controls_enabled: bool,
    loading: bool,
    input: String,
    output: Option<String>,
}

/// Shared view into what a [`RecordingSurface`] received.
#[derive(Clone, Default)]
pub struct SurfaceProbe(Arc<Mutex<ProbeState>>);

impl SurfaceProbe {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.0.lock().expect("probe").events.clone()
    }

    pub fn controls_enabled(&self) -> bool {
        self.0.lock().expect("probe").controls_enabled
    }

    pub fn loading(&self) -> bool {
        self.0.lock().expect("probe").loading
    }

    pub fn input(&self) -> String {
        self.0.lock().expect("probe").input.clone()
    }

    pub fn output(&self) -> Option<String> {
        self.0.lock().expect("probe").output.clone()
    }

    fn record(&self, event: SurfaceEvent) {
        let mut state = self.0.lock().expect("probe");
        match &event {
            SurfaceEvent::Controls(enabled) => state.controls_enabled = *enabled,
            SurfaceEvent::Loading(loading) => state.loading = *loading,
            SurfaceEvent::Input(text) | SurfaceEvent::Sample { text, .. } => {
                state.input = text.clone()
            }
            SurfaceEvent::Output(content) => state.output = Some(content.clone()),
            SurfaceEvent::Cleared => state.output = None,
            SurfaceEvent::Flushed => {}
        }
        state.events.push(event);
    }
}

pub struct RecordingSurface {
    probe: SurfaceProbe,
    output: Option<String>,
}

impl RecordingSurface {
    pub fn new() -> (Self, SurfaceProbe) {
        let probe = SurfaceProbe::default();
        (
            Self {
                probe: probe.clone(),
                output: None,
            },
            probe,
        )
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_controls_enabled(&mut self, enabled: bool) {
        self.probe.record(SurfaceEvent::Controls(enabled));
    }

    fn set_loading(&mut self, loading: bool) {
        self.probe.record(SurfaceEvent::Loading(loading));
    }

    fn set_input(&mut self, text: &str) {
        self.probe.record(SurfaceEvent::Input(text.to_string()));
    }

    fn show_sample(&mut self, label: &str, text: &str) {
        self.probe.record(SurfaceEvent::Sample {
            label: label.to_string(),
            text: text.to_string(),
        });
    }

    fn write_output(&mut self, content: String) {
        self.output = Some(content.clone());
        self.probe.record(SurfaceEvent::Output(content));
    }

    fn clear_output(&mut self) {
        self.output = None;
        self.probe.record(SurfaceEvent::Cleared);
    }

    fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn flush(&mut self) {
        self.probe.record(SurfaceEvent::Flushed);
    }
}

pub fn text_presenter() -> (Presenter, SurfaceProbe) {
    let (surface, probe) = RecordingSurface::new();
    (
        Presenter::new(
            Box::new(TextBackend {
                expand_details: true,
            }),
            Box::new(NoGlyphs),
            Box::new(surface),
        ),
        probe,
    )
}

/// Service double answering from a script, recording every call.
#[derive(Clone, Default)]
pub struct ScriptedService {
    responses: Arc<Mutex<VecDeque<Result<ClassificationResult, CheckError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl ScriptedService {
    pub fn answering(
        responses: impl IntoIterator<Item = Result<ClassificationResult, CheckError>>,
    ) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().collect())),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls").clone()
    }
}

#[async_trait]
impl ClassificationService for ScriptedService {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, CheckError> {
        self.calls.lock().expect("calls").push(text.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .expect("responses")
            .pop_front()
            .unwrap_or_else(|| Err(CheckError::Transport("no scripted response".into())))
    }
}

pub fn scam_result() -> ClassificationResult {
    ClassificationResult::new(true, 0.92)
        .with_keywords(["urgent", "OTP"])
        .with_categories(["phishing"])
        .with_patterns(["urgent.*otp"])
}
