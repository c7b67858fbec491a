use super::*;
use crate::{
    report::{ConfidenceBand, Severity},
    session::Phase,
    test_support::{scam_result, text_presenter, ScriptedService, SurfaceEvent},
};

fn orchestrator(service: ScriptedService) -> RequestOrchestrator<ScriptedService> {
    RequestOrchestrator::new(service, OrchestratorConfig::default())
}

#[tokio::test]
async fn whitespace_input_never_reaches_service() {
    let service = ScriptedService::answering([Ok(scam_result())]);
    let orchestrator = orchestrator(service.clone());
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();

    let err = orchestrator
        .submit(&mut session, "  \n\t ", &mut presenter)
        .await
        .expect_err("must fail");

    assert_eq!(err, CheckError::empty_input());
    assert!(service.calls().is_empty());
    assert_eq!(session.phase(), Phase::Idle);
    assert!(probe.controls_enabled());
    assert!(probe
        .output()
        .expect("error banner")
        .contains("Please enter a message to check"));
}

#[tokio::test]
async fn overlong_input_is_rejected_locally() {
    let service = ScriptedService::default();
    let orchestrator = RequestOrchestrator::new(
        service.clone(),
        OrchestratorConfig {
            max_input_chars: 5,
            ..OrchestratorConfig::default()
        },
    );
    let (mut presenter, _probe) = text_presenter();
    let mut session = SessionState::new();

    let err = orchestrator
        .submit(&mut session, "  abcdef  ", &mut presenter)
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), crate::error::CheckErrorKind::Validation);
    assert!(service.calls().is_empty());
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test]
async fn success_stores_result_and_renders_report() {
    let service = ScriptedService::answering([Ok(scam_result())]);
    let orchestrator = orchestrator(service.clone());
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();

    let report = orchestrator
        .submit(&mut session, "  urgent: share OTP  ", &mut presenter)
        .await
        .expect("report");

    assert_eq!(service.calls(), vec!["urgent: share OTP"]);
    assert_eq!(report.banner.severity, Severity::Danger);
    assert_eq!(report.confidence.band, ConfidenceBand::High);
    assert_eq!(session.phase(), Phase::Success);
    assert_eq!(session.current_result(), Some(&scam_result()));
    assert!(probe.output().expect("output").contains("92% Confidence"));
}

#[tokio::test]
async fn lifecycle_orders_surface_updates() {
    let service = ScriptedService::answering([Ok(scam_result())]);
    let orchestrator = orchestrator(service);
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, "hello", &mut presenter)
        .await
        .expect("report");

    let events = probe.events();
    assert_eq!(
        &events[..3],
        &[
            SurfaceEvent::Controls(false),
            SurfaceEvent::Cleared,
            SurfaceEvent::Loading(true),
        ]
    );
    assert!(matches!(events[3], SurfaceEvent::Output(_)));
    assert_eq!(
        &events[events.len() - 2..],
        &[SurfaceEvent::Loading(false), SurfaceEvent::Controls(true)]
    );
}

#[tokio::test]
async fn transport_error_keeps_previous_result() {
    let service = ScriptedService::answering([
        Ok(scam_result()),
        Err(CheckError::Transport("connection refused".into())),
    ]);
    let orchestrator = orchestrator(service);
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, "first", &mut presenter)
        .await
        .expect("first report");
    let err = orchestrator
        .submit(&mut session, "second", &mut presenter)
        .await
        .expect_err("second must fail");

    assert_eq!(err.kind(), crate::error::CheckErrorKind::Transport);
    assert_eq!(session.phase(), Phase::Error);
    assert_eq!(
        session.current_error(),
        Some("request failed: connection refused")
    );
    assert_eq!(session.last_result(), Some(&scam_result()));
    assert!(probe.controls_enabled());
    assert!(!probe.loading());
    assert!(probe
        .output()
        .expect("banner")
        .contains("Error: request failed: connection refused"));
}

#[tokio::test]
async fn service_error_message_is_shown_verbatim() {
    let service = ScriptedService::answering([Err(CheckError::Service {
        status: Some(400),
        message: "Text cannot be empty".into(),
    })]);
    let orchestrator = orchestrator(service);
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, "x", &mut presenter)
        .await
        .expect_err("must fail");

    assert_eq!(session.current_error(), Some("Text cannot be empty"));
    assert!(probe.controls_enabled());
}

#[tokio::test]
async fn submit_while_loading_is_rejected() {
    let service = ScriptedService::answering([Ok(scam_result())]);
    let orchestrator = orchestrator(service.clone());
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();
    session.apply(SessionEvent::RequestStarted);

    let err = orchestrator
        .submit(&mut session, "hello", &mut presenter)
        .await
        .expect_err("busy");

    assert_eq!(err, CheckError::Busy);
    assert!(service.calls().is_empty());
    assert!(session.is_loading());
    assert!(probe.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn slow_service_is_bounded_by_timeout() {
    let service =
        ScriptedService::answering([Ok(scam_result())]).with_delay(Duration::from_secs(60));
    let orchestrator = RequestOrchestrator::new(
        service,
        OrchestratorConfig {
            request_timeout: Duration::from_secs(2),
            ..OrchestratorConfig::default()
        },
    );
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();

    let err = orchestrator
        .submit(&mut session, "hello", &mut presenter)
        .await
        .expect_err("must time out");

    assert!(matches!(&err, CheckError::Transport(msg) if msg.contains("within 2s")));
    assert_eq!(session.phase(), Phase::Error);
    assert!(session.last_result().is_none());
    assert!(probe.controls_enabled());
}

#[tokio::test]
async fn blank_input_after_success_becomes_current_error() {
    let service = ScriptedService::answering([Ok(scam_result())]);
    let orchestrator = orchestrator(service.clone());
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, "urgent: share OTP", &mut presenter)
        .await
        .expect("report");
    let err = orchestrator
        .submit(&mut session, "  ", &mut presenter)
        .await
        .expect_err("must fail");

    assert_eq!(err, CheckError::empty_input());
    assert_eq!(service.calls().len(), 1);
    assert_eq!(session.phase(), Phase::Error);
    assert!(session.current_result().is_none());
    assert_eq!(
        session.current_error(),
        Some("Please enter a message to check")
    );
    assert_eq!(session.last_result(), Some(&scam_result()));
    assert!(probe
        .output()
        .expect("banner")
        .contains("Error: Please enter a message to check"));
    assert!(probe.controls_enabled());
}

#[tokio::test]
async fn blank_input_after_error_replaces_stale_message() {
    let service = ScriptedService::answering([Err(CheckError::Service {
        status: Some(500),
        message: "Internal server error".into(),
    })]);
    let orchestrator = orchestrator(service);
    let (mut presenter, probe) = text_presenter();
    let mut session = SessionState::new();

    orchestrator
        .submit(&mut session, "hello", &mut presenter)
        .await
        .expect_err("service failure");
    orchestrator
        .submit(&mut session, "   ", &mut presenter)
        .await
        .expect_err("validation failure");

    assert_eq!(session.phase(), Phase::Error);
    assert_eq!(
        session.current_error(),
        Some("Please enter a message to check")
    );
    assert!(probe
        .output()
        .expect("banner")
        .contains("Please enter a message to check"));
}

#[test]
fn default_config_bounds_requests() {
    let orchestrator = orchestrator(ScriptedService::default());
    assert_eq!(orchestrator.config().request_timeout, DEFAULT_REQUEST_TIMEOUT);
    assert_eq!(orchestrator.config().max_input_chars, DEFAULT_MAX_INPUT_CHARS);
}
