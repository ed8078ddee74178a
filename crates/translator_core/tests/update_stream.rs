use std::sync::Once;

use translator_core::{
    update, AppConfig, AppState, Effect, ErrorKind, JobId, JobStatus, Msg, NotificationKind,
    NotificationTopic, RequestFailure, Timer, ERROR_SUGGESTION_THRESHOLD, SUCCESS_PULSE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(translator_logging::initialize_for_tests);
}

fn configured() -> AppState {
    AppState::with_config(AppConfig {
        api_key: "sk-test".to_string(),
        ..AppConfig::default()
    })
}

fn submit_text(state: AppState, input: &str) -> (AppState, JobId) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let job_id = state.active_job_id().expect("job submitted");
    (state, job_id)
}

fn chunk(state: AppState, job_id: JobId, text: &str) -> AppState {
    update(
        state,
        Msg::ChunkReceived {
            job_id,
            text: text.to_string(),
        },
    )
    .0
}

fn fail(state: AppState, job_id: JobId, failure: RequestFailure) -> (AppState, Vec<Effect>) {
    update(state, Msg::RequestFailed { job_id, failure })
}

#[test]
fn chunks_accumulate_in_arrival_order_then_succeed() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "Hello, world!");

    let state = chunk(state, job_id, "你好");
    assert_eq!(state.view().status, JobStatus::Streaming);
    assert!(state.view().loading);

    let state = chunk(state, job_id, "，");
    let state = chunk(state, job_id, "世界！\n");
    let (state, effects) = update(state, Msg::StreamFinished { job_id });

    let view = state.view();
    assert_eq!(view.status, JobStatus::Succeeded);
    assert_eq!(view.output, "你好，世界！\n");
    assert!(!view.loading);
    assert!(view.show_copy);
    assert!(view.success_pulse);
    assert!(view.error.is_none());
    assert_eq!(
        effects,
        vec![
            Effect::ScheduleTimer {
                timer: Timer::SuccessPulseEnd(job_id),
                after: SUCCESS_PULSE,
            },
            Effect::CopyToClipboard {
                text: "你好，世界！".to_string(),
            },
        ]
    );
}

#[test]
fn success_pulse_ends_when_its_timer_fires() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "text");
    let state = chunk(state, job_id, "texte");
    let (state, _) = update(state, Msg::StreamFinished { job_id });
    assert!(state.view().success_pulse);

    let (state, effects) = update(state, Msg::TimerFired(Timer::SuccessPulseEnd(job_id)));
    assert!(effects.is_empty());
    assert!(!state.view().success_pulse);
}

#[test]
fn clipboard_result_raises_notification() {
    init_logging();
    let (state, effects) = update(configured(), Msg::ClipboardWritten { result: Ok(()) });
    let notification = state.notification().unwrap().clone();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.topic, NotificationTopic::Clipboard);
    assert_eq!(effects.len(), 1);

    let (state, _) = update(
        state,
        Msg::ClipboardWritten {
            result: Err("denied".to_string()),
        },
    );
    let replaced = state.notification().unwrap();
    assert_eq!(replaced.kind, NotificationKind::Error);
    assert_ne!(replaced.id, notification.id);

    // The first notification's timer no longer applies.
    let (state, _) = update(
        state,
        Msg::TimerFired(Timer::NotificationDismiss(notification.id)),
    );
    assert!(state.notification().is_some());
}

#[test]
fn notification_dismisses_after_its_timer() {
    init_logging();
    let (state, effects) = update(configured(), Msg::ClipboardWritten { result: Ok(()) });
    let timer = match effects.as_slice() {
        [Effect::ScheduleTimer { timer, .. }] => *timer,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(state, Msg::TimerFired(timer));
    assert!(state.view().notification.is_none());
}

#[test]
fn server_error_fails_job_without_touching_output() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "Test text");
    let (state, effects) = fail(
        state,
        job_id,
        RequestFailure::http(500, "Internal Server Error"),
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.status, JobStatus::Failed);
    assert!(view.output.is_empty());
    assert!(!view.loading);
    assert!(!view.show_copy);
    let error = view.error.expect("error fallback");
    assert_eq!(error.kind, ErrorKind::Unknown);
    assert_eq!(error.message, "Internal Server Error");
    assert_eq!(error.error_count, 1);
    assert!(!error.suggest_switch_model);
}

#[test]
fn server_error_mentioning_api_key_is_classified() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "Test text");
    let (state, _) = fail(
        state,
        job_id,
        RequestFailure::http(500, "Incorrect API key provided"),
    );
    assert_eq!(state.view().error.unwrap().kind, ErrorKind::ApiKey);
    assert_eq!(state.error_count(), 1);
}

#[test]
fn partial_output_survives_failure() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "Test text");
    let state = chunk(state, job_id, "partial");
    let (state, _) = fail(state, job_id, RequestFailure::network("connection reset"));

    let job = state.job().unwrap();
    assert_eq!(job.status(), JobStatus::Failed);
    assert_eq!(job.output(), "partial");
    assert_eq!(job.error().unwrap().kind, ErrorKind::Network);
}

#[test]
fn late_events_after_terminal_state_are_dropped() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "Test text");
    let (state, _) = fail(state, job_id, RequestFailure::http(500, "boom"));
    let state = chunk(state, job_id, "late");
    let (state, effects) = update(state, Msg::StreamFinished { job_id });

    assert!(effects.is_empty());
    assert_eq!(state.job().unwrap().status(), JobStatus::Failed);
    assert!(state.job().unwrap().output().is_empty());
    assert_eq!(state.error_count(), 1);
}

#[test]
fn deadline_synthesizes_timeout_and_cancels_transport() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "long text");
    let state = chunk(state, job_id, "slow");
    let (state, effects) = update(state, Msg::TimerFired(Timer::RequestDeadline(job_id)));

    assert_eq!(effects, vec![Effect::CancelTranslation { job_id }]);
    let view = state.view();
    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.error.unwrap().kind, ErrorKind::Timeout);

    // A transport error arriving afterwards changes nothing.
    let (state, _) = fail(state, job_id, RequestFailure::network("aborted"));
    assert_eq!(state.error_count(), 1);
    assert_eq!(state.last_error().unwrap().kind, ErrorKind::Timeout);
}

#[test]
fn deadline_for_finished_job_is_ignored() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "text");
    let state = chunk(state, job_id, "done");
    let (state, _) = update(state, Msg::StreamFinished { job_id });
    let (state, effects) = update(state, Msg::TimerFired(Timer::RequestDeadline(job_id)));

    assert!(effects.is_empty());
    assert_eq!(state.view().status, JobStatus::Succeeded);
}

#[test]
fn retry_after_failure_shows_only_second_job_output() {
    init_logging();
    let (state, first) = submit_text(configured(), "Test text");
    let (state, _) = fail(state, first, RequestFailure::http(500, "Internal Server Error"));
    assert_eq!(state.view().status, JobStatus::Failed);

    let (state, second) = submit_text(state, "Another test");
    assert_ne!(first, second);
    assert_eq!(state.view().status, JobStatus::Pending);
    assert!(state.view().error.is_none());
    // The old error stays recorded until the new job reaches a terminal state.
    assert!(state.last_error().is_some());

    let state = chunk(state, second, "另一个测试");
    let (state, _) = update(state, Msg::StreamFinished { job_id: second });

    let view = state.view();
    assert_eq!(view.status, JobStatus::Succeeded);
    assert_eq!(view.output, "另一个测试");
    assert!(state.last_error().is_none());
    assert_eq!(state.error_count(), 1);
}

#[test]
fn retry_resubmits_last_text() {
    init_logging();
    let (state, first) = submit_text(configured(), "Retry me");
    let (state, _) = fail(state, first, RequestFailure::timeout("Request timeout"));
    let (state, _) = update(state, Msg::InputChanged("something else".to_string()));

    let (state, effects) = update(state, Msg::RetryClicked);
    let resubmitted = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::StartTranslation { source_text, .. } => Some(source_text.clone()),
            _ => None,
        })
        .expect("retry issues a request");
    assert_eq!(resubmitted, "Retry me");
    assert_eq!(state.input(), "something else");
    assert_ne!(state.active_job_id(), Some(first));
}

#[test]
fn retry_without_history_does_nothing() {
    init_logging();
    let (state, effects) = update(configured(), Msg::RetryClicked);
    assert!(effects.is_empty());
    assert!(state.job().is_none());
}

#[test]
fn repeated_failures_suggest_switching_models() {
    init_logging();
    let mut state = configured();
    for attempt in 1..=ERROR_SUGGESTION_THRESHOLD {
        let (next, job_id) = submit_text(state, "Test text");
        let (next, _) = fail(next, job_id, RequestFailure::http(429, "rate limit reached"));
        let error = next.view().error.unwrap();
        assert_eq!(error.kind, ErrorKind::RateLimit);
        assert_eq!(error.error_count, attempt);
        assert_eq!(
            error.suggest_switch_model,
            attempt >= ERROR_SUGGESTION_THRESHOLD
        );
        state = next;
    }

    // Still accepts submissions after repeated failures.
    let (state, _) = submit_text(state, "Test text");
    assert_eq!(state.view().status, JobStatus::Pending);
}

#[test]
fn copy_button_copies_trimmed_output() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "text");
    let state = chunk(state, job_id, "  translated  \n");
    let (state, _) = update(state, Msg::StreamFinished { job_id });
    let (_, effects) = update(state, Msg::CopyClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "translated".to_string(),
        }]
    );
}

#[test]
fn empty_stream_succeeds_without_copy() {
    init_logging();
    let (state, job_id) = submit_text(configured(), "text");
    let (state, effects) = update(state, Msg::StreamFinished { job_id });
    assert_eq!(state.view().status, JobStatus::Succeeded);
    assert!(!state.view().show_copy);
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::CopyToClipboard { .. })));
}
