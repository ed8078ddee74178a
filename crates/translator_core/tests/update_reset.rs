use translator_core::{
    update, AppConfig, AppState, Effect, JobId, JobStatus, Msg, RequestFailure,
};

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

#[test]
fn reset_clears_everything_and_refocuses() {
    let (state, job_id) = submit_text(configured(), "Test text");
    let (state, _) = update(
        state,
        Msg::ChunkReceived {
            job_id,
            text: "partial".to_string(),
        },
    );

    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(
        effects,
        vec![Effect::CancelTranslation { job_id }, Effect::FocusInput]
    );

    let view = state.view();
    assert_eq!(view.status, JobStatus::Idle);
    assert!(view.input.is_empty());
    assert!(view.output.is_empty());
    assert!(view.error.is_none());
    assert!(!view.loading);
}

#[test]
fn reset_is_idempotent() {
    let (state, job_id) = submit_text(configured(), "Test text");
    let (state, _) = update(
        state,
        Msg::RequestFailed {
            job_id,
            failure: RequestFailure::http(500, "boom"),
        },
    );

    let (once, _) = update(state, Msg::ResetClicked);
    let (twice, effects) = update(once.clone(), Msg::ResetClicked);

    assert_eq!(once.view(), twice.view());
    assert_eq!(twice.error_count(), 0);
    assert!(twice.last_error().is_none());
    assert_eq!(effects, vec![Effect::FocusInput]);
}

#[test]
fn reset_clears_error_counter() {
    let (state, job_id) = submit_text(configured(), "Test text");
    let (state, _) = update(
        state,
        Msg::RequestFailed {
            job_id,
            failure: RequestFailure::http(500, "boom"),
        },
    );
    assert_eq!(state.error_count(), 1);

    let (state, _) = update(state, Msg::ResetClicked);
    assert_eq!(state.error_count(), 0);
}

#[test]
fn late_events_from_reset_job_do_not_touch_the_next_job() {
    let (state, job_a) = submit_text(configured(), "first");
    let (state, _) = update(state, Msg::ResetClicked);
    let (state, job_b) = submit_text(state, "second");
    assert_ne!(job_a, job_b);

    let (state, _) = update(
        state,
        Msg::ChunkReceived {
            job_id: job_a,
            text: "from A".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::RequestFailed {
            job_id: job_a,
            failure: RequestFailure::network("late"),
        },
    );
    let (state, effects) = update(state, Msg::StreamFinished { job_id: job_a });
    assert!(effects.is_empty());

    let job = state.job().unwrap();
    assert_eq!(job.id(), job_b);
    assert_eq!(job.status(), JobStatus::Pending);
    assert!(job.output().is_empty());
    assert_eq!(state.error_count(), 0);

    let (state, _) = update(
        state,
        Msg::ChunkReceived {
            job_id: job_b,
            text: "from B".to_string(),
        },
    );
    assert_eq!(state.view().output, "from B");
}

#[test]
fn reset_keeps_model_preference() {
    let (state, _) = update(configured(), Msg::ModelSelected("deepseek-coder".to_string()));
    let (state, _) = update(state, Msg::ResetClicked);
    assert_eq!(state.config().model, "deepseek-coder");
    assert_eq!(state.view().model_label, "DeepSeek");
}
