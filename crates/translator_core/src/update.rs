use std::time::Duration;

use crate::{
    key_action, AppState, ConfigPatch, Effect, JobError, JobId, JobStatus, KeyAction, Msg,
    NotificationKind, NotificationTopic, RequestFailure, Timer, TranslationJob,
    ValidationOutcome, ValidationStatus, NOTIFICATION_DURATION,
};

/// Ceiling on one translation request, measured from submission.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Length of the one-shot animation after a successful translation.
pub const SUCCESS_PULSE: Duration = Duration::from_millis(1000);

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            if state.input != text {
                state.input = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::KeyPressed(press) => match key_action(press, state.composing) {
            KeyAction::Submit => {
                let text = state.input.clone();
                submit(&mut state, text)
            }
            KeyAction::InsertNewline => {
                state.input.push('\n');
                state.mark_dirty();
                Vec::new()
            }
            KeyAction::Ignore => Vec::new(),
        },
        Msg::CompositionStarted => {
            state.composing = true;
            Vec::new()
        }
        Msg::CompositionEnded => {
            state.composing = false;
            Vec::new()
        }
        Msg::SubmitClicked => {
            let text = state.input.clone();
            submit(&mut state, text)
        }
        Msg::RetryClicked => match state.last_submitted.clone() {
            Some(text) => submit(&mut state, text),
            None => Vec::new(),
        },
        Msg::ResetClicked => reset(&mut state),
        Msg::CopyClicked => {
            let text = state
                .job
                .as_ref()
                .map(|job| job.output().trim().to_string())
                .unwrap_or_default();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![Effect::CopyToClipboard { text }]
            }
        }
        Msg::ModelSelected(model) => {
            let model = model.trim().to_string();
            if model.is_empty() || model == state.config.model {
                Vec::new()
            } else {
                let settings = &mut state.settings;
                if settings.open && settings.draft.model == settings.baseline.model {
                    settings.draft.model.clone_from(&model);
                    settings.baseline.model.clone_from(&model);
                }
                let patch = ConfigPatch::model(model);
                state.config.apply(patch.clone());
                state.mark_dirty();
                vec![Effect::PersistConfig { patch }]
            }
        }
        Msg::ConfigLoaded(config) => {
            state.config = config;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SettingsOpened => {
            let config = state.config.clone();
            state.settings.open_with(&config);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SettingsClosed => {
            if state.settings.open {
                state.settings.close();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SettingsDraftChanged(patch) => {
            if state.settings.open && !patch.is_empty() {
                state.settings.draft.apply(patch);
                state.settings.validation = ValidationStatus::Idle;
                state.settings.pending_validation = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SettingsSaveClicked => save_settings(&mut state),
        Msg::SettingsValidateClicked => validate_settings(&mut state),
        Msg::SettingsResetClicked => {
            state.config = Default::default();
            if state.settings.open {
                let config = state.config.clone();
                state.settings.open_with(&config);
            }
            let mut effects = vec![Effect::ResetConfig];
            effects.extend(notify(
                &mut state,
                "Settings restored to defaults",
                NotificationKind::Info,
                NotificationTopic::Settings,
            ));
            effects
        }
        Msg::ValidationFinished { request_id, result } => {
            finish_validation(&mut state, request_id, result)
        }
        Msg::ChunkReceived { job_id, text } => {
            if let Some(job) = state.job_mut_if_active(job_id) {
                if job.append_chunk(&text) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::StreamFinished { job_id } => finish_job(&mut state, job_id),
        Msg::RequestFailed { job_id, failure } => fail_job(&mut state, job_id, &failure),
        Msg::TimerFired(timer) => fire_timer(&mut state, timer),
        Msg::ClipboardWritten { result } => match result {
            Ok(()) => notify(
                &mut state,
                "Copied to clipboard",
                NotificationKind::Success,
                NotificationTopic::Clipboard,
            ),
            Err(_) => notify(
                &mut state,
                "Failed to copy",
                NotificationKind::Error,
                NotificationTopic::Clipboard,
            ),
        },
    };

    (state, effects)
}

fn submit(state: &mut AppState, text: String) -> Vec<Effect> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    if !state.config.is_configured() {
        if !state.settings.open {
            let config = state.config.clone();
            state.settings.open_with(&config);
        }
        return notify(
            state,
            "Please configure your API key",
            NotificationKind::Error,
            NotificationTopic::Configuration,
        );
    }

    let mut effects = Vec::with_capacity(3);
    if let Some(previous) = state.job.as_ref().filter(|job| job.status().is_in_flight()) {
        effects.push(Effect::CancelTranslation {
            job_id: previous.id(),
        });
    }

    let job_id = state.allocate_job_id();
    let config = state.config.clone();
    state.job = Some(TranslationJob::new(job_id, text.clone(), config.clone()));
    state.last_submitted = Some(text.clone());
    state.success_pulse = false;
    state.mark_dirty();

    effects.push(Effect::StartTranslation {
        job_id,
        source_text: text,
        config,
    });
    effects.push(Effect::ScheduleTimer {
        timer: Timer::RequestDeadline(job_id),
        after: REQUEST_TIMEOUT,
    });
    effects
}

fn reset(state: &mut AppState) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(2);
    if let Some(job) = state.job.take() {
        if job.status().is_in_flight() {
            effects.push(Effect::CancelTranslation { job_id: job.id() });
        }
    }
    state.input.clear();
    state.composing = false;
    state.last_error = None;
    state.error_count = 0;
    state.success_pulse = false;
    state.mark_dirty();
    effects.push(Effect::FocusInput);
    effects
}

fn finish_job(state: &mut AppState, job_id: JobId) -> Vec<Effect> {
    let Some(job) = state.job_mut_if_active(job_id) else {
        return Vec::new();
    };
    if !job.succeed() {
        return Vec::new();
    }
    let text = job.output().trim().to_string();

    state.last_error = None;
    state.success_pulse = true;
    state.mark_dirty();

    let mut effects = vec![Effect::ScheduleTimer {
        timer: Timer::SuccessPulseEnd(job_id),
        after: SUCCESS_PULSE,
    }];
    if !text.is_empty() {
        effects.push(Effect::CopyToClipboard { text });
    }
    effects
}

fn fail_job(state: &mut AppState, job_id: JobId, failure: &RequestFailure) -> Vec<Effect> {
    let Some(job) = state.job_mut_if_active(job_id) else {
        return Vec::new();
    };
    let error = JobError::from_failure(failure);
    if !job.fail(error.clone()) {
        return Vec::new();
    }
    state.last_error = Some(error);
    state.error_count += 1;
    state.mark_dirty();
    Vec::new()
}

fn fire_timer(state: &mut AppState, timer: Timer) -> Vec<Effect> {
    match timer {
        Timer::RequestDeadline(job_id) => {
            let in_flight = state
                .job()
                .is_some_and(|job| job.id() == job_id && job.status().is_in_flight());
            if !in_flight {
                return Vec::new();
            }
            let failure = RequestFailure::timeout(format!(
                "Request timeout after {}s",
                REQUEST_TIMEOUT.as_secs()
            ));
            let mut effects = fail_job(state, job_id, &failure);
            effects.push(Effect::CancelTranslation { job_id });
            effects
        }
        Timer::SuccessPulseEnd(job_id) => {
            let current = state
                .job()
                .is_some_and(|job| job.id() == job_id && job.status() == JobStatus::Succeeded);
            if current && state.success_pulse {
                state.success_pulse = false;
                state.mark_dirty();
            }
            Vec::new()
        }
        Timer::NotificationDismiss(id) => {
            state.dismiss_notification(id);
            Vec::new()
        }
    }
}

fn save_settings(state: &mut AppState) -> Vec<Effect> {
    if !state.settings.open {
        return Vec::new();
    }
    // Edits made outside the dialog since it opened (the model selector)
    // survive because only the draft's own changes are written.
    let patch = ConfigPatch::changes(&state.settings.baseline, &state.settings.draft);
    let mut candidate = state.config.clone();
    candidate.apply(patch.clone());
    if let Some(problem) = candidate.local_problem() {
        return notify(
            state,
            problem,
            NotificationKind::Error,
            NotificationTopic::Settings,
        );
    }
    state.config = candidate;
    state.settings.close();
    state.mark_dirty();

    let mut effects = Vec::with_capacity(2);
    if !patch.is_empty() {
        effects.push(Effect::PersistConfig { patch });
    }
    effects.extend(notify(
        state,
        "Settings saved",
        NotificationKind::Success,
        NotificationTopic::Settings,
    ));
    effects
}

fn validate_settings(state: &mut AppState) -> Vec<Effect> {
    if !state.settings.open || state.settings.validation == ValidationStatus::Validating {
        return Vec::new();
    }
    if let Some(problem) = state.settings.draft.local_problem() {
        return notify(
            state,
            problem,
            NotificationKind::Error,
            NotificationTopic::Validation,
        );
    }
    let request_id = state.allocate_validation_id();
    state.settings.validation = ValidationStatus::Validating;
    state.settings.pending_validation = Some(request_id);
    state.mark_dirty();
    vec![Effect::ValidateConfig {
        request_id,
        config: state.settings.draft.clone(),
    }]
}

fn finish_validation(
    state: &mut AppState,
    request_id: u64,
    result: Result<ValidationOutcome, String>,
) -> Vec<Effect> {
    if state.settings.pending_validation != Some(request_id) {
        return Vec::new();
    }
    state.settings.pending_validation = None;
    state.mark_dirty();

    let (status, message, kind) = match result {
        Ok(ValidationOutcome { valid: true, .. }) => (
            ValidationStatus::Valid,
            "API key is valid".to_string(),
            NotificationKind::Success,
        ),
        Ok(ValidationOutcome { valid: false, error }) => (
            ValidationStatus::Invalid,
            error.unwrap_or_else(|| "Invalid API key".to_string()),
            NotificationKind::Error,
        ),
        Err(_) => (
            ValidationStatus::Invalid,
            "Failed to validate API key".to_string(),
            NotificationKind::Error,
        ),
    };
    state.settings.validation = status;
    notify(state, message, kind, NotificationTopic::Validation)
}

fn notify(
    state: &mut AppState,
    message: impl Into<String>,
    kind: NotificationKind,
    topic: NotificationTopic,
) -> Vec<Effect> {
    let id = state.push_notification(message, kind, topic);
    vec![Effect::ScheduleTimer {
        timer: Timer::NotificationDismiss(id),
        after: NOTIFICATION_DURATION,
    }]
}
