use crate::{
    AppConfig, AppState, ErrorKind, JobStatus, ModelPreset, NotificationKind, NotificationTopic,
    ValidationStatus, ERROR_SUGGESTION_THRESHOLD, MODEL_PRESETS,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    /// Accumulated output, verbatim.
    pub output: String,
    pub status: JobStatus,
    pub loading: bool,
    pub show_copy: bool,
    pub error: Option<ErrorView>,
    pub notification: Option<NotificationView>,
    pub success_pulse: bool,
    pub model: String,
    pub model_label: String,
    pub model_presets: Vec<ModelPreset>,
    pub configured: bool,
    pub settings: Option<SettingsView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub kind: ErrorKind,
    pub title: String,
    pub message: String,
    pub error_count: u32,
    pub suggest_switch_model: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub message: String,
    pub kind: NotificationKind,
    pub topic: NotificationTopic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub draft: AppConfig,
    pub validation: ValidationStatus,
    pub can_validate: bool,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let status = self.job().map_or(JobStatus::Idle, |job| job.status());
        let output = self
            .job()
            .map(|job| job.output().to_string())
            .unwrap_or_default();

        let error = self
            .job()
            .filter(|job| job.status() == JobStatus::Failed)
            .and_then(|job| job.error())
            .map(|err| ErrorView {
                kind: err.kind,
                title: err.kind.title().to_string(),
                message: err.display_message(),
                error_count: self.error_count(),
                suggest_switch_model: self.error_count() >= ERROR_SUGGESTION_THRESHOLD,
            });

        let settings = self.settings().open.then(|| SettingsView {
            draft: self.settings().draft.clone(),
            validation: self.settings().validation,
            can_validate: self.settings().validation != ValidationStatus::Validating
                && !self.settings().draft.api_key.trim().is_empty(),
        });

        AppViewModel {
            input: self.input().to_string(),
            show_copy: status != JobStatus::Failed && !output.trim().is_empty(),
            output,
            status,
            loading: status.is_in_flight(),
            error,
            notification: self.notification().map(|n| NotificationView {
                message: n.message.clone(),
                kind: n.kind,
                topic: n.topic,
            }),
            success_pulse: self.success_pulse,
            model: self.config().model.clone(),
            model_label: self.config().model_label(),
            model_presets: MODEL_PRESETS.to_vec(),
            configured: self.config().is_configured(),
            settings,
        }
    }
}
