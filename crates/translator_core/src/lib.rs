//! Translator core: pure request/response state machine and view-model helpers.
mod config;
mod effect;
mod error;
mod job;
mod keyboard;
mod msg;
mod notification;
mod settings;
mod state;
mod update;
mod view_model;

pub use config::{
    AppConfig, ConfigPatch, ModelPreset, Provider, CONFIG_STORAGE_KEY, DEFAULT_MODEL,
    MODEL_PRESETS,
};
pub use effect::{Effect, Timer};
pub use error::{classify, ErrorKind, JobError, RequestFailure, ERROR_SUGGESTION_THRESHOLD};
pub use job::{JobId, JobStatus, TranslationJob};
pub use keyboard::{key_action, Key, KeyAction, KeyPress};
pub use msg::Msg;
pub use notification::{
    Notification, NotificationId, NotificationKind, NotificationTopic, NOTIFICATION_DURATION,
};
pub use settings::{SettingsState, ValidationOutcome, ValidationStatus};
pub use state::AppState;
pub use update::{update, REQUEST_TIMEOUT, SUCCESS_PULSE};
pub use view_model::{AppViewModel, ErrorView, NotificationView, SettingsView};
