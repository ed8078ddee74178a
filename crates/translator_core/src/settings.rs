use crate::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationStatus {
    #[default]
    Idle,
    Validating,
    Valid,
    Invalid,
}

/// Response of the validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsState {
    pub open: bool,
    pub draft: AppConfig,
    pub validation: ValidationStatus,
    pub(crate) pending_validation: Option<u64>,
    /// Config as it was when the dialog opened; saving writes only what the
    /// draft changed relative to it.
    pub(crate) baseline: AppConfig,
}

impl SettingsState {
    pub(crate) fn open_with(&mut self, config: &AppConfig) {
        self.open = true;
        self.draft = config.clone();
        self.baseline = config.clone();
        self.validation = ValidationStatus::Idle;
        self.pending_validation = None;
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
        self.validation = ValidationStatus::Idle;
        self.pending_validation = None;
    }
}
