use crate::{
    AppConfig, JobError, JobId, Notification, NotificationId, NotificationKind,
    NotificationTopic, SettingsState, TranslationJob,
};

/// Everything the controller owns. Only `update` mutates it; the surface reads
/// it through [`AppState::view`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) input: String,
    pub(crate) composing: bool,
    pub(crate) config: AppConfig,
    pub(crate) job: Option<TranslationJob>,
    pub(crate) last_submitted: Option<String>,
    pub(crate) last_error: Option<JobError>,
    pub(crate) error_count: u32,
    pub(crate) success_pulse: bool,
    pub(crate) notification: Option<Notification>,
    pub(crate) settings: SettingsState,
    next_job_id: u64,
    next_notification_id: u64,
    next_validation_id: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn job(&self) -> Option<&TranslationJob> {
        self.job.as_ref()
    }

    pub fn active_job_id(&self) -> Option<JobId> {
        self.job.as_ref().map(TranslationJob::id)
    }

    pub fn last_error(&self) -> Option<&JobError> {
        self.last_error.as_ref()
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn allocate_job_id(&mut self) -> JobId {
        self.next_job_id += 1;
        JobId::new(self.next_job_id)
    }

    pub(crate) fn allocate_validation_id(&mut self) -> u64 {
        self.next_validation_id += 1;
        self.next_validation_id
    }

    /// Replaces any visible notification. The caller schedules its dismissal.
    pub(crate) fn push_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        topic: NotificationTopic,
    ) -> NotificationId {
        self.next_notification_id += 1;
        let id = NotificationId(self.next_notification_id);
        self.notification = Some(Notification {
            id,
            message: message.into(),
            kind,
            topic,
        });
        self.dirty = true;
        id
    }

    pub(crate) fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        match &self.notification {
            Some(current) if current.id == id => {
                self.notification = None;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// The active job, but only if `job_id` still names it.
    pub(crate) fn job_mut_if_active(&mut self, job_id: JobId) -> Option<&mut TranslationJob> {
        self.job.as_mut().filter(|job| job.id() == job_id)
    }
}
