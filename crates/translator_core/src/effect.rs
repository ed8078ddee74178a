use std::time::Duration;

use crate::{AppConfig, ConfigPatch, JobId, NotificationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open a streaming call to the translation endpoint.
    StartTranslation {
        job_id: JobId,
        source_text: String,
        config: AppConfig,
    },
    /// Advisory: the job was superseded; its transport may be dropped.
    CancelTranslation { job_id: JobId },
    /// Deliver `Msg::TimerFired(timer)` after `after`.
    ScheduleTimer { timer: Timer, after: Duration },
    CopyToClipboard { text: String },
    PersistConfig { patch: ConfigPatch },
    ResetConfig,
    ValidateConfig { request_id: u64, config: AppConfig },
    FocusInput,
}

/// Timers carry the identity they were armed for, so a late firing for a
/// superseded job or notification is recognisable and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    RequestDeadline(JobId),
    SuccessPulseEnd(JobId),
    NotificationDismiss(NotificationId),
}
