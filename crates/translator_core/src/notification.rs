use std::time::Duration;

/// How long a notification stays visible unless superseded.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// What raised the notification; lets the surface and tests tell a missing
/// configuration apart from an ordinary error toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTopic {
    Clipboard,
    Configuration,
    Settings,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub topic: NotificationTopic,
}
