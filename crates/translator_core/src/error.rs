use std::fmt;

/// Once this many failures pile up without a reset, the fallback suggests
/// trying a different model.
pub const ERROR_SUGGESTION_THRESHOLD: u32 = 3;

/// Coarse classification of a failed request, used to pick user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    RateLimit,
    ApiKey,
    Network,
    Unknown,
}

impl ErrorKind {
    pub fn title(self) -> &'static str {
        match self {
            ErrorKind::Timeout => "Request Timeout",
            ErrorKind::RateLimit => "Rate Limit Exceeded",
            ErrorKind::ApiKey => "Configuration Error",
            ErrorKind::Network => "Network Error",
            ErrorKind::Unknown => "Translation Error",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Timeout => {
                "The translation took too long. Please try again with a shorter text."
            }
            ErrorKind::RateLimit => "Too many requests. Please wait a moment and try again.",
            ErrorKind::ApiKey => {
                "API key is missing or invalid. Please check your configuration."
            }
            ErrorKind::Network => "Unable to connect. Please check your internet connection.",
            ErrorKind::Unknown => "Something went wrong during translation.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::ApiKey => "api_key",
            ErrorKind::Network => "network",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// What the transport reported about a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    /// HTTP status, absent when no response arrived.
    pub status: Option<u16>,
    pub message: String,
    pub timed_out: bool,
}

impl RequestFailure {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            timed_out: true,
        }
    }
}

/// Derives an [`ErrorKind`] from a failure. Checks run in priority order, so a
/// 408 mentioning an API key is still a timeout.
pub fn classify(failure: &RequestFailure) -> ErrorKind {
    let message = failure.message.to_lowercase();

    if failure.timed_out
        || failure.status == Some(408)
        || message.contains("timeout")
        || message.contains("timed out")
    {
        return ErrorKind::Timeout;
    }
    if failure.status == Some(429) || message.contains("rate limit") {
        return ErrorKind::RateLimit;
    }
    if matches!(failure.status, Some(401) | Some(403))
        || message.contains("api key")
        || message.contains("api configuration")
    {
        return ErrorKind::ApiKey;
    }
    if failure.status.is_none() || message.contains("network") {
        return ErrorKind::Network;
    }
    ErrorKind::Unknown
}

/// Error attached to a failed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobError {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

impl JobError {
    pub fn from_failure(failure: &RequestFailure) -> Self {
        let message = failure.message.trim();
        Self {
            kind: classify(failure),
            message: (!message.is_empty()).then(|| message.to_string()),
        }
    }

    /// Text for the fallback surface. Unknown errors show the raw message.
    pub fn display_message(&self) -> String {
        match (self.kind, self.message.as_deref()) {
            (ErrorKind::Unknown, Some(raw)) => raw.to_string(),
            (kind, _) => kind.message().to_string(),
        }
    }
}
