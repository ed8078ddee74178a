use std::fmt;

use serde::Deserialize;
use translator_core::JobId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Chunk {
        job_id: JobId,
        text: String,
    },
    Finished {
        job_id: JobId,
    },
    Failed {
        job_id: JobId,
        error: RequestError,
    },
    Validated {
        request_id: u64,
        result: Result<ValidationResponse, RequestError>,
    },
}

/// Body of the validation endpoint's answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FailureKind::HttpStatus(code) => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Endpoint answered with a non-2xx status.
    HttpStatus(u16),
    Timeout,
    /// No response at all.
    Network,
    /// The stream carried an error part.
    Stream,
    /// Response arrived but could not be understood.
    InvalidResponse,
    /// Request could not be built (bad endpoint URL, unserializable body).
    InvalidRequest,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Stream => write!(f, "stream error"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
        }
    }
}
