use std::fmt;

use crate::{AppConfig, JobError};

/// Identity of one submission. Events carrying a stale id are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(u64);

impl JobId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    Pending,
    Streaming,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn is_in_flight(self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Streaming)
    }
}

/// One translation attempt. `source_text` and `config` are snapshots taken at
/// submission and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    id: JobId,
    source_text: String,
    config: AppConfig,
    status: JobStatus,
    output: String,
    error: Option<JobError>,
}

impl TranslationJob {
    pub(crate) fn new(id: JobId, source_text: String, config: AppConfig) -> Self {
        Self {
            id,
            source_text,
            config,
            status: JobStatus::Pending,
            output: String::new(),
            error: None,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error(&self) -> Option<&JobError> {
        self.error.as_ref()
    }

    /// Appends a chunk. Returns false once the job has left the stream.
    pub(crate) fn append_chunk(&mut self, chunk: &str) -> bool {
        if !self.status.is_in_flight() {
            return false;
        }
        self.status = JobStatus::Streaming;
        self.output.push_str(chunk);
        true
    }

    pub(crate) fn succeed(&mut self) -> bool {
        if !self.status.is_in_flight() {
            return false;
        }
        self.status = JobStatus::Succeeded;
        true
    }

    /// Output gathered so far is left untouched.
    pub(crate) fn fail(&mut self, error: JobError) -> bool {
        if !self.status.is_in_flight() {
            return false;
        }
        self.status = JobStatus::Failed;
        self.error = Some(error);
        true
    }
}
