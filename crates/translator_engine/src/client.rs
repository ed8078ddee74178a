use std::sync::mpsc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use translator_core::{AppConfig, JobId};
use translator_logging::{translator_debug, translator_trace};

use crate::stream::{StreamDecoder, StreamPart};
use crate::wire::TranslatePayload;
use crate::{EngineEvent, FailureKind, RequestError, ValidationResponse};

pub const DEFAULT_TRANSLATE_URL: &str = "http://localhost:3000/api/translate";
pub const DEFAULT_VALIDATE_URL: &str = "http://localhost:3000/api/validate";

/// Environment variables that override the endpoint URLs.
pub const TRANSLATE_URL_ENV: &str = "TRANSLATOR_ENDPOINT";
pub const VALIDATE_URL_ENV: &str = "TRANSLATOR_VALIDATE_ENDPOINT";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub translate_url: String,
    pub validate_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Longest error body (in chars) kept as a failure message.
    pub max_error_body: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            validate_url: DEFAULT_VALIDATE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_error_body: 512,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{variable} is not a valid URL ({value}): {source}")]
pub struct SettingsError {
    pub variable: &'static str,
    pub value: String,
    #[source]
    pub source: url::ParseError,
}

impl ClientSettings {
    /// Defaults, with endpoint URLs overridden from the environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        for (variable, slot) in [
            (TRANSLATE_URL_ENV, &mut settings.translate_url),
            (VALIDATE_URL_ENV, &mut settings.validate_url),
        ] {
            let Some(value) = lookup(variable).filter(|value| !value.trim().is_empty()) else {
                continue;
            };
            let value = value.trim().to_string();
            url::Url::parse(&value).map_err(|source| SettingsError {
                variable,
                value: value.clone(),
                source,
            })?;
            *slot = value;
        }
        Ok(settings)
    }
}

pub trait StreamSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelStreamSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelStreamSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl StreamSink for ChannelStreamSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Consumer side of the remote translation endpoint.
#[async_trait::async_trait]
pub trait TranslationClient: Send + Sync {
    /// Streams the translation of `source_text`, emitting one
    /// [`EngineEvent::Chunk`] per text part in arrival order. Returns once the
    /// stream closes; the caller reports completion.
    async fn translate(
        &self,
        job_id: JobId,
        source_text: &str,
        config: &AppConfig,
        sink: &dyn StreamSink,
    ) -> Result<(), RequestError>;

    async fn validate(&self, config: &AppConfig) -> Result<ValidationResponse, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTranslationClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestTranslationClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::new(FailureKind::InvalidRequest, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
        accept: &'static str,
    ) -> Result<reqwest::Response, RequestError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, accept)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let mut message: String = body.trim().chars().take(self.settings.max_error_body).collect();
        if message.is_empty() {
            message = status.to_string();
        }
        Err(RequestError::new(
            FailureKind::HttpStatus(status.as_u16()),
            message,
        ))
    }
}

#[async_trait::async_trait]
impl TranslationClient for ReqwestTranslationClient {
    async fn translate(
        &self,
        job_id: JobId,
        source_text: &str,
        config: &AppConfig,
        sink: &dyn StreamSink,
    ) -> Result<(), RequestError> {
        let body = serde_json::to_vec(&TranslatePayload::new(source_text, config))
            .map_err(|err| RequestError::new(FailureKind::InvalidRequest, err.to_string()))?;
        let response = self
            .post_json(&self.settings.translate_url, body, "text/event-stream, text/plain")
            .await?;

        let mut decoder = StreamDecoder::new();
        let mut chunks = 0usize;
        let mut stream = response.bytes_stream();
        while let Some(bytes) = stream.next().await {
            let bytes = bytes.map_err(map_reqwest_error)?;
            translator_trace!("Job {} received {} body bytes", job_id, bytes.len());
            for part in decoder.feed(&bytes) {
                chunks += emit_part(job_id, part, sink)?;
            }
        }
        for part in decoder.finish() {
            chunks += emit_part(job_id, part, sink)?;
        }

        translator_debug!("Job {} stream closed after {} chunks", job_id, chunks);
        Ok(())
    }

    async fn validate(&self, config: &AppConfig) -> Result<ValidationResponse, RequestError> {
        let body = serde_json::to_vec(config)
            .map_err(|err| RequestError::new(FailureKind::InvalidRequest, err.to_string()))?;
        let response = self
            .post_json(&self.settings.validate_url, body, "application/json")
            .await?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| RequestError::new(FailureKind::InvalidResponse, err.to_string()))
    }
}

fn emit_part(job_id: JobId, part: StreamPart, sink: &dyn StreamSink) -> Result<usize, RequestError> {
    match part {
        StreamPart::Text(text) => {
            sink.emit(EngineEvent::Chunk { job_id, text });
            Ok(1)
        }
        StreamPart::Error(message) => Err(RequestError::new(FailureKind::Stream, message)),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return RequestError::new(FailureKind::InvalidRequest, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
