//! Translator engine: remote endpoint client, stream decoding and durable config.
mod client;
mod config_store;
mod engine;
mod persist;
mod stream;
mod types;
mod wire;

pub use client::{
    ChannelStreamSink, ClientSettings, ReqwestTranslationClient, SettingsError, StreamSink,
    TranslationClient, DEFAULT_TRANSLATE_URL, DEFAULT_VALIDATE_URL, TRANSLATE_URL_ENV,
    VALIDATE_URL_ENV,
};
pub use config_store::{ConfigStorage, ConfigStore, JsonFileStorage, MemoryStorage, StoreError};
pub use engine::EngineHandle;
pub use persist::{ensure_parent_dir, read_optional, write_atomic, PersistError};
pub use stream::{StreamDecoder, StreamPart};
pub use types::{EngineEvent, FailureKind, RequestError, ValidationResponse};
