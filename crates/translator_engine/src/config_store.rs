//! Durable home of [`AppConfig`].
//!
//! Storage is a single JSON document mapping namespaced keys to values; the
//! configuration lives under [`CONFIG_STORAGE_KEY`] as an object holding
//! exactly the config fields. Nothing transient is ever written.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use translator_core::{AppConfig, ConfigPatch, CONFIG_STORAGE_KEY};
use translator_logging::{translator_info, translator_warn};

use crate::persist::{read_optional, write_atomic, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("malformed storage document: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub trait ConfigStorage: Send {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Keyed JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        match read_optional(&self.path)? {
            None => Ok(Map::new()),
            Some(text) if text.trim().is_empty() => Ok(Map::new()),
            Some(text) => Ok(serde_json::from_str(&text)?),
        }
    }
}

impl ConfigStorage for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_document()?.remove(key))
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(StoreError::Malformed(err)) => {
                translator_warn!(
                    "Replacing malformed storage document {:?}: {}",
                    self.path,
                    err
                );
                Map::new()
            }
            Err(err) => return Err(err),
        };
        document.insert(key.to_string(), value);
        let text = serde_json::to_string_pretty(&Value::Object(document))?;
        write_atomic(&self.path, &text)?;
        Ok(())
    }
}

/// In-process storage, for tests and for running without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: Value) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value);
        Self { entries }
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl ConfigStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

pub struct ConfigStore<S> {
    storage: S,
    current: AppConfig,
}

impl<S: ConfigStorage> ConfigStore<S> {
    /// Loads the persisted config. Missing or unreadable storage yields the
    /// defaults; the problem is logged rather than surfaced.
    pub fn open(storage: S) -> Self {
        let current = match storage.load(CONFIG_STORAGE_KEY) {
            Ok(Some(value)) => match serde_json::from_value::<AppConfig>(value) {
                Ok(config) => {
                    translator_info!("Loaded persisted config (model {})", config.model);
                    config
                }
                Err(err) => {
                    translator_warn!("Ignoring unreadable persisted config: {}", err);
                    AppConfig::default()
                }
            },
            Ok(None) => AppConfig::default(),
            Err(err) => {
                translator_warn!("Failed to load persisted config: {}", err);
                AppConfig::default()
            }
        };
        Self { storage, current }
    }

    pub fn get(&self) -> &AppConfig {
        &self.current
    }

    /// Merges `patch` and persists immediately. The in-memory value is
    /// updated even when writing fails.
    pub fn set(&mut self, patch: ConfigPatch) -> Result<(), StoreError> {
        self.current.apply(patch);
        self.persist()
    }

    pub fn is_configured(&self) -> bool {
        self.current.is_configured()
    }

    pub fn reset_to_default(&mut self) -> Result<(), StoreError> {
        self.current = AppConfig::default();
        self.persist()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let value = serde_json::to_value(&self.current)?;
        self.storage.save(CONFIG_STORAGE_KEY, value)
    }
}
