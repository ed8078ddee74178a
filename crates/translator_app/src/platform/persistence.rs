use std::path::PathBuf;

use translator_core::ConfigPatch;
use translator_engine::{ConfigStore, JsonFileStorage};
use translator_logging::{translator_error, translator_info};

const CONFIG_FILENAME: &str = "translator_config.json";

pub(crate) type AppConfigStore = ConfigStore<JsonFileStorage>;

pub(crate) fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILENAME)
}

pub(crate) fn open_config_store() -> AppConfigStore {
    let path = config_path();
    translator_info!("Config store at {:?}", path);
    ConfigStore::open(JsonFileStorage::new(path))
}

/// Applies a settings edit durably. A failed write is logged; the in-memory
/// value still holds the edit so the session keeps working.
pub(crate) fn persist_patch(store: &mut AppConfigStore, patch: ConfigPatch) {
    if let Err(err) = store.set(patch) {
        translator_error!(
            "Failed to persist config to {:?}: {}",
            store.storage().path(),
            err
        );
    }
}

pub(crate) fn reset_to_default(store: &mut AppConfigStore) {
    if let Err(err) = store.reset_to_default() {
        translator_error!(
            "Failed to persist default config to {:?}: {}",
            store.storage().path(),
            err
        );
    }
}
