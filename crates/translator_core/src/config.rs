use serde::{Deserialize, Serialize};

/// Namespaced key the configuration is persisted under.
pub const CONFIG_STORAGE_KEY: &str = "ai-translate-app-store";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Custom,
}

impl Provider {
    pub fn label(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Custom => "Custom Provider",
        }
    }
}

/// User-chosen provider, credentials and model. Only these fields persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub provider: Provider,
    pub api_key: String,
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            api_key: String::new(),
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    /// A submission may only proceed once credentials and a model are set.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.model.trim().is_empty()
    }

    /// Merges `patch` into `self`; fields absent from the patch are kept.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(provider) = patch.provider {
            self.provider = provider;
        }
        if let Some(api_key) = patch.api_key {
            self.api_key = api_key;
        }
        if let Some(base_url) = patch.base_url {
            let trimmed = base_url.trim();
            self.base_url = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
    }

    pub fn model_label(&self) -> String {
        MODEL_PRESETS
            .iter()
            .find(|preset| preset.model == self.model)
            .map(|preset| preset.label.to_string())
            .unwrap_or_else(|| self.model.clone())
    }

    /// Checks the parts of the config the settings surface can verify locally.
    pub fn local_problem(&self) -> Option<&'static str> {
        if self.api_key.trim().is_empty() {
            return Some("Please enter an API key");
        }
        if self.model.trim().is_empty() {
            return Some("Please enter a model name");
        }
        if self.provider == Provider::Custom {
            match self.base_url.as_deref() {
                None => return Some("Base URL is required for custom provider"),
                Some(raw) => {
                    if url::Url::parse(raw).is_err() {
                        return Some("Base URL is not a valid URL");
                    }
                }
            }
        }
        None
    }
}

/// Partial update for [`AppConfig`]. `base_url: Some("")` clears the URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigPatch {
    pub provider: Option<Provider>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl ConfigPatch {
    pub fn model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    pub fn api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// The fields that differ between `before` and `after`, valued as in
    /// `after`. Applying it to anything equal to `before` yields `after`.
    pub fn changes(before: &AppConfig, after: &AppConfig) -> Self {
        Self {
            provider: (before.provider != after.provider).then_some(after.provider),
            api_key: (before.api_key != after.api_key).then(|| after.api_key.clone()),
            base_url: (before.base_url != after.base_url)
                .then(|| after.base_url.clone().unwrap_or_default()),
            model: (before.model != after.model).then(|| after.model.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelPreset {
    pub label: &'static str,
    pub model: &'static str,
}

/// Built-in models offered by the model selector.
pub const MODEL_PRESETS: &[ModelPreset] = &[
    ModelPreset {
        label: "Gemini",
        model: "gemini-1.5-flash",
    },
    ModelPreset {
        label: "Groq",
        model: "llama3-8b-8192",
    },
    ModelPreset {
        label: "OpenAI",
        model: "gpt-4o-mini",
    },
    ModelPreset {
        label: "DeepSeek",
        model: "deepseek-coder",
    },
];
