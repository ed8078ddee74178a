use translator_core::{AppConfig, ConfigPatch, Provider, DEFAULT_MODEL};

#[test]
fn configured_requires_key_and_model() {
    let mut config = AppConfig::default();
    assert!(!config.is_configured());

    config.apply(ConfigPatch::api_key("sk-1"));
    assert!(config.is_configured());

    config.apply(ConfigPatch::model("   "));
    assert!(!config.is_configured());
}

#[test]
fn patches_merge_instead_of_replacing() {
    let mut config = AppConfig {
        provider: Provider::Custom,
        api_key: "sk-1".to_string(),
        base_url: Some("https://gateway.example.com/v1".to_string()),
        model: DEFAULT_MODEL.to_string(),
    };
    config.apply(ConfigPatch::model("llama3-8b-8192"));

    assert_eq!(config.provider, Provider::Custom);
    assert_eq!(config.api_key, "sk-1");
    assert_eq!(
        config.base_url.as_deref(),
        Some("https://gateway.example.com/v1")
    );
    assert_eq!(config.model, "llama3-8b-8192");

    config.apply(ConfigPatch {
        base_url: Some(String::new()),
        ..ConfigPatch::default()
    });
    assert_eq!(config.base_url, None);
}

#[test]
fn serialized_form_has_exactly_the_config_fields() {
    let config = AppConfig {
        provider: Provider::Custom,
        api_key: "sk-1".to_string(),
        base_url: Some("https://gateway.example.com/v1".to_string()),
        model: "m".to_string(),
    };
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "provider": "custom",
            "apiKey": "sk-1",
            "baseURL": "https://gateway.example.com/v1",
            "model": "m",
        })
    );

    let parsed: AppConfig =
        serde_json::from_str(r#"{"provider":"openai","apiKey":"k","model":"gpt-4o-mini"}"#)
            .unwrap();
    assert_eq!(parsed.provider, Provider::OpenAi);
    assert_eq!(parsed.base_url, None);
}

#[test]
fn model_label_prefers_presets() {
    let mut config = AppConfig::default();
    assert_eq!(config.model_label(), "OpenAI");
    config.model = "my-local-model".to_string();
    assert_eq!(config.model_label(), "my-local-model");
}

#[test]
fn missing_fields_fall_back_individually() {
    let config: AppConfig =
        serde_json::from_str(r#"{"apiKey":"sk-kept","model":"llama3-8b-8192"}"#).unwrap();
    assert_eq!(config.provider, Provider::OpenAi);
    assert_eq!(config.api_key, "sk-kept");
    assert_eq!(config.model, "llama3-8b-8192");

    let config: AppConfig = serde_json::from_str(r#"{"apiKey":"sk-only"}"#).unwrap();
    assert_eq!(config.model, DEFAULT_MODEL);
    assert!(config.is_configured());
}

#[test]
fn changes_lists_only_differing_fields() {
    let before = AppConfig::default();
    let after = AppConfig {
        api_key: "sk-new".to_string(),
        base_url: Some("https://gateway.example.com/v1".to_string()),
        ..AppConfig::default()
    };
    let patch = ConfigPatch::changes(&before, &after);
    assert_eq!(patch.provider, None);
    assert_eq!(patch.model, None);
    assert_eq!(patch.api_key.as_deref(), Some("sk-new"));

    let cleared = ConfigPatch::changes(&after, &before);
    assert_eq!(cleared.base_url.as_deref(), Some(""));
    assert!(ConfigPatch::changes(&after, &after).is_empty());
}
