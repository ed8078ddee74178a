use std::collections::HashMap;
use std::time::Duration;

use pretty_assertions::assert_eq;
use translator_engine::{
    ClientSettings, DEFAULT_TRANSLATE_URL, DEFAULT_VALIDATE_URL, TRANSLATE_URL_ENV,
    VALIDATE_URL_ENV,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_without_overrides() {
    let settings = ClientSettings::from_lookup(lookup(&[])).unwrap();
    assert_eq!(settings.translate_url, DEFAULT_TRANSLATE_URL);
    assert_eq!(settings.validate_url, DEFAULT_VALIDATE_URL);
    assert_eq!(settings.request_timeout, Duration::from_secs(30));
}

#[test]
fn overrides_are_trimmed_and_blank_ignored() {
    let settings = ClientSettings::from_lookup(lookup(&[
        (TRANSLATE_URL_ENV, "  https://proxy.example.com/api/translate "),
        (VALIDATE_URL_ENV, "   "),
    ]))
    .unwrap();
    assert_eq!(settings.translate_url, "https://proxy.example.com/api/translate");
    assert_eq!(settings.validate_url, DEFAULT_VALIDATE_URL);
}

#[test]
fn invalid_override_names_the_variable() {
    let err = ClientSettings::from_lookup(lookup(&[(VALIDATE_URL_ENV, "not a url")])).unwrap_err();
    assert_eq!(err.variable, VALIDATE_URL_ENV);
    assert_eq!(err.value, "not a url");
}
