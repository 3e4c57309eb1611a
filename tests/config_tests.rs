//! Configuration module tests

use humanizer::config::settings::{map_lookup, Settings, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT};
use std::collections::HashMap;

fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(map_lookup(vars))
}

#[test]
fn test_settings_with_full_environment() {
    let settings = settings_from(&[
        ("OPENROUTER_API_KEY", "sk-or-v1-abcdef"),
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", "9000"),
        ("PROVIDER_BASE_URL", "http://localhost:4000/v1"),
        ("PROVIDER_MODEL", "meta/llama"),
        ("PROVIDER_TEMPERATURE", "0.8"),
        ("PROVIDER_TOP_P", "0.95"),
        ("REQUEST_TIMEOUT", "30"),
        ("SYSTEM_PROMPT", "Rewrite it."),
        ("MAX_REQUEST_SIZE", "2048"),
        ("MAX_INPUT_WORDS", "500"),
        ("ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ("RUST_LOG", "debug"),
        ("LOG_FORMAT", "json"),
    ])
    .unwrap();

    assert_eq!(settings.bind_address(), "127.0.0.1:9000");
    assert_eq!(settings.provider.api_key.as_deref(), Some("sk-or-v1-abcdef"));
    assert_eq!(settings.provider.base_url, "http://localhost:4000/v1");
    assert_eq!(settings.provider.model, "meta/llama");
    assert_eq!(settings.provider.temperature, Some(0.8));
    assert_eq!(settings.provider.top_p, Some(0.95));
    assert_eq!(settings.provider.timeout, 30);
    assert_eq!(settings.prompt.system_prompt, "Rewrite it.");
    assert_eq!(settings.request.max_request_size, 2048);
    assert_eq!(settings.quota.max_input_words, 500);
    assert_eq!(
        settings.security.allowed_origins,
        vec!["https://a.example".to_string(), "https://b.example".to_string()]
    );
    assert_eq!(settings.logging.format, "json");
}

#[test]
fn test_defaults() {
    let settings = settings_from(&[]).unwrap();

    assert_eq!(settings.provider.api_key, None);
    assert_eq!(settings.provider.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.provider.model, DEFAULT_MODEL);
    assert_eq!(settings.prompt.system_prompt, DEFAULT_SYSTEM_PROMPT);
    assert!((30..=45).contains(&settings.provider.timeout));
    assert_eq!(settings.security.allowed_origins, vec!["*".to_string()]);
}

#[test]
fn test_missing_key_is_not_a_startup_error() {
    let settings = settings_from(&[("SERVER_PORT", "8080")]).unwrap();
    assert!(!settings.has_credential());
}

#[test]
fn test_invalid_values_rejected() {
    let cases: &[(&str, &str, &str)] = &[
        ("SERVER_PORT", "0", "Port number cannot be 0"),
        ("SERVER_PORT", "not-a-port", "Invalid port number"),
        ("PROVIDER_BASE_URL", "ftp://x", "Invalid provider base URL"),
        ("REQUEST_TIMEOUT", "0", "Timeout must be between"),
        ("REQUEST_TIMEOUT", "301", "Timeout must be between"),
        ("PROVIDER_TEMPERATURE", "3.5", "Temperature must be between"),
        ("PROVIDER_TOP_P", "abc", "Invalid top_p value"),
        ("MAX_REQUEST_SIZE", "0", "Maximum request size cannot be 0"),
        ("LOG_FORMAT", "xml", "Invalid log format"),
        ("OPENROUTER_API_KEY", "sk key", "cannot contain whitespace"),
        ("SYSTEM_PROMPT", "  ", "System prompt cannot be empty"),
    ];

    for (key, value, expected) in cases {
        let err = settings_from(&[(*key, *value)]).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains(expected), "{}={} gave: {}", key, value, message);
    }
}

#[test]
fn test_blank_optional_sampling_ignored() {
    let settings = settings_from(&[("PROVIDER_TEMPERATURE", ""), ("PROVIDER_TOP_P", " ")]).unwrap();
    assert_eq!(settings.provider.temperature, None);
    assert_eq!(settings.provider.top_p, None);
}

#[test]
fn test_serialized_settings_hide_api_key() {
    let settings = settings_from(&[("OPENROUTER_API_KEY", "sk-secret")]).unwrap();
    let json = serde_json::to_string(&settings).unwrap();
    assert!(!json.contains("sk-secret"));
}
