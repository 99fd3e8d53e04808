//! Tests for TOML configuration loading.

use std::fs;
use tempfile::TempDir;

use millionaire::{AppConfig, ProviderSettings};

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = AppConfig::load(dir.path().join("absent.toml")).expect("Load failed");
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.provider().model(), "llama-3.3-70b-versatile");
    assert_eq!(config.provider().api_key_env(), "GROQ_API_KEY");
    assert_eq!(*config.server().port(), 3000);
    assert_eq!(
        config.server().session_idle_limit(),
        std::time::Duration::from_secs(1800)
    );
    assert_eq!(*config.server().max_sessions(), 10_000);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("millionaire.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8080

[provider]
model = "llama-3.1-8b-instant"
request_timeout_secs = 20
"#,
    )
    .expect("Failed to write TOML");

    let config = AppConfig::load(&path).expect("Load failed");
    assert_eq!(*config.server().port(), 8080);
    assert_eq!(config.server().host(), "127.0.0.1");
    assert_eq!(config.provider().model(), "llama-3.1-8b-instant");
    assert_eq!(
        config.provider().request_timeout(),
        Some(std::time::Duration::from_secs(20))
    );
    assert_eq!(
        config.provider().api_base(),
        "https://api.groq.com/openai/v1"
    );
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[server\nport = ").expect("Failed to write TOML");

    let err = AppConfig::load(&path).expect_err("Should fail to parse");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_blank_credential_counts_as_missing() {
    let settings = ProviderSettings::default().with_api_key_env("MILLIONAIRE_KEY");
    assert_eq!(settings.credential_from(|_| Some("   ".to_string())), None);
    assert_eq!(
        settings
            .credential_from(|_| Some(" gsk_test ".to_string()))
            .as_deref(),
        Some("gsk_test")
    );
}

#[test]
fn test_credential_reads_the_configured_variable() {
    let settings = ProviderSettings::default().with_api_key_env("MILLIONAIRE_KEY");
    let key = settings.credential_from(|variable| {
        (variable == "MILLIONAIRE_KEY").then(|| "gsk_live".to_string())
    });
    assert_eq!(key.as_deref(), Some("gsk_live"));

    let default_settings = ProviderSettings::default();
    let key = default_settings.credential_from(|variable| {
        (variable == "MILLIONAIRE_KEY").then(|| "gsk_live".to_string())
    });
    assert_eq!(key, None);
}

#[test]
fn test_unset_credential_is_missing() {
    let settings = ProviderSettings::default().with_api_key_env("MILLIONAIRE_TEST_UNSET_KEY");
    assert_eq!(settings.credential(), None);
}
