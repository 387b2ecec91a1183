//! Unit tests for environment configuration

use pizza_reviews_api::config::{ConfigError, LogFormat, ServerConfig};
use serial_test::serial;
use std::collections::HashMap;
use std::time::Duration;

fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = load(&[]).unwrap();
    assert_eq!(config.port, 5001);
    assert_eq!(config.database_url, None);
    assert_eq!(config.max_connections, 50);
    assert_eq!(config.acquire_timeout, Duration::from_millis(2500));
    assert!(config.cors_allowed_origins.is_empty());
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_overrides() {
    let config = load(&[
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/pizza_reviews"),
        ("DB_MAX_CONNECTIONS", "10"),
        ("DB_ACQUIRE_TIMEOUT_MS", "500"),
        ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, https://pizza.example.com,"),
        ("LOG_FORMAT", "JSON"),
    ])
    .unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.database_url.as_deref(),
        Some("postgres://localhost/pizza_reviews")
    );
    assert_eq!(config.max_connections, 10);
    assert_eq!(config.acquire_timeout, Duration::from_millis(500));
    assert_eq!(
        config.cors_allowed_origins,
        vec!["http://localhost:5173", "https://pizza.example.com"]
    );
    assert_eq!(config.log_format, LogFormat::Json);
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = load(&[("PORT", "  "), ("DATABASE_URL", "")]).unwrap();
    assert_eq!(config.port, 5001);
    assert_eq!(config.database_url, None);
}

#[test]
fn test_invalid_port() {
    let err = load(&[("PORT", "eighty")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
}

#[test]
fn test_zero_pool_size_is_rejected() {
    let err = load(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "DB_MAX_CONNECTIONS",
            ..
        }
    ));
}

#[test]
fn test_unknown_log_format() {
    let err = load(&[("LOG_FORMAT", "xml")]).unwrap_err();
    assert!(err.to_string().contains("LOG_FORMAT"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    // SAFETY: serialized with other env-mutating tests
    unsafe {
        std::env::set_var("PORT", "6123");
        std::env::remove_var("DATABASE_URL");
    }
    let config = ServerConfig::from_env().unwrap();
    unsafe {
        std::env::remove_var("PORT");
    }

    assert_eq!(config.port, 6123);
    assert_eq!(config.database_url, None);
}
