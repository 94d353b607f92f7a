//! Configuration module unit tests

use serial_test::serial;
use std::env;
use supabase_logger::config::settings::{ConnectionOverrides, Settings, DEFAULT_TIMEOUT_SECS};
use supabase_logger::SupabaseLogger;

const VARS: [&str; 8] = [
    "SUPABASE_URL",
    "SUPABASE_API_KEY",
    "SUPABASE_AUTH_EMAIL",
    "SUPABASE_AUTH_PASSWORD",
    "ENVIRONMENT",
    "SUPABASE_REQUEST_TIMEOUT",
    "RUST_LOG",
    "LOG_FORMAT",
];

/// Setup test environment variables
fn setup_test_env() {
    env::set_var("SUPABASE_URL", "https://test-url.supabase.co/");
    env::set_var("SUPABASE_API_KEY", "test-api-key");
    env::set_var("SUPABASE_AUTH_EMAIL", "test@example.com");
    env::set_var("SUPABASE_AUTH_PASSWORD", "test-password");
    env::set_var("ENVIRONMENT", "test");
    env::set_var("RUST_LOG", "info");
    env::set_var("LOG_FORMAT", "text");
}

/// Clean up test environment variables
fn cleanup_test_env() {
    for var in &VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_settings_from_env() {
    cleanup_test_env();
    setup_test_env();

    let settings = Settings::new().unwrap();
    let supabase = &settings.supabase;
    assert_eq!(supabase.url.as_deref(), Some("https://test-url.supabase.co"));
    assert_eq!(supabase.api_key.as_deref(), Some("test-api-key"));
    assert_eq!(supabase.auth_email.as_deref(), Some("test@example.com"));
    assert_eq!(supabase.auth_password.as_deref(), Some("test-password"));
    assert_eq!(supabase.environment.as_deref(), Some("test"));
    assert_eq!(supabase.timeout, DEFAULT_TIMEOUT_SECS);
    assert!(supabase.is_complete());

    cleanup_test_env();
}

#[test]
#[serial]
fn test_overrides_take_precedence() {
    cleanup_test_env();
    setup_test_env();

    let settings = Settings::with_overrides(ConnectionOverrides {
        url: Some("https://override.supabase.co".to_string()),
        environment: Some("production".to_string()),
        // Empty values fall back to the environment
        api_key: Some(String::new()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(settings.supabase.url.as_deref(), Some("https://override.supabase.co"));
    assert_eq!(settings.supabase.environment.as_deref(), Some("production"));
    assert_eq!(settings.supabase.api_key.as_deref(), Some("test-api-key"));

    cleanup_test_env();
}

#[test]
#[serial]
fn test_missing_credentials_are_not_an_error() {
    cleanup_test_env();
    env::set_var("SUPABASE_URL", "https://test-url.supabase.co");

    let settings = Settings::new().unwrap();
    assert_eq!(
        settings.supabase.missing_fields(),
        vec!["API Key", "Auth Email", "Auth Password"]
    );

    cleanup_test_env();
}

#[test]
#[serial]
fn test_invalid_timeout() {
    cleanup_test_env();
    env::set_var("SUPABASE_REQUEST_TIMEOUT", "0");

    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("Timeout values cannot be 0"));

    env::set_var("SUPABASE_REQUEST_TIMEOUT", "soon");
    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("Invalid request timeout"));

    cleanup_test_env();
}

#[test]
#[serial]
fn test_invalid_url() {
    cleanup_test_env();
    env::set_var("SUPABASE_URL", "test-url.supabase.co");

    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("should start with 'http'"));

    cleanup_test_env();
}

#[test]
#[serial]
fn test_any_filter_directive_builds_logger() {
    cleanup_test_env();

    for directive in ["INFO", "Debug", "supabase_logger", "info,supabase_logger=debug"] {
        env::set_var("RUST_LOG", directive);
        let settings = Settings::new().unwrap();
        assert_eq!(settings.logging.level, directive);
        assert!(SupabaseLogger::from_env().is_ok(), "RUST_LOG={} rejected", directive);
    }

    cleanup_test_env();
}

#[test]
#[serial]
fn test_unknown_log_format_falls_back_to_text() {
    cleanup_test_env();
    env::set_var("LOG_FORMAT", "xml");

    let settings = Settings::new().unwrap();
    assert_eq!(settings.logging.format, "text");
    assert!(SupabaseLogger::from_env().is_ok());

    env::set_var("LOG_FORMAT", "json");
    assert_eq!(Settings::new().unwrap().logging.format, "json");

    cleanup_test_env();
}
