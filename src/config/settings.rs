//! Application configuration settings
//!
//! Defines the Supabase connection settings and their environment fallbacks

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Default timeout applied to every backend call, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const VALID_LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Supabase connection configuration
    pub supabase: SupabaseConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Supabase connection configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL
    pub url: Option<String>,
    /// Project API key, sent as the `apikey` header
    pub api_key: Option<String>,
    /// Email of the service account used for password grants
    pub auth_email: Option<String>,
    /// Password of the service account
    pub auth_password: Option<String>,
    /// Environment label stored with every record
    pub environment: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Explicit connection values that take precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub auth_email: Option<String>,
    pub auth_password: Option<String>,
    pub environment: Option<String>,
}

impl Settings {
    /// Create a configuration from environment variables only
    pub fn new() -> Result<Self> {
        Self::with_overrides(ConnectionOverrides::default())
    }

    /// Create a configuration, falling back to environment variables for omitted values
    pub fn with_overrides(overrides: ConnectionOverrides) -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            supabase: SupabaseConfig {
                url: non_empty(overrides.url)
                    .or_else(|| get_env_opt("SUPABASE_URL"))
                    .map(|u| u.trim_end_matches('/').to_string()),
                api_key: non_empty(overrides.api_key).or_else(|| get_env_opt("SUPABASE_API_KEY")),
                auth_email: non_empty(overrides.auth_email)
                    .or_else(|| get_env_opt("SUPABASE_AUTH_EMAIL")),
                auth_password: non_empty(overrides.auth_password)
                    .or_else(|| get_env_opt("SUPABASE_AUTH_PASSWORD")),
                environment: non_empty(overrides.environment).or_else(|| get_env_opt("ENVIRONMENT")),
                timeout: get_env_or_default("SUPABASE_REQUEST_TIMEOUT", &DEFAULT_TIMEOUT_SECS.to_string())
                    .parse()
                    .context("Invalid request timeout")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: log_format_or_text(get_env_or_default("LOG_FORMAT", "text")),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    ///
    /// Missing credentials are not an error here: they only disable logging.
    pub fn validate(&self) -> Result<()> {
        if self.supabase.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if let Some(url) = &self.supabase.url {
            if !url.starts_with("http") {
                anyhow::bail!("Invalid Supabase URL format, should start with 'http'");
            }
        }

        // RUST_LOG is left to the env filter, which accepts any directive syntax
        Ok(())
    }
}

impl SupabaseConfig {
    /// Names of the required connection values that are absent
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.is_none() {
            missing.push("URL");
        }
        if self.api_key.is_none() {
            missing.push("API Key");
        }
        if self.auth_email.is_none() {
            missing.push("Auth Email");
        }
        if self.auth_password.is_none() {
            missing.push("Auth Password");
        }
        missing
    }

    /// Whether every required connection value is present
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("api_key", &redact(&self.api_key))
            .field("auth_email", &self.auth_email)
            .field("auth_password", &redact(&self.auth_password))
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Keep a known log format, otherwise fall back to text
fn log_format_or_text(format: String) -> String {
    if VALID_LOG_FORMATS.contains(&format.as_str()) {
        format
    } else {
        warn!("Unknown log format '{}', using text", format);
        "text".to_string()
    }
}

/// Get a non-empty environment variable
fn get_env_opt(key: &str) -> Option<String> {
    non_empty(std::env::var(key).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
