//! Error handling module
//!
//! Defines error types and handling logic used in the project

use thiserror::Error;

/// Logger error types
#[derive(Error, Debug)]
pub enum LoggerError {
    /// One or more required connection values are absent
    #[error("Supabase configuration incomplete. Missing: {}", .0.join(", "))]
    ConfigurationIncomplete(Vec<String>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Password grant failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Refresh grant failed
    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    /// Insert call failed at the transport level or with a non-2xx status
    #[error("Log submission failed: {0}")]
    Submission(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl LoggerError {
    /// Get error kind string
    pub fn kind(&self) -> &'static str {
        match self {
            LoggerError::ConfigurationIncomplete(_) => "configuration_incomplete",
            LoggerError::Config(_) => "configuration_error",
            LoggerError::Authentication(_) => "authentication_error",
            LoggerError::TokenRefresh(_) => "token_refresh_error",
            LoggerError::Submission(_) => "submission_error",
            LoggerError::HttpClient(_) => "http_client_error",
        }
    }

    /// Whether detailed error information should be logged
    ///
    /// Auth failures carry backend response bodies; those stay at debug level.
    pub fn should_log_details(&self) -> bool {
        !matches!(
            self,
            LoggerError::Authentication(_) | LoggerError::TokenRefresh(_)
        )
    }

    /// Whether forcing a fresh token could make the failed call succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LoggerError::ConfigurationIncomplete(_))
    }
}

/// Result type alias
pub type LoggerResult<T> = Result<T, LoggerError>;

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add authentication error context
    fn auth_context(self, message: &str) -> LoggerResult<T>;

    /// Add token refresh error context
    fn refresh_context(self, message: &str) -> LoggerResult<T>;

    /// Add submission error context
    fn submission_context(self, message: &str) -> LoggerResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn auth_context(self, message: &str) -> LoggerResult<T> {
        self.map_err(|e| LoggerError::Authentication(format!("{}: {}", message, e)))
    }

    fn refresh_context(self, message: &str) -> LoggerResult<T> {
        self.map_err(|e| LoggerError::TokenRefresh(format!("{}: {}", message, e)))
    }

    fn submission_context(self, message: &str) -> LoggerResult<T> {
        self.map_err(|e| LoggerError::Submission(format!("{}: {}", message, e)))
    }
}
