//! Bot interaction logger
//!
//! Sends one record per bot response to the `ai_bot_logs` table. A failed
//! insert is retried exactly once with a freshly authenticated token; any
//! failure after that is logged locally and never reaches the caller.

use crate::config::{ConnectionOverrides, Settings};
use crate::models::{BotInteraction, LogEntry};
use crate::services::credentials::{build_http_client, CredentialManager};
use crate::utils::error::{ErrorContext, LoggerError, LoggerResult};
use crate::utils::logging::create_entry_log_summary;
use chrono::Utc;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Insert endpoint for bot interaction records
pub const LOGS_TABLE_PATH: &str = "/rest/v1/ai_bot_logs";

/// Supabase logger
///
/// Connection values, the enabled state and the insert target all come from
/// the credential manager's configuration.
#[derive(Debug)]
pub struct SupabaseLogger {
    client: Client,
    credentials: Arc<CredentialManager>,
    enabled: AtomicBool,
}

/// Terminal failure of one submission
#[derive(Debug)]
struct SubmitFailure {
    error: LoggerError,
    /// Whether the token was invalidated and the insert attempted a second time
    retried: bool,
}

impl SubmitFailure {
    fn report(&self) {
        let context = if self.retried {
            "Failed to log to Supabase after token refresh"
        } else {
            "Failed to log to Supabase"
        };

        if self.error.should_log_details() {
            error!("{}: {}", context, self.error);
        } else {
            error!("{}: {}", context, self.error.kind());
            debug!("Failure detail: {}", self.error);
        }
    }
}

impl SupabaseLogger {
    /// Create a logger with its own credential cache
    pub fn new(settings: Settings) -> LoggerResult<Self> {
        let client = build_http_client(settings.supabase.timeout)?;
        let credentials = Arc::new(CredentialManager::with_client(settings.supabase, client.clone()));
        Ok(Self::build(client, credentials))
    }

    /// Create a logger configured from environment variables
    pub fn from_env() -> LoggerResult<Self> {
        Self::new(Settings::new()?)
    }

    /// Create a logger from explicit values, falling back to environment variables
    pub fn from_overrides(overrides: ConnectionOverrides) -> LoggerResult<Self> {
        Self::new(Settings::with_overrides(overrides)?)
    }

    /// Create a logger that shares an existing credential cache and its configuration
    pub fn with_credentials(credentials: Arc<CredentialManager>) -> LoggerResult<Self> {
        let client = build_http_client(credentials.config().timeout)?;
        Ok(Self::build(client, credentials))
    }

    fn build(client: Client, credentials: Arc<CredentialManager>) -> Self {
        let config = credentials.config();
        let missing = config.missing_fields();
        if missing.is_empty() {
            info!("Supabase configuration loaded successfully");
        } else if config.url.is_none() {
            info!("Supabase is disabled (URL not set)");
        } else {
            warn!("Supabase configuration incomplete. Missing: {}", missing.join(", "));
            warn!("Logging will be disabled");
        }

        Self {
            client,
            enabled: AtomicBool::new(missing.is_empty()),
            credentials,
        }
    }

    /// Whether this instance will submit records
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable submission on this instance
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Shared credential manager
    pub fn credentials(&self) -> &Arc<CredentialManager> {
        &self.credentials
    }

    /// Assemble the record for an interaction, stamped with the current time
    pub fn build_entry(&self, interaction: &BotInteraction) -> LogEntry {
        let environment = self.credentials.config().environment.as_deref();
        LogEntry::from_interaction(interaction, environment, Utc::now())
    }

    /// Log a successful bot response; never fails
    pub async fn log_success(&self, interaction: &BotInteraction) {
        if let Some(entry) = self.prepare(interaction) {
            if let Err(failure) = self.submit(&entry).await {
                failure.report();
            }
        }
    }

    /// Log a successful bot response, reporting the terminal failure if any
    ///
    /// An unconfigured or disabled logger returns `Ok(())` without any network activity.
    pub async fn try_log(&self, interaction: &BotInteraction) -> LoggerResult<()> {
        match self.prepare(interaction) {
            Some(entry) => self.submit(&entry).await.map_err(|failure| failure.error),
            None => Ok(()),
        }
    }

    /// Build the record, or `None` when this instance must stay off the network
    fn prepare(&self, interaction: &BotInteraction) -> Option<LogEntry> {
        let entry = self.build_entry(interaction);
        debug!("Supabase log entry: {}", create_entry_log_summary(&entry));

        if self.credentials.config().url.is_none() {
            info!("Supabase logging is disabled (SUPABASE_URL not set)");
            return None;
        }

        if !self.is_enabled() {
            info!("Supabase logging is disabled for this instance");
            return None;
        }

        Some(entry)
    }

    async fn submit(&self, entry: &LogEntry) -> Result<(), SubmitFailure> {
        match self.insert_log(entry).await {
            Ok(()) => Ok(()),
            Err(error) if !error.is_retryable() => Err(SubmitFailure {
                error,
                retried: false,
            }),
            Err(e) => {
                info!("Log insert failed ({}), attempting to get new token", e.kind());
                self.credentials.invalidate().await;
                self.insert_log(entry).await.map_err(|error| {
                    debug!("Failed log entry: {}", create_entry_log_summary(entry));
                    SubmitFailure {
                        error,
                        retried: true,
                    }
                })
            }
        }
    }

    async fn insert_log(&self, entry: &LogEntry) -> LoggerResult<()> {
        let token = self.credentials.get_valid_token().await?;
        let (base_url, api_key) = self.credentials.endpoint()?;
        let url = format!("{}{}", base_url, LOGS_TABLE_PATH);

        debug!("Sending log to Supabase URL: {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", api_key)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(entry)
            .send()
            .await
            .submission_context("Failed to send log entry")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        debug!("Supabase response status: {}", status);
        debug!("Supabase response body: {}", body);

        if !status.is_success() {
            return Err(LoggerError::Submission(format!("{} - {}", status, body)));
        }

        info!("Successfully logged bot response to Supabase");
        Ok(())
    }
}
