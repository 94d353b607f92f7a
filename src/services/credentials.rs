//! Credential manager
//!
//! Owns the Supabase access token, refresh token and expiry, and hands out a
//! bearer token that is valid at the instant it is returned. Authentication,
//! refresh and the fallback from one to the other all happen under a single
//! async mutex, so concurrent callers that observe an expired token share one
//! backend round-trip instead of racing each other.

use crate::config::SupabaseConfig;
use crate::models::auth::{GrantType, PasswordGrant, RefreshGrant, TokenResponse};
use crate::utils::error::{ErrorContext, LoggerError, LoggerResult};
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Build the HTTP client shared by every backend call
pub fn build_http_client(timeout_secs: u64) -> LoggerResult<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("supabase-logger/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Current time in seconds since the epoch
pub(crate) fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Cached credential state
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Seconds since the epoch after which `access_token` must not be used
    pub expires_at: Option<i64>,
}

impl CredentialState {
    /// Whether the cached access token has passed its expiry at `now`
    pub fn is_expired(&self, now: i64) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }

    /// Replace all three fields from one token response, returning the new access token
    fn apply(&mut self, response: TokenResponse, now: i64) -> String {
        let expires_at = response.expires_at(now);
        let token = response.access_token;
        *self = Self {
            access_token: Some(token.clone()),
            refresh_token: Some(response.refresh_token),
            expires_at: Some(expires_at),
        };
        token
    }
}

impl fmt::Debug for CredentialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialState")
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Borrowed view of a complete connection configuration
struct Connection<'a> {
    url: &'a str,
    api_key: &'a str,
    auth_email: &'a str,
    auth_password: &'a str,
}

/// Supabase credential manager
pub struct CredentialManager {
    client: Client,
    config: SupabaseConfig,
    state: Mutex<CredentialState>,
}

impl CredentialManager {
    /// Create a manager with its own HTTP client
    pub fn new(config: SupabaseConfig) -> LoggerResult<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a manager that shares an existing HTTP client
    pub fn with_client(config: SupabaseConfig, client: Client) -> Self {
        Self {
            client,
            config,
            state: Mutex::new(CredentialState::default()),
        }
    }

    /// Get a currently valid access token, authenticating or refreshing as needed
    pub async fn get_valid_token(&self) -> LoggerResult<String> {
        let mut state = self.state.lock().await;

        let Some(token) = state.access_token.clone() else {
            return self.authenticate_locked(&mut state).await;
        };

        if !state.is_expired(now_epoch()) {
            return Ok(token);
        }

        if let Some(refresh_token) = state.refresh_token.clone() {
            match self.refresh_locked(&mut state, &refresh_token).await {
                Ok(token) => return Ok(token),
                Err(e) => warn!("Token refresh failed, falling back to full auth: {}", e),
            }
        }

        self.authenticate_locked(&mut state).await
    }

    /// Authenticate with email/password and cache the result
    pub async fn authenticate(&self) -> LoggerResult<String> {
        let mut state = self.state.lock().await;
        self.authenticate_locked(&mut state).await
    }

    /// Exchange the cached refresh token for a new access token
    pub async fn refresh(&self) -> LoggerResult<String> {
        let mut state = self.state.lock().await;
        let refresh_token = state
            .refresh_token
            .clone()
            .ok_or_else(|| LoggerError::TokenRefresh("No refresh token cached".to_string()))?;
        self.refresh_locked(&mut state, &refresh_token).await
    }

    /// Drop the cached access token so the next request re-authenticates
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.access_token = None;
        debug!("Cached access token invalidated");
    }

    /// Copy of the current credential state
    pub async fn snapshot(&self) -> CredentialState {
        self.state.lock().await.clone()
    }

    /// Connection configuration this manager authenticates against
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// Project base URL and API key, if configured
    pub(crate) fn endpoint(&self) -> LoggerResult<(&str, &str)> {
        let conn = self.connection()?;
        Ok((conn.url, conn.api_key))
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, seeded: CredentialState) {
        *self.state.lock().await = seeded;
    }

    async fn authenticate_locked(&self, state: &mut CredentialState) -> LoggerResult<String> {
        let conn = self.connection()?;
        let body = PasswordGrant {
            email: conn.auth_email,
            password: conn.auth_password,
        };

        let response = self.request_token(GrantType::Password, &body).await?;
        let token = state.apply(response, now_epoch());
        info!("Successfully authenticated with Supabase");
        Ok(token)
    }

    async fn refresh_locked(
        &self,
        state: &mut CredentialState,
        refresh_token: &str,
    ) -> LoggerResult<String> {
        let body = RefreshGrant { refresh_token };

        let response = self.request_token(GrantType::RefreshToken, &body).await?;
        let token = state.apply(response, now_epoch());
        info!("Successfully refreshed Supabase token");
        Ok(token)
    }

    /// Call the token endpoint; never touches the cached state
    async fn request_token<B: Serialize + ?Sized>(
        &self,
        grant: GrantType,
        body: &B,
    ) -> LoggerResult<TokenResponse> {
        let conn = self.connection()?;
        let url = format!("{}/auth/v1/token?grant_type={}", conn.url, grant.as_str());

        debug!("Requesting Supabase token with grant_type={}", grant.as_str());

        let sent = self
            .client
            .post(&url)
            .header("apikey", conn.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await;
        let response = classify(grant, sent, "Failed to send token request")?;

        let status = response.status();
        let text = classify(grant, response.text().await, "Failed to read token response")?;

        if !status.is_success() {
            error!("Supabase {} grant failed with status {}", grant.as_str(), status);
            debug!("Token response body: {}", text);
            let message = format!("{} - {}", status, text);
            return Err(match grant {
                GrantType::Password => LoggerError::Authentication(message),
                GrantType::RefreshToken => LoggerError::TokenRefresh(message),
            });
        }

        classify(
            grant,
            serde_json::from_str::<TokenResponse>(&text),
            "Invalid token response",
        )
    }

    fn connection(&self) -> LoggerResult<Connection<'_>> {
        match (
            self.config.url.as_deref(),
            self.config.api_key.as_deref(),
            self.config.auth_email.as_deref(),
            self.config.auth_password.as_deref(),
        ) {
            (Some(url), Some(api_key), Some(auth_email), Some(auth_password)) => Ok(Connection {
                url,
                api_key,
                auth_email,
                auth_password,
            }),
            _ => Err(LoggerError::ConfigurationIncomplete(
                self.config
                    .missing_fields()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            )),
        }
    }
}

impl fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Attribute a failure to the grant that produced it
fn classify<T, E>(grant: GrantType, result: Result<T, E>, message: &str) -> LoggerResult<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match grant {
        GrantType::Password => result.auth_context(message),
        GrantType::RefreshToken => result.refresh_context(message),
    }
}
