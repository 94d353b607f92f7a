//! Supabase auth (GoTrue) token endpoint models

use serde::{Deserialize, Serialize};

/// Lifetime assumed when the token response omits `expires_in`
pub const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Grant type requested from the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    Password,
    RefreshToken,
}

impl GrantType {
    /// Value of the `grant_type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::Password => "password",
            GrantType::RefreshToken => "refresh_token",
        }
    }
}

/// Body of a password grant request
#[derive(Debug, Clone, Serialize)]
pub struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of a refresh grant request
#[derive(Debug, Clone, Serialize)]
pub struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

/// Successful token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    /// Absolute expiry for a token issued at `now` (epoch seconds)
    pub fn expires_at(&self, now: i64) -> i64 {
        now + self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN)
    }
}
