//! Data models module
//!
//! Defines the log record and the auth endpoint request/response structures

pub mod auth;
pub mod log_entry;

pub use auth::{GrantType, PasswordGrant, RefreshGrant, TokenResponse, DEFAULT_EXPIRES_IN};
pub use log_entry::{Attachments, BotInteraction, LogEntry};
