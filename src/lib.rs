//! Supabase Logger Library
//!
//! Logs AI bot interactions to a Supabase table, managing short-lived access tokens

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{ConnectionOverrides, Settings};
pub use models::{Attachments, BotInteraction, LogEntry};
pub use services::{CredentialManager, CredentialState, SupabaseLogger};
pub use utils::error::{LoggerError, LoggerResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
