//! Service layer module
//!
//! Contains the credential manager, the log submitter and the shared instance slot

pub mod credentials;
pub mod global;
pub mod logger;

pub use credentials::{build_http_client, CredentialManager, CredentialState};
pub use global::{global, global_or_init, install_global, reset_global};
pub use logger::{SupabaseLogger, LOGS_TABLE_PATH};
