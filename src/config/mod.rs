//! Configuration management module
//!
//! Responsible for loading the Supabase connection settings from parameters and environment variables

pub mod settings;

pub use settings::{ConnectionOverrides, LoggingConfig, Settings, SupabaseConfig};
