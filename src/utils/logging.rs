//! Logging utilities
//!
//! Subscriber setup and helpers for keeping log output short

use crate::config::LoggingConfig;
use crate::models::LogEntry;
use tracing::info;

/// Set to true to include full message and response text in debug logs
/// Default is false to reduce log verbosity
pub const VERBOSE_ENTRY_LOGGING: bool = false;

/// Initialize logging system
///
/// A second call leaves the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .finish())
    } else {
        // Human readable format (development environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish())
    };

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        info!("Logging system initialized");
    }
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", kept, s.chars().count() - max_len)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of a log entry for debug output
pub fn create_entry_log_summary(entry: &LogEntry) -> serde_json::Value {
    if VERBOSE_ENTRY_LOGGING {
        serde_json::to_value(entry).unwrap_or(serde_json::json!({"error": "serialize failed"}))
    } else {
        serde_json::json!({
            "ai_bot_id": entry.ai_bot_id,
            "user_id": entry.user_id,
            "channel_id": entry.channel_id,
            "thread_id": entry.thread_id,
            "user_message": truncate_content(&entry.user_message, 200),
            "system_prompt": truncate_content(&entry.system_prompt, 100),
            "response_text": truncate_content(&entry.response_text, 200),
            "input_attachments": format!("[...{} keys]", entry.input_attachments.len()),
            "output_attachments": format!("[...{} keys]", entry.output_attachments.len()),
            "chat_history_length": entry.chat_history_length,
            "duration": entry.duration,
            "environment": entry.environment,
        })
    }
}
