//! Bot interaction log record
//!
//! Mirrors the columns of the `ai_bot_logs` table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open key-value attachment payload
pub type Attachments = Map<String, Value>;

/// One bot interaction as reported by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotInteraction {
    /// ID of the user who sent the message
    pub user_id: String,
    /// ID of the channel where the message was sent
    pub channel_id: String,
    /// ID of the thread the message belongs to
    pub thread_id: String,
    /// Original message from the user
    pub user_message: String,
    /// Bot's response text
    pub response_text: String,
    /// When the request was received
    pub request_time: DateTime<Utc>,
    /// When the response was sent
    pub response_time: DateTime<Utc>,
    /// Bot's unique identifier
    pub bot_id: String,
    /// Display name of the bot (not persisted)
    pub bot_name: String,
    /// System prompt used for the response
    pub system_prompt: String,
    #[serde(default)]
    pub input_attachments: Option<Attachments>,
    #[serde(default)]
    pub chat_history_length: Option<u64>,
    #[serde(default)]
    pub output_attachments: Option<Attachments>,
}

/// Record inserted into `ai_bot_logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub created_at: DateTime<Utc>,
    pub request_timestamp: DateTime<Utc>,
    pub response_timestamp: DateTime<Utc>,
    pub ai_bot_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub thread_id: String,
    pub user_message: String,
    pub input_attachments: Attachments,
    pub system_prompt: String,
    pub chat_history_length: u64,
    pub response_text: String,
    /// Response time minus request time, in seconds
    pub duration: f64,
    pub output_attachments: Attachments,
    pub environment: Option<String>,
}

impl LogEntry {
    /// Assemble a record from a caller interaction
    pub fn from_interaction(
        interaction: &BotInteraction,
        environment: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            created_at,
            request_timestamp: interaction.request_time,
            response_timestamp: interaction.response_time,
            ai_bot_id: interaction.bot_id.clone(),
            user_id: interaction.user_id.clone(),
            channel_id: interaction.channel_id.clone(),
            thread_id: interaction.thread_id.clone(),
            user_message: interaction.user_message.clone(),
            input_attachments: interaction.input_attachments.clone().unwrap_or_default(),
            system_prompt: interaction.system_prompt.clone(),
            chat_history_length: interaction.chat_history_length.unwrap_or(0),
            response_text: interaction.response_text.clone(),
            duration: duration_secs(interaction.request_time, interaction.response_time),
            output_attachments: interaction.output_attachments.clone().unwrap_or_default(),
            environment: environment.map(str::to_string),
        }
    }
}

/// Fractional seconds between two instants, negative if `end` precedes `start`
pub fn duration_secs(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        // Overflows only past ~292k years
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}
