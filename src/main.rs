//! Supabase Logger demo
//!
//! Submits one sample bot interaction using credentials from the environment

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use supabase_logger::services::install_global;
use supabase_logger::utils::logging::init_logging;
use supabase_logger::{version_info, BotInteraction, Settings, SupabaseLogger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from .env / environment variables
    let settings = Settings::new().context("Failed to load logger settings")?;

    // Initialize logging
    init_logging(&settings.logging);
    info!("{}", version_info());

    let logger = Arc::new(SupabaseLogger::new(settings).context("Failed to create Supabase logger")?);
    install_global(Arc::clone(&logger));

    let response_time = Utc::now();
    let interaction = BotInteraction {
        user_id: "user123".to_string(),
        channel_id: "channel456".to_string(),
        thread_id: "thread789".to_string(),
        user_message: "What's the weather like today?".to_string(),
        response_text: "I'm sorry, I don't have access to real-time weather data.".to_string(),
        request_time: response_time - Duration::seconds(1),
        response_time,
        bot_id: "bot001".to_string(),
        bot_name: "AI Assistant".to_string(),
        system_prompt: "You are a helpful assistant.".to_string(),
        input_attachments: json!({"has_image": false}).as_object().cloned(),
        chat_history_length: Some(5),
        output_attachments: None,
    };

    // Failures are reported through tracing only
    logger.log_success(&interaction).await;

    info!("Logging example completed");
    Ok(())
}
