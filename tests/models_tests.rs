//! Data model unit tests

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use supabase_logger::models::*;

fn sample_interaction() -> BotInteraction {
    let request_time = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
    BotInteraction {
        user_id: "user123".to_string(),
        channel_id: "channel456".to_string(),
        thread_id: "thread789".to_string(),
        user_message: "Tell me a joke.".to_string(),
        response_text: "Why did the chicken cross the road?".to_string(),
        request_time,
        response_time: request_time + Duration::milliseconds(1500),
        bot_id: "bot002".to_string(),
        bot_name: "Joke Bot".to_string(),
        system_prompt: "You are a funny assistant that tells jokes.".to_string(),
        input_attachments: json!({"has_image": true, "files": ["a.png"]}).as_object().cloned(),
        chat_history_length: Some(3),
        output_attachments: None,
    }
}

#[test]
fn test_log_entry_serialization() {
    let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 2).unwrap();
    let entry = LogEntry::from_interaction(&sample_interaction(), Some("development"), created_at);
    let value = serde_json::to_value(&entry).unwrap();

    assert_eq!(value["created_at"], "2025-03-01T09:30:02Z");
    assert_eq!(value["request_timestamp"], "2025-03-01T09:30:00Z");
    assert_eq!(value["response_timestamp"], "2025-03-01T09:30:01.500Z");
    assert_eq!(value["ai_bot_id"], "bot002");
    assert_eq!(value["user_id"], "user123");
    assert_eq!(value["channel_id"], "channel456");
    assert_eq!(value["thread_id"], "thread789");
    assert_eq!(value["user_message"], "Tell me a joke.");
    assert_eq!(value["input_attachments"], json!({"has_image": true, "files": ["a.png"]}));
    assert_eq!(value["output_attachments"], json!({}));
    assert_eq!(value["chat_history_length"], 3);
    assert_eq!(value["duration"], 1.5);
    assert_eq!(value["environment"], "development");
    assert_eq!(value.as_object().unwrap().len(), 15);
}

#[test]
fn test_negative_duration_is_preserved() {
    let mut interaction = sample_interaction();
    interaction.response_time = interaction.request_time - Duration::milliseconds(250);

    let entry = LogEntry::from_interaction(&interaction, None, Utc::now());
    assert_eq!(entry.duration, -0.25);
}

#[test]
fn test_interaction_optionals_deserialize_as_absent() {
    let interaction: BotInteraction = serde_json::from_value(json!({
        "user_id": "u",
        "channel_id": "c",
        "thread_id": "t",
        "user_message": "hi",
        "response_text": "hello",
        "request_time": "2025-03-01T09:30:00Z",
        "response_time": "2025-03-01T09:30:00.100Z",
        "bot_id": "b",
        "bot_name": "Bot",
        "system_prompt": "p"
    }))
    .unwrap();

    assert!(interaction.input_attachments.is_none());
    assert!(interaction.chat_history_length.is_none());

    let entry = LogEntry::from_interaction(&interaction, None, Utc::now());
    assert!(entry.input_attachments.is_empty());
    assert_eq!(entry.chat_history_length, 0);
    assert!((entry.duration - 0.1).abs() < 1e-9);
}

#[test]
fn test_grant_type_query_values() {
    assert_eq!(GrantType::Password.as_str(), "password");
    assert_eq!(GrantType::RefreshToken.as_str(), "refresh_token");
}

#[test]
fn test_grant_bodies() {
    let password = serde_json::to_value(PasswordGrant {
        email: "test@example.com",
        password: "secret",
    })
    .unwrap();
    assert_eq!(password, json!({"email": "test@example.com", "password": "secret"}));

    let refresh = serde_json::to_value(RefreshGrant { refresh_token: "r-1" }).unwrap();
    assert_eq!(refresh, json!({"refresh_token": "r-1"}));
}
