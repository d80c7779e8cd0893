//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the client.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Generate a new request id
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Format a test creation timestamp as `dd.mm.yyyy HH:MM` in the given zone
pub fn format_test_date_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(zone).format("%d.%m.%Y %H:%M").to_string()
}

/// Format a test creation timestamp in the device's local time zone
pub fn format_test_date(timestamp: &DateTime<Utc>) -> String {
    format_test_date_in(timestamp, &Local)
}

/// Pull the backend's `message` field out of a JSON body, if there is one
pub fn extract_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Best-effort message from a raw response body
pub fn extract_message_from_text(text: &str) -> Option<String> {
    serde_json::from_str::<Value>(text)
        .ok()
        .as_ref()
        .and_then(extract_message)
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
