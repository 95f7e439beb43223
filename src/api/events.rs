//! Wire types for the dashboard usage-events endpoint

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EventsResponse {
    #[serde(default)]
    usage_events_display: Vec<RawEvent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    // The API sends timestamps as millisecond strings; tolerate numbers too
    #[serde(default)]
    timestamp: Option<serde_json::Value>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    max_mode: Option<bool>,
    #[serde(default)]
    token_usage: Option<RawTokenUsage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTokenUsage {
    #[serde(default)]
    input_tokens: Option<u64>,
    #[serde(default)]
    output_tokens: Option<u64>,
    #[serde(default)]
    cache_write_tokens: Option<u64>,
    #[serde(default)]
    cache_read_tokens: Option<u64>,
    #[serde(default)]
    total_cents: Option<f64>,
}

/// A single billed usage event
#[derive(Debug, Clone)]
pub struct UsageEvent {
    pub timestamp_ms: i64,
    pub model: String,
    #[allow(dead_code)]
    pub kind: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_write_tokens: u64,
    pub cache_read_tokens: u64,
    pub total_cents: f64,
    #[allow(dead_code)]
    pub max_mode: bool,
}

impl UsageEvent {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens + self.cache_write_tokens + self.cache_read_tokens
    }

    pub fn cost_dollars(&self) -> f64 {
        self.total_cents / 100.0
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_ms).single()
    }
}

pub(super) fn into_events(response: EventsResponse) -> Vec<UsageEvent> {
    response
        .usage_events_display
        .into_iter()
        .map(|raw| {
            let usage = raw.token_usage.unwrap_or_default();
            UsageEvent {
                timestamp_ms: raw.timestamp.as_ref().and_then(coerce_millis).unwrap_or(0),
                model: raw.model.unwrap_or_else(|| "unknown".to_string()),
                kind: raw.kind.unwrap_or_else(|| "unknown".to_string()),
                input_tokens: usage.input_tokens.unwrap_or(0),
                output_tokens: usage.output_tokens.unwrap_or(0),
                cache_write_tokens: usage.cache_write_tokens.unwrap_or(0),
                cache_read_tokens: usage.cache_read_tokens.unwrap_or(0),
                total_cents: usage.total_cents.unwrap_or(0.0),
                max_mode: raw.max_mode.unwrap_or(false),
            }
        })
        .collect()
}

fn coerce_millis(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events_full() {
        let body = serde_json::json!({
            "usageEventsDisplay": [
                {
                    "timestamp": "1735689600000",
                    "model": "claude-4-sonnet",
                    "kind": "composer",
                    "maxMode": true,
                    "tokenUsage": {
                        "inputTokens": 1000,
                        "outputTokens": 250,
                        "cacheWriteTokens": 50,
                        "cacheReadTokens": 700,
                        "totalCents": 35.0
                    }
                }
            ],
            "totalUsageEventsCount": 1
        });

        let response: EventsResponse = serde_json::from_value(body).unwrap();
        let events = into_events(response);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.model, "claude-4-sonnet");
        assert_eq!(event.total_tokens(), 2000);
        assert!((event.cost_dollars() - 0.35).abs() < f64::EPSILON);
        assert!(event.max_mode);
        assert_eq!(
            event.timestamp().unwrap().format("%Y-%m-%d").to_string(),
            "2025-01-01"
        );
    }

    #[test]
    fn test_parse_events_partial() {
        let body = serde_json::json!({
            "usageEventsDisplay": [
                { "timestamp": 1735689600000i64 },
                {}
            ]
        });

        let response: EventsResponse = serde_json::from_value(body).unwrap();
        let events = into_events(response);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp_ms, 1735689600000);
        assert_eq!(events[0].model, "unknown");
        assert_eq!(events[1].total_tokens(), 0);
    }

    #[test]
    fn test_parse_events_empty_response() {
        let response: EventsResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(into_events(response).is_empty());
    }
}
