//! Aggregation of usage events into daily and monthly reports

mod table;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::UsageEvent;

pub use table::render_table;

/// Aggregated usage for one period (a UTC day or month)
#[derive(Debug, Clone, Serialize)]
pub struct PeriodStats {
    pub period: String,
    pub event_count: u64,
    pub total_tokens: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_cost: f64,
    /// Event count per model
    pub models: BTreeMap<String, u64>,
}

impl PeriodStats {
    fn empty(period: String) -> Self {
        Self {
            period,
            event_count: 0,
            total_tokens: 0,
            input_tokens: 0,
            output_tokens: 0,
            total_cost: 0.0,
            models: BTreeMap::new(),
        }
    }

    fn add(&mut self, event: &UsageEvent) {
        self.event_count += 1;
        self.total_tokens += event.total_tokens();
        self.input_tokens += event.input_tokens;
        self.output_tokens += event.output_tokens;
        self.total_cost += event.cost_dollars();
        *self.models.entry(event.model.clone()).or_insert(0) += 1;
    }

    /// `model(count)` list for table display
    pub fn model_list(&self) -> String {
        if self.models.is_empty() {
            return "N/A".to_string();
        }
        self.models
            .iter()
            .map(|(model, count)| format!("{}({})", model, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Bucket events by UTC day (`YYYY-MM-DD`), ascending
pub fn daily_stats(events: &[UsageEvent]) -> Vec<PeriodStats> {
    bucket(events, |ts| ts.format("%Y-%m-%d").to_string())
}

/// Bucket events by UTC month (`YYYY-MM`), ascending
pub fn monthly_stats(events: &[UsageEvent]) -> Vec<PeriodStats> {
    bucket(events, |ts| ts.format("%Y-%m").to_string())
}

fn bucket(
    events: &[UsageEvent],
    key_fn: impl Fn(DateTime<Utc>) -> String,
) -> Vec<PeriodStats> {
    let mut buckets: BTreeMap<String, PeriodStats> = BTreeMap::new();

    for event in events {
        // Events with an unusable timestamp are dropped from reports
        let Some(ts) = event.timestamp() else {
            continue;
        };
        let key = key_fn(ts);
        buckets
            .entry(key.clone())
            .or_insert_with(|| PeriodStats::empty(key))
            .add(event);
    }

    buckets.into_values().collect()
}

/// Overall totals across a set of period stats
pub fn totals(stats: &[PeriodStats]) -> (u64, u64, f64) {
    let events = stats.iter().map(|s| s.event_count).sum();
    let tokens = stats.iter().map(|s| s.total_tokens).sum();
    let cost = stats.iter().map(|s| s.total_cost).sum();
    (events, tokens, cost)
}

/// Aggregated usage for one model across the whole window
#[derive(Debug, Clone, Serialize)]
pub struct ModelStats {
    pub model: String,
    pub event_count: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
}

/// Per-model usage breakdown, heaviest token consumers first
pub fn model_breakdown(events: &[UsageEvent]) -> Vec<ModelStats> {
    let mut buckets: BTreeMap<String, ModelStats> = BTreeMap::new();

    for event in events {
        let entry = buckets
            .entry(event.model.clone())
            .or_insert_with(|| ModelStats {
                model: event.model.clone(),
                event_count: 0,
                total_tokens: 0,
                total_cost: 0.0,
            });
        entry.event_count += 1;
        entry.total_tokens += event.total_tokens();
        entry.total_cost += event.cost_dollars();
    }

    let mut stats: Vec<ModelStats> = buckets.into_values().collect();
    stats.sort_by(|a, b| b.total_tokens.cmp(&a.total_tokens));
    stats
}

/// Share of `part` in `total` as a percentage, 0 when the total is empty
pub fn percent(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}
