//! `daily`, `monthly` and `today` report commands

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Duration, Months, NaiveTime, Utc};

use crate::api::{CursorApi, UsageEvent};
use crate::cli::{DailyArgs, MonthlyArgs, TodayArgs};
use crate::credentials;
use crate::report::{self, PeriodStats};

const EVENT_PAGE_SIZE: u32 = 100;

pub async fn run_daily(
    db_path: Option<PathBuf>,
    args: DailyArgs,
    json: bool,
) -> anyhow::Result<()> {
    let end = Utc::now();
    let start = daily_window_start(end, args.days)?;
    let events = fetch_events(db_path, start, end).await?;
    let stats = report::daily_stats(&events);
    print_report(
        &format!("Daily usage report (last {} days)", args.days),
        &stats,
        &events,
        args.breakdown,
        json,
    )
}

pub async fn run_monthly(
    db_path: Option<PathBuf>,
    args: MonthlyArgs,
    json: bool,
) -> anyhow::Result<()> {
    let end = Utc::now();
    let start = monthly_window_start(end, args.months)?;
    let events = fetch_events(db_path, start, end).await?;
    let stats = report::monthly_stats(&events);
    print_report(
        &format!("Monthly usage report (last {} months)", args.months),
        &stats,
        &events,
        args.breakdown,
        json,
    )
}

pub async fn run_today(
    db_path: Option<PathBuf>,
    args: TodayArgs,
    json: bool,
) -> anyhow::Result<()> {
    let end = Utc::now();
    let start = end.date_naive().and_time(NaiveTime::MIN).and_utc();
    let events = fetch_events(db_path, start, end).await?;
    let stats = report::daily_stats(&events);
    print_report(
        &format!("Usage for {}", end.format("%Y-%m-%d")),
        &stats,
        &events,
        args.breakdown,
        json,
    )
}

fn daily_window_start(end: DateTime<Utc>, days: u32) -> anyhow::Result<DateTime<Utc>> {
    end.checked_sub_signed(Duration::days(i64::from(days)))
        .context("days value out of range")
}

fn monthly_window_start(end: DateTime<Utc>, months: u32) -> anyhow::Result<DateTime<Utc>> {
    end.checked_sub_months(Months::new(months))
        .context("months value out of range")
}

async fn fetch_events(
    db_path: Option<PathBuf>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> anyhow::Result<Vec<UsageEvent>> {
    let path = db_path.unwrap_or_else(credentials::state_db_path);
    let creds = credentials::extract(&path)?;

    let api = CursorApi::new();
    let events = api
        .fetch_usage_events(&creds, start, end, EVENT_PAGE_SIZE)
        .await?;
    tracing::debug!("Fetched {} usage events", events.len());

    Ok(events)
}

fn print_report(
    title: &str,
    stats: &[PeriodStats],
    events: &[UsageEvent],
    breakdown: bool,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        if breakdown {
            let value = serde_json::json!({
                "periods": stats,
                "models": report::model_breakdown(events),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{}", serde_json::to_string_pretty(stats)?);
        }
        return Ok(());
    }

    if stats.is_empty() {
        println!("No usage events found for this period");
        return Ok(());
    }

    println!("{}", title);
    println!();

    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| {
            vec![
                s.period.clone(),
                s.event_count.to_string(),
                s.total_tokens.to_string(),
                s.input_tokens.to_string(),
                s.output_tokens.to_string(),
                format!("${:.2}", s.total_cost),
                s.model_list(),
            ]
        })
        .collect();

    println!(
        "{}",
        report::render_table(
            &[
                "Period", "Events", "Total Tokens", "Input", "Output", "Cost", "Models"
            ],
            &rows,
        )
    );

    let (event_count, tokens, cost) = report::totals(stats);
    println!();
    println!(
        "Total: {} events, {} tokens, ${:.2}",
        event_count, tokens, cost
    );

    if breakdown {
        println!();
        println!("Model breakdown");
        println!();
        println!("{}", render_breakdown(events, tokens, cost));
    }

    Ok(())
}

fn render_breakdown(events: &[UsageEvent], total_tokens: u64, total_cost: f64) -> String {
    let models = report::model_breakdown(events);
    let rows: Vec<Vec<String>> = models
        .iter()
        .map(|m| {
            vec![
                m.model.clone(),
                m.event_count.to_string(),
                m.total_tokens.to_string(),
                format!("${:.2}", m.total_cost),
                format!(
                    "{:.1}%",
                    report::percent(m.total_tokens as f64, total_tokens as f64)
                ),
                format!("{:.1}%", report::percent(m.total_cost, total_cost)),
            ]
        })
        .collect();

    report::render_table(
        &["Model", "Events", "Total Tokens", "Cost", "Token %", "Cost %"],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_window_start() {
        let end = Utc::now();
        let start = daily_window_start(end, 7).unwrap();
        assert_eq!(end - start, Duration::days(7));
    }

    #[test]
    fn test_monthly_window_start_out_of_range() {
        // clap accepts any u32; the window math must not panic on it
        let end = Utc::now();
        assert!(monthly_window_start(end, u32::MAX).is_err());
        assert!(monthly_window_start(end, 3).is_ok());
    }

    #[test]
    fn test_daily_window_start_out_of_range() {
        let end = Utc::now();
        assert!(daily_window_start(end, u32::MAX).is_err());
    }
}
