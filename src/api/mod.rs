//! Cursor API client
//!
//! Authenticates with the composite WorkOS session cookie derived from the
//! locally stored credentials.

mod events;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::credentials::CursorCredentials;

pub use events::UsageEvent;

const BASE_URL: &str = "https://cursor.com";
/// Environment variable overriding the API host (proxies, tests)
const BASE_URL_ENV: &str = "CURSOR_API_BASE_URL";
const SESSION_COOKIE: &str = "WorkosCursorSessionToken";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; cursor-usage/1.0)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the usage API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse API response: {0}")]
    Parse(String),
}

/// Cursor API client
pub struct CursorApi {
    client: reqwest::Client,
    base_url: String,
}

impl CursorApi {
    pub fn new() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Point the client at a different host, used by tests
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn summary_url(&self) -> String {
        format!("{}/api/usage-summary", self.base_url)
    }

    /// Fetch the account usage summary.
    ///
    /// One GET, fixed timeout, no retry. The body is returned verbatim as
    /// JSON; it is not validated against a schema.
    pub async fn fetch_usage_summary(
        &self,
        creds: &CursorCredentials,
    ) -> Result<Value, ApiError> {
        let url = self.summary_url();
        tracing::debug!("Fetching usage summary from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .header("Cookie", session_cookie(creds))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch granular usage events for a time window.
    ///
    /// The dashboard endpoint takes millisecond timestamps as strings and
    /// returns one page of events; entries with missing fields are tolerated.
    pub async fn fetch_usage_events(
        &self,
        creds: &CursorCredentials,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page_size: u32,
    ) -> Result<Vec<UsageEvent>, ApiError> {
        let url = format!(
            "{}/api/dashboard/get-filtered-usage-events",
            self.base_url
        );
        tracing::debug!("Fetching usage events from {}", url);

        let body = serde_json::json!({
            "teamId": 0,
            "startDate": start.timestamp_millis().to_string(),
            "endDate": end.timestamp_millis().to_string(),
            "page": 1,
            "pageSize": page_size,
        });

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .header("Origin", BASE_URL)
            .header("Cookie", session_cookie(creds))
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: events::EventsResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(events::into_events(parsed))
    }
}

impl Default for CursorApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Composite session token: `<user_id>::<access_token>`
pub fn session_token(creds: &CursorCredentials) -> String {
    format!("{}::{}", creds.user_id, creds.access_token)
}

fn session_cookie(creds: &CursorCredentials) -> String {
    format!("{}={}", SESSION_COOKIE, session_token(creds))
}
