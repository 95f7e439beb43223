//! `summary` command: fetch and pretty-print the account usage summary

use std::path::PathBuf;

use crate::api::CursorApi;
use crate::credentials;
use crate::redact;

pub async fn run(db_path: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let path = db_path.unwrap_or_else(credentials::state_db_path);
    let creds = credentials::extract(&path)?;

    if !json {
        println!("Found user ID: {}", creds.user_id);
        println!(
            "Found access token: {}",
            redact::preview(&creds.access_token)
        );
        if let Some(membership) = &creds.membership {
            println!("Membership: {}", membership);
        }
        println!();
    }
    if let Some(email) = &creds.email {
        tracing::debug!("Cached account email: {}", email);
    }

    let api = CursorApi::new();
    if !json {
        println!("Fetching usage from {} ...", api.summary_url());
    }

    let summary = api.fetch_usage_summary(&creds).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
