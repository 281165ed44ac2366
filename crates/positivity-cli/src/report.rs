//! `report` and `show` command handlers.

use chrono::Utc;
use positivity_core::AppConfig;
use positivity_reporter::PgReportStore;
use positivity_twitch::TwitchClient;
use serde::Serialize;

use crate::db::connect;

/// Generate a report for `username` and print it as JSON.
///
/// With `save`, the report is stored first and the printed JSON includes the
/// storage metadata (`created_at`, `expires_at`).
///
/// # Errors
///
/// Returns an error if the username is invalid, the channel does not exist,
/// a Twitch request fails, or (with `save`) the database is unavailable.
pub(crate) async fn run_report(
    config: &AppConfig,
    username: &str,
    save: bool,
    compact: bool,
) -> anyhow::Result<()> {
    let client = TwitchClient::from_app_config(config)?;

    if save {
        let store = PgReportStore::new(connect(config).await?, config.report_ttl_hours);
        let stored = positivity_reporter::generate_and_save(&client, &store, username).await?;
        print_json(&stored, compact)
    } else {
        let report = positivity_reporter::generate_report(&client, username, Utc::now()).await?;
        print_json(&report, compact)
    }
}

/// Print the newest stored report for `username`, expired or not.
///
/// # Errors
///
/// Returns an error if the database is unavailable or no report was stored.
pub(crate) async fn run_show(config: &AppConfig, username: &str, compact: bool) -> anyhow::Result<()> {
    let store = PgReportStore::new(connect(config).await?, config.report_ttl_hours);
    let stored = positivity_reporter::show_latest(&store, username).await?;
    if stored.expires_at <= Utc::now() {
        tracing::warn!(
            username = %stored.username,
            expires_at = %stored.expires_at,
            "showing an expired report"
        );
    }
    print_json(&stored, compact)
}

pub(crate) fn render_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    println!("{}", render_json(value, compact)?);
    Ok(())
}
