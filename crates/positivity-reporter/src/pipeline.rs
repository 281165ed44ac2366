//! Fetcher → Transformer → Store.

use chrono::{DateTime, Utc};
use positivity_core::Report;
use positivity_db::ReportRow;
use serde::Serialize;

use crate::error::ReporterError;
use crate::store::{ChannelSource, ReportStore};

/// Twitch logins are at most 25 characters.
const MAX_USERNAME_LEN: usize = 25;

/// A report together with its storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredReport {
    pub username: String,
    pub report: Report,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// `true` when the report was read back instead of generated by this call.
    pub cached: bool,
}

impl StoredReport {
    fn from_row(row: ReportRow, report: Option<Report>) -> Result<Self, ReporterError> {
        let cached = report.is_none();
        let report = match report {
            Some(report) => report,
            None => serde_json::from_value(row.report_data)?,
        };
        Ok(Self {
            username: row.twitch_username,
            report,
            created_at: row.created_at,
            expires_at: row.expires_at,
            cached,
        })
    }
}

/// Trim and lower-case a Twitch login, rejecting anything that cannot be one.
///
/// # Errors
///
/// Returns [`ReporterError::InvalidUsername`] for empty input, input longer
/// than 25 characters, or characters outside `[A-Za-z0-9_]`.
pub fn normalize_username(raw: &str) -> Result<String, ReporterError> {
    let login = raw.trim();
    let valid = !login.is_empty()
        && login.len() <= MAX_USERNAME_LEN
        && login
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(ReporterError::InvalidUsername(raw.to_string()));
    }
    Ok(login.to_ascii_lowercase())
}

/// Fetch the channel behind `username` and transform it into a report.
///
/// Nothing is persisted.
///
/// # Errors
///
/// - [`ReporterError::InvalidUsername`] if `username` is not a valid login.
/// - [`ReporterError::NotFound`] if Twitch has no such channel.
/// - [`ReporterError::Source`] for any other fetch failure.
pub async fn generate_report<S: ChannelSource>(
    source: &S,
    username: &str,
    now: DateTime<Utc>,
) -> Result<Report, ReporterError> {
    let login = normalize_username(username)?;
    let bundle = source.fetch_bundle(&login).await?;
    Ok(Report::from_bundle(&bundle, now))
}

/// Generate a fresh report and store it.
///
/// # Errors
///
/// Everything [`generate_report`] returns, plus [`ReporterError::Serialize`]
/// and [`ReporterError::Store`] if the report cannot be saved.
pub async fn generate_and_save<S: ChannelSource, R: ReportStore>(
    source: &S,
    store: &R,
    username: &str,
) -> Result<StoredReport, ReporterError> {
    let login = normalize_username(username)?;
    let report = generate_report(source, &login, Utc::now()).await?;
    let report_data = serde_json::to_value(&report)?;
    let row = store.save(&login, report_data).await?;

    tracing::info!(
        username = %login,
        report_id = %row.id,
        expires_at = %row.expires_at,
        "saved positivity report"
    );

    StoredReport::from_row(row, Some(report))
}

/// Serve the newest unexpired report for `username`, generating and saving a
/// new one when none exists.
///
/// # Errors
///
/// Same as [`generate_and_save`]; a stored report that no longer
/// deserializes surfaces as [`ReporterError::Serialize`].
pub async fn load_or_generate<S: ChannelSource, R: ReportStore>(
    source: &S,
    store: &R,
    username: &str,
) -> Result<StoredReport, ReporterError> {
    let login = normalize_username(username)?;
    if let Some(row) = store.fresh(&login).await? {
        tracing::debug!(username = %login, report_id = %row.id, "serving stored report");
        return StoredReport::from_row(row, None);
    }
    generate_and_save(source, store, &login).await
}

/// Read back the newest stored report for `username`, expired or not.
///
/// # Errors
///
/// - [`ReporterError::InvalidUsername`] if `username` is not a valid login.
/// - [`ReporterError::NotFound`] if nothing was ever stored for it.
/// - [`ReporterError::Store`] or [`ReporterError::Serialize`] on read failure.
pub async fn show_latest<R: ReportStore>(
    store: &R,
    username: &str,
) -> Result<StoredReport, ReporterError> {
    let login = normalize_username(username)?;
    let row = store
        .latest(&login)
        .await?
        .ok_or_else(|| ReporterError::NotFound(login.clone()))?;
    StoredReport::from_row(row, None)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
