//! Database operations for the `analytics_reports` table.
//!
//! Usernames are stored lower-cased so lookups are case-insensitive, the way
//! Twitch treats logins.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `analytics_reports` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub twitch_username: String,
    pub report_data: Value,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ReportRow {
    /// Whether the row is still within its TTL at `now`.
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Store a generated report. The database assigns the id and `created_at`;
/// `expires_at` is `created_at` plus `ttl_hours`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including when `ttl_hours`
/// is not positive.
pub async fn insert_report(
    pool: &PgPool,
    username: &str,
    report_data: Value,
    ttl_hours: i32,
) -> Result<ReportRow, DbError> {
    let row = sqlx::query_as::<_, ReportRow>(
        "INSERT INTO analytics_reports (twitch_username, report_data, expires_at) \
         VALUES ($1, $2, NOW() + make_interval(hours => $3)) \
         RETURNING id, twitch_username, report_data, created_at, expires_at",
    )
    .bind(normalize_username(username))
    .bind(report_data)
    .bind(ttl_hours)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Return the newest report for `username`, expired or not.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_latest_report(
    pool: &PgPool,
    username: &str,
) -> Result<Option<ReportRow>, DbError> {
    let row = sqlx::query_as::<_, ReportRow>(
        "SELECT id, twitch_username, report_data, created_at, expires_at \
         FROM analytics_reports \
         WHERE twitch_username = $1 \
         ORDER BY created_at DESC, id DESC \
         LIMIT 1",
    )
    .bind(normalize_username(username))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Return the newest report for `username` that has not expired yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_fresh_report(
    pool: &PgPool,
    username: &str,
) -> Result<Option<ReportRow>, DbError> {
    let row = sqlx::query_as::<_, ReportRow>(
        "SELECT id, twitch_username, report_data, created_at, expires_at \
         FROM analytics_reports \
         WHERE twitch_username = $1 AND expires_at > NOW() \
         ORDER BY created_at DESC, id DESC \
         LIMIT 1",
    )
    .bind(normalize_username(username))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Delete every report whose `expires_at` has passed. Returns the number of
/// rows removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_expired_reports(pool: &PgPool) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM analytics_reports WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
