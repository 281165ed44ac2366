//! The two I/O seams of the pipeline and their production implementations.

use std::future::Future;

use positivity_core::ChannelBundle;
use positivity_db::{DbError, ReportRow};
use positivity_twitch::{TwitchClient, TwitchError};
use serde_json::Value;
use sqlx::PgPool;

/// Anything that can produce the raw channel records for a username.
pub trait ChannelSource: Send + Sync {
    fn fetch_bundle(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<ChannelBundle, TwitchError>> + Send;
}

/// Persistence for generated reports.
///
/// Implementations own the report TTL; callers only hand over the JSON.
pub trait ReportStore: Send + Sync {
    fn save(
        &self,
        username: &str,
        report_data: Value,
    ) -> impl Future<Output = Result<ReportRow, DbError>> + Send;

    /// Newest report for `username`, expired or not.
    fn latest(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<ReportRow>, DbError>> + Send;

    /// Newest report for `username` that has not expired.
    fn fresh(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<ReportRow>, DbError>> + Send;

    fn delete_expired(&self) -> impl Future<Output = Result<u64, DbError>> + Send;

    fn health(&self) -> impl Future<Output = Result<(), DbError>> + Send;
}

impl ChannelSource for TwitchClient {
    fn fetch_bundle(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<ChannelBundle, TwitchError>> + Send {
        self.fetch_channel_bundle(username)
    }
}

/// [`ReportStore`] backed by the `analytics_reports` table.
#[derive(Debug, Clone)]
pub struct PgReportStore {
    pool: PgPool,
    ttl_hours: i32,
}

impl PgReportStore {
    #[must_use]
    pub fn new(pool: PgPool, ttl_hours: i32) -> Self {
        Self { pool, ttl_hours }
    }
}

impl ReportStore for PgReportStore {
    fn save(
        &self,
        username: &str,
        report_data: Value,
    ) -> impl Future<Output = Result<ReportRow, DbError>> + Send {
        positivity_db::insert_report(&self.pool, username, report_data, self.ttl_hours)
    }

    fn latest(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<ReportRow>, DbError>> + Send {
        positivity_db::get_latest_report(&self.pool, username)
    }

    fn fresh(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<ReportRow>, DbError>> + Send {
        positivity_db::get_fresh_report(&self.pool, username)
    }

    fn delete_expired(&self) -> impl Future<Output = Result<u64, DbError>> + Send {
        positivity_db::delete_expired_reports(&self.pool)
    }

    fn health(&self) -> impl Future<Output = Result<(), DbError>> + Send {
        positivity_db::health_check(&self.pool)
    }
}
