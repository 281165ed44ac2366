//! In-memory [`ChannelSource`] and [`ReportStore`] fakes.
//!
//! Compiled for this crate's tests and, behind the `test-support` feature, for
//! downstream crates that drive the pipeline without Twitch or Postgres.

use std::future::{ready, Future};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Duration, Utc};
use positivity_core::ChannelBundle;
use positivity_db::{DbError, ReportRow};
use positivity_twitch::TwitchError;
use serde_json::Value;
use uuid::Uuid;

use crate::store::{ChannelSource, ReportStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Serves one canned bundle for every login and records what was asked for.
///
/// With no bundle every fetch is `ChannelNotFound`.
#[derive(Debug, Default)]
pub struct FakeSource {
    bundle: Option<ChannelBundle>,
    fail: bool,
    requested: Mutex<Vec<String>>,
}

impl FakeSource {
    #[must_use]
    pub fn with_bundle(bundle: ChannelBundle) -> Self {
        Self {
            bundle: Some(bundle),
            ..Self::default()
        }
    }

    /// Every fetch fails with a token error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Logins passed to `fetch_bundle`, in call order.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        lock(&self.requested).clone()
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        lock(&self.requested).len()
    }
}

impl ChannelSource for FakeSource {
    fn fetch_bundle(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<ChannelBundle, TwitchError>> + Send {
        lock(&self.requested).push(username.to_string());
        let result = if self.fail {
            Err(TwitchError::Auth("token endpoint unavailable".to_string()))
        } else {
            self.bundle
                .clone()
                .ok_or_else(|| TwitchError::ChannelNotFound(username.to_string()))
        };
        ready(result)
    }
}

/// Keeps report rows in a `Vec` with a fixed 24 hour TTL.
#[derive(Debug, Default)]
pub struct FakeStore {
    rows: Mutex<Vec<ReportRow>>,
    down: bool,
}

impl FakeStore {
    /// A store whose health check fails.
    #[must_use]
    pub fn unhealthy() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    /// Adds a row that expired a day ago.
    pub fn insert_expired(&self, username: &str, report_data: Value) {
        let created_at = Utc::now() - Duration::hours(48);
        lock(&self.rows).push(ReportRow {
            id: Uuid::new_v4(),
            twitch_username: username.to_string(),
            report_data,
            created_at,
            expires_at: created_at + Duration::hours(24),
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Newest row for `username`, optionally skipping expired ones.
    #[must_use]
    pub fn newest(&self, username: &str, fresh_only: bool) -> Option<ReportRow> {
        let now = Utc::now();
        lock(&self.rows)
            .iter()
            .filter(|row| row.twitch_username == username)
            .filter(|row| !fresh_only || row.is_fresh_at(now))
            .max_by_key(|row| row.created_at)
            .cloned()
    }
}

impl ReportStore for FakeStore {
    fn save(
        &self,
        username: &str,
        report_data: Value,
    ) -> impl Future<Output = Result<ReportRow, DbError>> + Send {
        let created_at = Utc::now();
        let row = ReportRow {
            id: Uuid::new_v4(),
            twitch_username: username.to_string(),
            report_data,
            created_at,
            expires_at: created_at + Duration::hours(24),
        };
        lock(&self.rows).push(row.clone());
        ready(Ok(row))
    }

    fn latest(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<ReportRow>, DbError>> + Send {
        ready(Ok(self.newest(username, false)))
    }

    fn fresh(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<ReportRow>, DbError>> + Send {
        ready(Ok(self.newest(username, true)))
    }

    fn delete_expired(&self) -> impl Future<Output = Result<u64, DbError>> + Send {
        let now = Utc::now();
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| row.is_fresh_at(now));
        ready(Ok(u64::try_from(before - rows.len()).unwrap_or(u64::MAX)))
    }

    fn health(&self) -> impl Future<Output = Result<(), DbError>> + Send {
        ready(if self.down {
            Err(DbError::MissingDatabaseUrl)
        } else {
            Ok(())
        })
    }
}
