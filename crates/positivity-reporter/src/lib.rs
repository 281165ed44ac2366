//! Report orchestration: fetch a channel, transform it, and persist the result.
//!
//! The pipeline talks to Twitch and Postgres only through [`ChannelSource`]
//! and [`ReportStore`], so callers inject the production clients and tests
//! inject in-memory fakes.

pub mod error;
pub mod pipeline;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::ReporterError;
pub use pipeline::{
    generate_and_save, generate_report, load_or_generate, normalize_username, show_latest,
    StoredReport,
};
pub use store::{ChannelSource, PgReportStore, ReportStore};
