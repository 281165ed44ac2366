//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! expired-report cleanup job.

use std::sync::Arc;

use positivity_reporter::ReportStore;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if `cleanup_cron` does not parse, or the
/// scheduler cannot be initialised or started.
pub async fn build_scheduler<R>(
    store: Arc<R>,
    cleanup_cron: &str,
) -> Result<JobScheduler, JobSchedulerError>
where
    R: ReportStore + 'static,
{
    let scheduler = JobScheduler::new().await?;
    scheduler.add(cleanup_job(store, cleanup_cron)?).await?;
    scheduler.start().await?;
    tracing::info!(cron = cleanup_cron, "scheduler: cleanup job registered");
    Ok(scheduler)
}

/// Job that deletes expired reports on the `cron` schedule (six fields,
/// seconds first).
fn cleanup_job<R>(store: Arc<R>, cron: &str) -> Result<Job, JobSchedulerError>
where
    R: ReportStore + 'static,
{
    Job::new_async(cron, move |_uuid, _lock| {
        let store = Arc::clone(&store);
        Box::pin(async move {
            run_cleanup(store.as_ref()).await;
        })
    })
}

/// Delete expired reports, logging instead of failing the job.
async fn run_cleanup<R: ReportStore>(store: &R) -> Option<u64> {
    match store.delete_expired().await {
        Ok(removed) => {
            tracing::info!(removed, "scheduler: expired reports cleaned up");
            Some(removed)
        }
        Err(e) => {
            tracing::error!(error = %e, "scheduler: report cleanup failed");
            None
        }
    }
}
