//! Database maintenance commands.

use positivity_core::AppConfig;
use sqlx::PgPool;

pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = positivity_db::connect_pool_from_config(config).await?;
    Ok(pool)
}

/// Apply pending migrations and report how many ran.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing, the connection fails, or a
/// migration fails.
pub(crate) async fn run_migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    let applied = positivity_db::run_migrations(&pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}

/// Delete expired reports and report how many rows were removed.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing or the delete fails.
pub(crate) async fn run_cleanup(config: &AppConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    let removed = positivity_db::delete_expired_reports(&pool).await?;
    tracing::info!(removed, "expired reports cleaned up");
    println!("removed {removed} expired report(s)");
    Ok(())
}
