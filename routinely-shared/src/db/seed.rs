/// Seed-script application
///
/// The server can re-stage sample data on every boot from an external SQL
/// script (opt-in via configuration). The script is executed verbatim,
/// statement by statement.

use sqlx::{Executor, SqlitePool};
use tracing::info;

/// Applies a SQL seed script to the database
///
/// The script may contain multiple statements.
///
/// # Errors
///
/// Returns an error if any statement fails; earlier statements stay
/// applied.
pub async fn apply_seed(pool: &SqlitePool, sql: &str) -> Result<(), sqlx::Error> {
    pool.execute(sql).await?;
    info!("Seed script applied");
    Ok(())
}
