//! Schema migrations for the site tables.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hosted deployments usually apply `migrations/` through the database
//! dashboard. `firm-admin migrate` applies the same files directly when a
//! Postgres connection string is available.

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::error::CliError;

/// Connect to `database_url` and apply pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or any migration fails.
pub async fn run_migrations(database_url: &str) -> Result<(), CliError> {
    let pool = PgPoolOptions::new().max_connections(1).connect(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("migrations applied");
    pool.close().await;
    Ok(())
}
