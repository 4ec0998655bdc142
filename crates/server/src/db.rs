use std::time::Duration;

use anyhow::Context;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use stockroom_core::config::DatabaseConfig;
use stockroom_probe::mysql::connect_options;

/// How long a request waits for a pooled connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Create the MySQL connection pool and apply migrations.
pub async fn init_pool(config: &DatabaseConfig) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(connect_options(config))
        .await
        .with_context(|| format!("failed to connect to MySQL at {}", config.address()))?;
    info!("MySQL connected: {}/{}", config.address(), config.name);

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("failed to apply database migrations")?;
    info!("Database migrations applied successfully");

    Ok(pool)
}
