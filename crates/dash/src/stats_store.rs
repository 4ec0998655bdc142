//! Persist column statistics to the `column_statistics` table.

use anyhow::Context;
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;

use stockroom_core::config::DatabaseConfig;
use stockroom_probe::mysql::{connect_options, CONNECT_TIMEOUT};

use crate::csv_report::Summary;

/// One row of `column_statistics`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatistics {
    pub column_name: String,
    pub mean: f64,
    /// `None` when the standard deviation is undefined.
    pub std_dev: Option<f64>,
    pub minimum: f64,
    pub maximum: f64,
}

impl ColumnStatistics {
    pub fn from_summary(column: &str, summary: &Summary) -> Self {
        Self {
            column_name: column.to_string(),
            mean: summary.mean,
            std_dev: summary.std.is_finite().then_some(summary.std),
            minimum: summary.min,
            maximum: summary.max,
        }
    }
}

/// Insert one statistics row and return its id. Applies pending migrations
/// first so the table exists even when the API has never started.
pub async fn save(config: &DatabaseConfig, stats: &ColumnStatistics) -> anyhow::Result<u64> {
    let mut conn = tokio::time::timeout(
        CONNECT_TIMEOUT,
        MySqlConnection::connect_with(&connect_options(config)),
    )
    .await
    .with_context(|| format!("timed out connecting to MySQL at {}", config.address()))?
    .with_context(|| format!("failed to connect to MySQL at {}", config.address()))?;

    sqlx::migrate!("../../migrations")
        .run(&mut conn)
        .await
        .context("failed to apply database migrations")?;

    let result = sqlx::query(
        "INSERT INTO column_statistics (column_name, mean, std_dev, minimum, maximum) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&stats.column_name)
    .bind(stats.mean)
    .bind(stats.std_dev)
    .bind(stats.minimum)
    .bind(stats.maximum)
    .execute(&mut conn)
    .await
    .context("failed to insert column statistics")?;
    tracing::info!(column = %stats.column_name, id = result.last_insert_id(), "statistics saved");

    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "closing statistics connection failed");
    }
    Ok(result.last_insert_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_std_maps_to_null() {
        let summary = Summary::from_values(&[4.0]).unwrap();
        let stats = ColumnStatistics::from_summary("temp", &summary);
        assert_eq!(stats.std_dev, None);
        assert_eq!(stats.minimum, 4.0);
        assert_eq!(stats.maximum, 4.0);
    }

    #[test]
    fn test_copies_summary_fields() {
        let summary = Summary::from_values(&[1.0, 3.0]).unwrap();
        let stats = ColumnStatistics::from_summary("temp", &summary);
        assert_eq!(stats.column_name, "temp");
        assert_eq!(stats.mean, 2.0);
        assert!(stats.std_dev.is_some());
    }

    /// Needs a MySQL reachable with the DB_* environment variables.
    #[tokio::test]
    #[ignore]
    async fn test_save_inserts_row() {
        stockroom_core::config::load_dotenv();
        let config = stockroom_core::Config::from_env();
        let summary = Summary::from_values(&[1.0, 2.0, 3.0]).unwrap();
        let stats = ColumnStatistics::from_summary("integration", &summary);

        let id = save(&config.database, &stats).await.unwrap();
        assert!(id > 0);
    }
}
