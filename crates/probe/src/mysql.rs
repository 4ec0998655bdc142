//! MySQL reachability probe: open one connection, close it, report.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

use stockroom_core::config::DatabaseConfig;

use crate::error::ProbeError;
use crate::prober::DependencyProbe;

/// Per-attempt connect timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection options for the configured database.
pub fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

pub struct MySqlProbe {
    options: MySqlConnectOptions,
    address: String,
    timeout: Duration,
}

impl MySqlProbe {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: connect_options(config),
            address: config.address(),
            timeout: CONNECT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl DependencyProbe for MySqlProbe {
    fn name(&self) -> &str {
        "MySQL"
    }

    fn target(&self) -> String {
        self.address.clone()
    }

    async fn check(&self) -> Result<bool, ProbeError> {
        let conn = tokio::time::timeout(self.timeout, MySqlConnection::connect_with(&self.options))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
            .map_err(|e| ProbeError::Connect(e.to_string()))?;

        // Reachability is established; a failed close does not change that.
        if let Err(e) = conn.close().await {
            tracing::debug!(error = %e, "closing probe connection failed");
        }
        Ok(true)
    }
}
