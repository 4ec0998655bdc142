//! Health contract shared by the service and its clients.
//!
//! The HTTP status of `GET /health` only says the API process is up. The
//! dependency state travels in the body:
//!
//! ```text
//! {"status": "ok", "database": "connected"}
//! {"status": "api_ok_db_error", "database": "disconnected", "error": "..."}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiStatus {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "api_ok_db_error")]
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseState {
    Connected,
    Disconnected,
}

/// Body of `GET /health`. Computed per request, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: ApiStatus,
    pub database: DatabaseState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn connected() -> Self {
        Self {
            status: ApiStatus::Ok,
            database: DatabaseState::Connected,
            error: None,
        }
    }

    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Degraded,
            database: DatabaseState::Disconnected,
            error: Some(error.into()),
        }
    }

    pub fn dependency_connected(&self) -> bool {
        self.database == DatabaseState::Connected
    }
}
