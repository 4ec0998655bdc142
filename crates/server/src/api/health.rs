//! `GET /health`: always 200, dependency state in the body.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::Json;

use stockroom_core::HealthStatus;

use crate::state::AppState;

/// Upper bound on the one-shot database check.
const PING_TIMEOUT: Duration = Duration::from_secs(3);

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let status = match tokio::time::timeout(PING_TIMEOUT, state.store.ping()).await {
        Ok(Ok(())) => HealthStatus::connected(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            HealthStatus::degraded(e.to_string())
        }
        Err(_) => {
            tracing::warn!("health check: database ping timed out");
            HealthStatus::degraded(format!("database ping timed out after {:?}", PING_TIMEOUT))
        }
    };
    Json(status)
}
