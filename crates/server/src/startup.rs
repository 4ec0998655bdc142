//! Server startup: dependency gate, storage handle, HTTP listener.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use stockroom_core::Config;
use stockroom_probe::{wait_for, MySqlProbe, ProbeConfig, ProbeOutcome, Prober};

use crate::db;
use crate::router::build_router;
use crate::state::AppState;
use crate::store::MySqlItemStore;

/// Block until MySQL accepts connections or the attempt budget is spent.
pub async fn wait_for_db(config: &Config, probe_config: &ProbeConfig) -> ProbeOutcome {
    let probe = MySqlProbe::new(&config.database);
    wait_for(&Prober::new(), &probe, probe_config).await
}

/// Gate on MySQL, build the storage handle, and serve until Ctrl-C.
pub async fn serve(
    config: &Config,
    skip_wait: bool,
    probe_config: &ProbeConfig,
) -> anyhow::Result<ExitCode> {
    if skip_wait {
        warn!("--skip-wait set, not waiting for MySQL");
    } else {
        let outcome = wait_for_db(config, probe_config).await;
        if !outcome.succeeded() {
            return Ok(ExitCode::from(outcome.exit_status()));
        }
    }

    let pool = db::init_pool(&config.database).await?;
    let store = Arc::new(MySqlItemStore::new(pool.clone()));
    let app = build_router(Arc::new(AppState::new(store)));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    pool.close().await;
    info!("Server stopped");
    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
