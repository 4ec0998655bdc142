//! Startup gate: run a probe under the Prober and log the progress.

use tracing::{error, info, warn};

use crate::prober::{DependencyProbe, Pause, ProbeConfig, ProbeOutcome, Prober};

/// Wait for `probe` to report ready, logging each failed attempt.
///
/// Returns the outcome unchanged; callers map it to an exit status or a
/// fatal startup error.
pub async fn wait_for<P: Pause>(
    prober: &Prober<P>,
    probe: &dyn DependencyProbe,
    config: &ProbeConfig,
) -> ProbeOutcome {
    let name = probe.name();
    info!(
        target_addr = %probe.target(),
        max_retries = config.max_retries(),
        interval_ms = config.interval().as_millis() as u64,
        "Waiting for {}",
        name
    );

    let outcome = prober
        .probe_observed(
            || probe.check(),
            config,
            |report| match report.error {
                Some(e) => warn!(
                    attempt = report.attempt,
                    max_retries = report.max_retries,
                    error = %e,
                    "{} not available",
                    name
                ),
                None => warn!(
                    attempt = report.attempt,
                    max_retries = report.max_retries,
                    "{} not ready",
                    name
                ),
            },
        )
        .await;

    if outcome.succeeded() {
        info!("{} available after {} attempt(s)", name, outcome.attempts());
    } else {
        error!(
            last_error = outcome.last_error().unwrap_or("none"),
            "{} still unavailable after {} attempts",
            name,
            outcome.attempts()
        );
    }
    outcome
}
