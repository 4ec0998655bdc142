//! Bounded-retry readiness polling.
//!
//! A [`Prober`] calls a probe function until it reports success or the
//! attempt budget runs out, pausing between failed attempts. It never fails:
//! every run ends in a [`ProbeOutcome`] and the caller decides whether an
//! exhausted outcome is fatal.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use stockroom_core::config::ProbeSettings;

use crate::error::ProbeError;

// ── Config & outcome ──────────────────────────────────────────────

/// Attempt budget and spacing for one probing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeConfig {
    max_retries: u32,
    interval: Duration,
}

impl ProbeConfig {
    pub fn new(max_retries: u32, interval: Duration) -> Result<Self, ProbeError> {
        if max_retries == 0 {
            return Err(ProbeError::InvalidConfig(
                "max_retries must be greater than zero".into(),
            ));
        }
        if interval.is_zero() {
            return Err(ProbeError::InvalidConfig(
                "interval must be greater than zero".into(),
            ));
        }
        Ok(Self {
            max_retries,
            interval,
        })
    }

    pub fn from_secs(max_retries: u32, interval_secs: f64) -> Result<Self, ProbeError> {
        if !interval_secs.is_finite() || interval_secs <= 0.0 {
            return Err(ProbeError::InvalidConfig(format!(
                "interval must be a positive number of seconds (got {})",
                interval_secs
            )));
        }
        let interval = Duration::try_from_secs_f64(interval_secs).map_err(|e| {
            ProbeError::InvalidConfig(format!("interval {}s is out of range: {}", interval_secs, e))
        })?;
        Self::new(max_retries, interval)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_retries: ProbeSettings::DEFAULT_MAX_RETRIES,
            interval: Duration::from_secs_f64(ProbeSettings::DEFAULT_INTERVAL_SECS),
        }
    }
}

impl TryFrom<&ProbeSettings> for ProbeConfig {
    type Error = ProbeError;

    fn try_from(settings: &ProbeSettings) -> Result<Self, Self::Error> {
        Self::from_secs(settings.max_retries, settings.interval_secs)
    }
}

/// Terminal result of a probing run.
///
/// Only two shapes exist: succeeded on attempt `attempts` (every earlier
/// attempt failed), or exhausted after `max_retries` attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    succeeded: bool,
    attempts: u32,
    last_error: Option<String>,
}

impl ProbeOutcome {
    fn success(attempts: u32) -> Self {
        Self {
            succeeded: true,
            attempts,
            last_error: None,
        }
    }

    fn exhausted(attempts: u32, last_error: Option<String>) -> Self {
        Self {
            succeeded: false,
            attempts,
            last_error,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Message of the most recent captured error, if any attempt errored.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Process exit status for wait-for entry points: 0 on success, 1 on exhaustion.
    pub fn exit_status(&self) -> u8 {
        if self.succeeded {
            0
        } else {
            1
        }
    }
}

/// Passed to the observer after each failed attempt.
#[derive(Debug, Clone, Copy)]
pub struct AttemptReport<'a> {
    pub attempt: u32,
    pub max_retries: u32,
    /// Error raised by this attempt, `None` when the probe simply reported false.
    pub error: Option<&'a str>,
}

// ── Seams ─────────────────────────────────────────────────────────

/// A single liveness check against one dependency.
#[async_trait]
pub trait DependencyProbe: Send + Sync {
    /// Short label for log lines ("MySQL", "API").
    fn name(&self) -> &str;

    /// Where the probe points, for log lines. Must not contain secrets.
    fn target(&self) -> String;

    /// Run one check. `Ok(false)` and `Err(_)` both count as a failed attempt.
    async fn check(&self) -> Result<bool, ProbeError>;
}

/// How the prober waits between attempts.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Suspends the calling task with `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ── Prober ────────────────────────────────────────────────────────

/// Stateless bounded-retry runner. Attempts run strictly one after another.
#[derive(Debug, Clone, Default)]
pub struct Prober<P = TokioPause> {
    pause: P,
}

impl Prober {
    pub fn new() -> Self {
        Self { pause: TokioPause }
    }
}

impl<P: Pause> Prober<P> {
    pub fn with_pause(pause: P) -> Self {
        Self { pause }
    }

    /// Invoke `probe_fn` until it returns `Ok(true)` or `config.max_retries()`
    /// attempts have been made.
    pub async fn probe<F, Fut>(&self, probe_fn: F, config: &ProbeConfig) -> ProbeOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, ProbeError>>,
    {
        self.probe_observed(probe_fn, config, |_| {}).await
    }

    /// Like [`Prober::probe`], calling `observe` after every failed attempt
    /// (before the pause).
    pub async fn probe_observed<F, Fut, O>(
        &self,
        mut probe_fn: F,
        config: &ProbeConfig,
        mut observe: O,
    ) -> ProbeOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, ProbeError>>,
        O: FnMut(&AttemptReport<'_>),
    {
        let max_retries = config.max_retries();
        let mut last_error: Option<String> = None;

        for attempt in 1..=max_retries {
            let raised = match probe_fn().await {
                Ok(true) => return ProbeOutcome::success(attempt),
                Ok(false) => None,
                Err(e) => Some(e.to_string()),
            };

            observe(&AttemptReport {
                attempt,
                max_retries,
                error: raised.as_deref(),
            });

            if raised.is_some() {
                last_error = raised;
            }

            if attempt < max_retries {
                self.pause.pause(config.interval()).await;
            }
        }

        ProbeOutcome::exhausted(max_retries, last_error)
    }

    /// Probe a [`DependencyProbe`] implementation.
    pub async fn run(&self, probe: &dyn DependencyProbe, config: &ProbeConfig) -> ProbeOutcome {
        self.probe(|| probe.check(), config).await
    }
}
