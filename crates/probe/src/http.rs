//! HTTP health probe: `GET {base}/health`, ready iff the status is 200.
//!
//! The response body is never read. The items API answers 200 even when its
//! database is down, so this probe gates on "API process is up" only.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::error::ProbeError;
use crate::prober::DependencyProbe;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

pub struct HttpHealthProbe {
    health_url: Url,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpHealthProbe {
    pub fn new(base_url: &str) -> Result<Self, ProbeError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let raw = format!("{}/health", base_url.trim_end_matches('/'));
        let health_url = Url::parse(&raw)
            .map_err(|e| ProbeError::InvalidConfig(format!("invalid API URL '{}': {}", base_url, e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            health_url,
            client,
            timeout,
        })
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }
}

#[async_trait]
impl DependencyProbe for HttpHealthProbe {
    fn name(&self) -> &str {
        "API"
    }

    fn target(&self) -> String {
        self.health_url.to_string()
    }

    async fn check(&self) -> Result<bool, ProbeError> {
        let resp = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(self.timeout)
                } else {
                    ProbeError::Transport(e.to_string())
                }
            })?;

        match resp.status() {
            StatusCode::OK => Ok(true),
            other => Err(ProbeError::UnexpectedStatus(other.as_u16())),
        }
    }
}
