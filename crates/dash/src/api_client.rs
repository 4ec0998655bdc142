//! HTTP client for the items API.
//!
//! Maps HTTP results onto plain values: 404 on a lookup is `Ok(None)`, any
//! other non-success status becomes an error carrying the server's `detail`.

use anyhow::{bail, Context, Result};
use reqwest::{Response, StatusCode};

use stockroom_core::{ErrorDetail, HealthStatus, Item, ItemId, MessageResponse, NewItem, Page};

/// Per-request timeout for dashboard calls.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Client for the items REST API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `/health`. The body says whether the database is connected.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("API not reachable")?;
        let resp = ensure_success(resp).await?;
        resp.json().await.context("failed to parse health status")
    }

    pub async fn list_items(&self, page: Page) -> Result<Vec<Item>> {
        let url = format!("{}/items/", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("skip", page.skip), ("limit", page.limit)])
            .send()
            .await
            .context("failed to list items")?;
        let resp = ensure_success(resp).await?;
        resp.json().await.context("failed to parse item list")
    }

    pub async fn create_item(&self, item: &NewItem) -> Result<Item> {
        let url = format!("{}/items/", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(item)
            .send()
            .await
            .context("failed to create item")?;
        let resp = ensure_success(resp).await?;
        resp.json().await.context("failed to parse created item")
    }

    /// Look up one item; `Ok(None)` when the API answers 404.
    pub async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        let url = format!("{}/items/{}", self.base_url, id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("failed to fetch item")?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = ensure_success(resp).await?;
        resp.json().await.map(Some).context("failed to parse item")
    }

    /// Delete one item and return the server's confirmation message.
    pub async fn delete_item(&self, id: ItemId) -> Result<String> {
        let url = format!("{}/items/{}", self.base_url, id);
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .context("failed to delete item")?;
        if resp.status() == StatusCode::NOT_FOUND {
            bail!("item {} not found", id);
        }
        let resp = ensure_success(resp).await?;
        let body: MessageResponse = resp.json().await.context("failed to parse delete response")?;
        Ok(body.message)
    }
}

/// Pass through 2xx responses; turn anything else into an error with the
/// `detail` field (or raw body) attached.
async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorDetail>(&body)
        .map(|e| e.detail)
        .unwrap_or(body);
    bail!("server returned {}: {}", status, detail)
}
