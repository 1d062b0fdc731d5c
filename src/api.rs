//! REST client for the dashboard API.
//!
//! Response bodies are treated as opaque JSON; the home and pastors pages pick
//! out the fields they display.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option` outputs. A non-OK status, a transport fault or an
//! undecodable body all mean "no data" and are never retried, so a page
//! degrades to its empty state instead of failing.

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

pub const DASHBOARD_PATH: &str = "/api/reports/dashboard";
pub const PASTORS_PATH: &str = "/api/pastors/";
pub const VISION_PATH: &str = "/api/pastors/vision";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Remote data consumed by the home and pastors pages.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /api/reports/dashboard`.
    async fn dashboard(&self) -> Option<Value>;
    /// `GET /api/pastors/`.
    async fn pastors(&self) -> Option<Value>;
    /// `GET /api/pastors/vision`.
    async fn vision(&self) -> Option<Value>;
}

/// `reqwest`-backed client. Cookies set by the API are kept and sent back on
/// later requests.
#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDashboardApi {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    async fn try_get_json(&self, path: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            debug!(%url, status = %resp.status(), "api returned non-success status");
            return Ok(None);
        }
        Ok(Some(resp.json::<Value>().await?))
    }

    async fn get_json(&self, path: &str) -> Option<Value> {
        match self.try_get_json(path).await {
            Ok(body) => body,
            Err(e) => {
                warn!(%path, error = %e, "api request failed");
                None
            }
        }
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn dashboard(&self) -> Option<Value> {
        self.get_json(DASHBOARD_PATH).await
    }

    async fn pastors(&self) -> Option<Value> {
        self.get_json(PASTORS_PATH).await
    }

    async fn vision(&self) -> Option<Value> {
        self.get_json(VISION_PATH).await
    }
}
