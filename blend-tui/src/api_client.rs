//! HTTP client for the blending server.
//!
//! Requests carry no timeout: a hung fetch never resolves and the previous
//! value stays on screen.

use crate::config::TuiConfig;
use blend_core::FORM_ACTION;
use serde_json::Value;

pub const PRICE_PATH: &str = "/get_brent_price";
pub const CHART_PATH: &str = "/get_brent_chart_data";

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Raw body of the price endpoint. Interpretation is left to the caller.
    pub async fn price(&self) -> Result<Value, ApiClientError> {
        self.get_json(PRICE_PATH).await
    }

    pub async fn chart(&self) -> Result<Value, ApiClientError> {
        self.get_json(CHART_PATH).await
    }

    /// Post the form as `application/x-www-form-urlencoded`. Returns the HTTP status.
    pub async fn submit(&self, pairs: &[(String, String)]) -> Result<u16, ApiClientError> {
        let response = self
            .client
            .post(self.url(FORM_ACTION))
            .form(pairs)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            let text = response.text().await?;
            Err(ApiClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text.trim()
            )))
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();
        let text = response.text().await?;
        // Error bodies are still JSON objects; let the caller decide.
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(err) if status.is_success() => Err(err.into()),
            Err(_) => Err(ApiClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text.trim()
            ))),
        }
    }
}
