//! HTTP client implementation

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use url::Url;

use marathon_models::ErrorResponse;

use crate::errors::DeployerError;
use crate::settings::MarathonSettings;

/// HTTP client for the Marathon REST API
pub struct MarathonClient {
    client: Client,
    base_url: String,
}

impl MarathonClient {
    /// Create a new client for the configured endpoint
    pub fn new(settings: &MarathonSettings) -> Result<Self, DeployerError> {
        Self::with_timeout(
            &settings.api_endpoint,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Create a new client for an endpoint with a per-request timeout
    pub fn with_timeout(api_endpoint: &str, timeout: Duration) -> Result<Self, DeployerError> {
        let endpoint = Url::parse(api_endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(DeployerError::ConfigError(format!(
                "unsupported Marathon endpoint scheme: {}",
                endpoint.scheme()
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DeployerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status("GET", &url, response).await?;
        Ok(response.json().await?)
    }

    /// Make a POST request, discarding the response body
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(), DeployerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        check_status("POST", &url, response).await?;
        Ok(())
    }

    /// Make a DELETE request, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<(), DeployerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        check_status("DELETE", &url, response).await?;
        Ok(())
    }
}

async fn check_status(method: &str, url: &str, response: Response) -> Result<Response, DeployerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
        debug!("HTTP {} {} not found: {}", method, url, message);
        return Err(DeployerError::NotFound(message));
    }

    error!("HTTP {} failed: {} - {}", method, status, message);
    Err(DeployerError::OrchestratorError(format!("{}: {}", status, message)))
}
