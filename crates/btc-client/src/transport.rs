//! HTTP transport layer for provider requests

use btc_core::{Config, Error, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Query parameter names whose values must never reach the logs
const SECRET_PARAMS: [&str; 1] = ["CMC_PRO_API_KEY"];

/// Raw result of a request: status code and body, whatever the status
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// HTTP transport layer for making requests to the provider APIs
///
/// Performs a single GET per call. No retries: a failed request is
/// reported to the caller immediately.
#[derive(Debug)]
pub struct Transport {
    client: Client,
}

impl Transport {
    /// Create a new transport instance
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Make a GET request and return the status and body
    ///
    /// # Arguments
    ///
    /// * `base_url` - Scheme and host of the provider API
    /// * `path` - Endpoint path, starting with `/`
    /// * `params` - Query parameters, appended in order
    ///
    /// Non-2xx statuses are returned as responses, not errors. Only transport
    /// failures (connection, DNS, timeout, unreadable body) produce `Error::Http`.
    #[instrument(skip(self, params))]
    pub async fn get(
        &self,
        base_url: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse> {
        let url = Self::build_url(base_url, path, params)?;
        debug!("Making request to: {}", redacted(&url));

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            let e = e.without_url();
            error!("Request to {} failed: {}", redacted(&url), e);
            Error::Http(format!("Request failed: {}", e))
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response body: {}", e.without_url())))?;

        debug!("Response status {} with body length: {} bytes", status, body.len());
        Ok(HttpResponse { status, body })
    }

    /// Build the full URL for a request
    fn build_url(base_url: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), path))
            .map_err(|e| Error::Http(format!("Invalid base URL: {}", e)))?;

        if !params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in params {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

/// URL with secret query values masked
fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if SECRET_PARAMS.contains(&k.as_ref()) { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    if !pairs.is_empty() {
        masked.query_pairs_mut().clear().extend_pairs(pairs);
    }
    masked.to_string()
}
