//! HTTP transport for the gate API.
//!
//! This module keeps gate connectivity in one place so the endpoint wrappers
//! can share request construction, timeouts, and error handling. The
//! transport is an injected value: tests and multi-gate deployments build
//! their own instead of reaching for process-wide state.
//!
//! Session identity rides on ambient cookie/header context managed by the
//! surrounding HTTP stack; the transport itself never stores credentials.

use crate::{config::GateConfig, error::Error};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

#[derive(Clone, Debug)]
pub struct GateTransport {
    client: Client,
    base_url: String,
}

impl GateTransport {
    /// Build a transport from the gate configuration.
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &GateConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Build the absolute URL for a gate path.
    /// # Errors
    /// Returns an error if the base URL cannot be parsed, has no host, or
    /// uses an unsupported scheme, or if the path is not absolute.
    pub fn endpoint_url(&self, path: &str) -> Result<String, Error> {
        if !path.starts_with('/') {
            return Err(Error::InvalidUrl(format!(
                "gate path must start with /, got {path}"
            )));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|err| Error::InvalidUrl(format!("{}: {err}", self.base_url)))?;

        let scheme = url.scheme();

        let host = url
            .host()
            .ok_or_else(|| Error::InvalidUrl("no host specified".to_string()))?
            .to_owned();

        let port = match url.port() {
            Some(p) => p,
            None => match scheme {
                "http" => 80,
                "https" => 443,
                _ => return Err(Error::InvalidUrl(format!("unsupported scheme {scheme}"))),
            },
        };

        let endpoint_url = format!("{scheme}://{host}:{port}{path}");

        debug!("endpoint URL: {}", endpoint_url);

        Ok(endpoint_url)
    }

    /// Execute a JSON request against the gate.
    /// # Errors
    /// Returns an error if the URL is invalid, the request fails, or the
    /// response body is not JSON. Non-2xx statuses are NOT an error here;
    /// callers decide how to read the body.
    pub async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<GateResponse, Error> {
        let url = self.endpoint_url(path)?;
        debug!("gate request: {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let json_body: Value = response
            .json()
            .await
            .map_err(|err| Error::Parse(err.to_string()))?;

        Ok(GateResponse {
            url,
            status,
            body: json_body,
        })
    }
}

/// Response wrapper for gate requests.
pub struct GateResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Value,
}
