//! Falcon API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde_json::{Value, json};

use crate::config::FalconConfig;
use crate::error::{Error, Result};

/// Header carrying the API key.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Falcon API client.
#[derive(Debug, Clone)]
pub struct Falcon {
    pub(crate) config: Arc<FalconConfig>,
    pub(crate) http_client: Client,
}

impl Falcon {
    /// Create a new Falcon client with the given configuration.
    ///
    /// No connection is opened until the first request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the API key is not a valid header
    /// value, or [`Error::Config`] if the timeout is zero or the HTTP client
    /// cannot be built.
    pub fn new(config: FalconConfig) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| Error::invalid_request(format!("API key is not a valid header: {e}")))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let mut builder = Client::builder().default_headers(headers);
        match config.timeout_secs {
            Some(0) => return Err(Error::config("timeout must be greater than 0 seconds")),
            Some(timeout) => builder = builder.timeout(Duration::from_secs(timeout)),
            None => {}
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Create a client for the given API key and `host:port`.
    ///
    /// # Errors
    ///
    /// See [`Falcon::new`].
    pub fn with_api_key(
        api_key: impl Into<String>,
        host_name_port: impl Into<String>,
    ) -> Result<Self> {
        Self::new(FalconConfig::new(api_key, host_name_port))
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// See [`FalconConfig::from_env`] and [`Falcon::new`].
    pub fn from_env() -> Result<Self> {
        Self::new(FalconConfig::from_env()?)
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Get the service address.
    #[must_use]
    pub fn host_name_port(&self) -> &str {
        &self.config.host_name_port
    }

    /// Get the transport marker.
    #[must_use]
    pub fn transport(&self) -> Option<&str> {
        self.config.transport.as_deref()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &FalconConfig {
        &self.config
    }

    /// List the models served by the endpoint.
    ///
    /// The service exposes no listing endpoint, so this is a fixed answer.
    #[must_use]
    pub fn list_models(&self) -> Value {
        json!({ "models": "llama2" })
    }

    /// Get a reference to the HTTP client.
    #[must_use]
    pub(crate) const fn client(&self) -> &Client {
        &self.http_client
    }

    /// Build the text generation URL.
    pub(crate) fn predict_url(&self) -> String {
        format!("http://{}/v1/chat/predictLB", self.config.host_name_port)
    }

    /// Build the embedding upload URL.
    pub(crate) fn embedding_url(&self) -> String {
        format!("http://{}/v1/chat/create_embeddingLB", self.config.host_name_port)
    }

    /// Check the status and decode a JSON body.
    pub(crate) async fn decode(response: Response) -> Result<Value> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
