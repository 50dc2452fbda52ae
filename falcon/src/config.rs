//! Falcon client configuration.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::retry::{ExponentialBackoff, NoRetry, RetryPolicy};

/// Configuration for the Falcon client.
#[derive(Clone)]
pub struct FalconConfig {
    /// API key sent in the `X-API-Key` header.
    pub api_key: String,
    /// Service address as `host:port`.
    pub host_name_port: String,
    /// Transport marker. Stored but not consulted.
    pub transport: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Retry policy for text generation.
    pub retry_policy: Arc<dyn RetryPolicy>,
}

impl FalconConfig {
    /// Default service address.
    pub const DEFAULT_HOST_NAME_PORT: &'static str = "localhost:8888";
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

    /// Creates a configuration for the given key and address.
    #[must_use]
    pub fn new(api_key: impl Into<String>, host_name_port: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host_name_port: host_name_port.into(),
            ..Default::default()
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads from:
    /// - `FALCON_API_KEY` - Required API key
    /// - `FALCON_HOST_NAME_PORT` - Optional `host:port`
    /// - `FALCON_TRANSPORT` - Optional transport marker
    /// - `FALCON_TIMEOUT_SECS` - Optional request timeout
    /// - `FALCON_MAX_RETRIES` - Optional retry count for text generation
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the API key is missing, a numeric
    /// variable does not parse, or the timeout is zero.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key =
            lookup("FALCON_API_KEY").ok_or_else(|| Error::config("FALCON_API_KEY is not set"))?;

        let host_name_port = lookup("FALCON_HOST_NAME_PORT")
            .unwrap_or_else(|| Self::DEFAULT_HOST_NAME_PORT.to_owned());

        let mut config = Self::new(api_key, host_name_port);
        config.transport = lookup("FALCON_TRANSPORT");

        if let Some(secs) = lookup("FALCON_TIMEOUT_SECS") {
            match parse_number("FALCON_TIMEOUT_SECS", &secs)? {
                0 => return Err(Error::config("FALCON_TIMEOUT_SECS must be greater than 0")),
                secs => config.timeout_secs = Some(secs),
            }
        }

        if let Some(retries) = lookup("FALCON_MAX_RETRIES") {
            let retries = usize::try_from(parse_number("FALCON_MAX_RETRIES", &retries)?)
                .map_err(|e| Error::config(format!("FALCON_MAX_RETRIES: {e}")))?;
            if retries > 0 {
                config = config.retry_policy(ExponentialBackoff::new(retries));
            }
        }

        Ok(config)
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Sets the service address.
    #[must_use]
    pub fn host_name_port(mut self, address: impl Into<String>) -> Self {
        self.host_name_port = address.into();
        self
    }

    /// Sets the transport marker.
    #[must_use]
    pub fn transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = Some(transport.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets the retry policy used for text generation.
    #[must_use]
    pub fn retry_policy(mut self, policy: impl RetryPolicy + 'static) -> Self {
        self.retry_policy = Arc::new(policy);
        self
    }
}

impl Default for FalconConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            host_name_port: Self::DEFAULT_HOST_NAME_PORT.to_owned(),
            transport: None,
            timeout_secs: Some(Self::DEFAULT_TIMEOUT_SECS),
            retry_policy: Arc::new(NoRetry),
        }
    }
}

impl fmt::Debug for FalconConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FalconConfig")
            .field("api_key", &"<redacted>")
            .field("host_name_port", &self.host_name_port)
            .field("transport", &self.transport)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

fn parse_number(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::config(format!("{name}={value:?}: {e}")))
}
