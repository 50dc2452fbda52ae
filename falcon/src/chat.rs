//! Falcon text generation.

use serde_json::Value;
use tracing::instrument;

use crate::client::Falcon;
use crate::error::Result;
use crate::types::GenerateRequest;

impl Falcon {
    /// Generate text for a query.
    ///
    /// The request body is `{chat_history, query, use_default,
    /// conversation_config, config}`. Transport failures are retried as the
    /// configured retry policy allows; status errors never are.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpStatus`](crate::Error::HttpStatus) for a non-2xx
    /// answer, [`Error::Network`](crate::Error::Network) for transport failures
    /// and [`Error::Json`](crate::Error::Json) if the body is not JSON.
    #[instrument(skip(self, request), fields(host = %self.host_name_port()))]
    pub async fn generate_text(&self, request: &GenerateRequest) -> Result<Value> {
        let url = self.predict_url();
        let mut last_retry = None;

        loop {
            match self.send_predict(&url, request).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let Some(delay) = self.config.retry_policy.retry(&err, last_retry) else {
                        return Err(err);
                    };
                    let attempt = last_retry.map_or(1, |(n, _)| n + 1);
                    tracing::warn!(attempt, ?delay, error = %err, "retrying predict request");
                    tokio::time::sleep(delay).await;
                    last_retry = Some((attempt, delay));
                }
            }
        }
    }

    async fn send_predict(&self, url: &str, request: &GenerateRequest) -> Result<Value> {
        tracing::debug!(%url, query_len = request.query.len(), "sending predict request");
        let response = self.client().post(url).json(request).send().await?;
        Self::decode(response).await
    }
}
