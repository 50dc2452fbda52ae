//! Error types for Falcon client operations.
//!
//! [`Error`] covers every way a call can fail: the service answering with a
//! non-success status, the transport failing before an answer arrives, a local
//! upload file that cannot be read, or a body that is not valid JSON.

use std::path::PathBuf;

/// Result type alias for Falcon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Falcon client operations.
///
/// Each variant is a distinct failure mode so callers can pattern-match on
/// the cases they care about (e.g. retrying network failures only).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Connection, timeout, DNS or other transport failure.
    #[error("{0}")]
    Network(String),

    /// A local file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request was rejected before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client or environment configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an I/O error bound to the path that caused it.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns the HTTP status code, if this is a status error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a retryable error.
    ///
    /// Only transport failures qualify; a status answer from the service is
    /// final.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("Request timed out")
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {err}"))
        } else if err.is_builder() {
            Self::invalid_request(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display() {
        let err = Error::http_status(500, "boom");
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn io_display_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io("data/01Aug2023.csv", source);

        assert!(err.to_string().contains("data/01Aug2023.csv"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn only_network_is_retryable() {
        assert!(Error::network("reset").is_retryable());
        assert!(!Error::http_status(503, "").is_retryable());
        assert!(!Error::invalid_request("empty").is_retryable());
        assert!(!Error::config("bad").is_retryable());
    }
}
