//! Error types for source ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading from a source collection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Network request failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("request failed ({status}): {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Failed to decode a JSON response.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The configured base URL or a request path is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A page fetch was requested with a zero page size.
    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// The settings file could not be read or written.
    #[error("settings file {path}: {message}")]
    Settings {
        /// Settings file location.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}

impl IngestError {
    /// Returns a user-friendly error message suitable for a failure notice.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the service. Please check your connection.",
            Self::Http { status, .. } if *status == 401 || *status == 403 => {
                "The service rejected the API key."
            }
            Self::Http { .. } => "The service returned an error.",
            Self::JsonParse(_) => "The service returned an unexpected response.",
            Self::InvalidUrl(_) => "The service URL is not valid.",
            Self::InvalidPageSize => "An unexpected error occurred.",
            Self::Settings { .. } => "Could not load the loader settings.",
        }
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::JsonParse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = IngestError::Network("connection refused".to_string());
        assert!(err.user_message().contains("connection"));

        let err = IngestError::Http {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert!(err.user_message().contains("API key"));
    }
}
