//! Error types for activity submission.

use thiserror::Error;

use cal_ingest::IngestError;

/// A single member submission failed.
///
/// These never abort a dispatch; they end up as failed outcomes.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The sink refused the activity.
    #[error("{message}")]
    Rejected {
        /// HTTP status or sink-specific code.
        status: u16,
        /// Reason given by the sink.
        message: String,
    },

    /// The sink could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The activity could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),
}

impl SubmitError {
    /// Message stored on the failed outcome.
    #[must_use]
    pub fn outcome_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } if !message.is_empty() => message.clone(),
            Self::Rejected { status, .. } => format!("rejected with status {status}"),
            other => other.to_string(),
        }
    }
}

impl From<IngestError> for SubmitError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Http { status, message } => Self::Rejected { status, message },
            // Replies are never decoded, so a JSON error comes from the request body.
            IngestError::JsonParse(message) => Self::Encode(message),
            other => Self::Transport(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubmitError>;
