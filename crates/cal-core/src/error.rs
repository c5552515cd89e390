//! Run-aborting errors.

use std::fmt;

use thiserror::Error;

use cal_ingest::IngestError;
use cal_model::ModelError;

/// Collection a failed fetch was reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Identities,
    Courses,
    Settings,
    MappingTable,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identities => "researcher set",
            Self::Courses => "courses",
            Self::Settings => "settings",
            Self::MappingTable => "organizational unit mapping",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a pipeline run before dispatch.
///
/// Submission failures are not here; they are recorded per member on the
/// outcome board.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Identity, course or configuration fetch failed.
    #[error("{kind} unavailable: {error}")]
    SourceUnavailable {
        kind: SourceKind,
        #[source]
        error: IngestError,
    },

    /// The mapping rule could not be parsed.
    #[error("malformed mapping rule: {0}")]
    MalformedRule(String),

    /// Neither a researcher set nor an identity list was given.
    #[error("no researcher set or identity list selected")]
    MissingSelection,

    /// A named rule is not in the settings.
    #[error("mapping rule not found: {0}")]
    UnknownRule(String),
}

impl PipelineError {
    pub fn source_unavailable(kind: SourceKind, error: IngestError) -> Self {
        Self::SourceUnavailable { kind, error }
    }

    /// The single failure notice shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::SourceUnavailable { kind, error } => {
                format!("Could not load the {kind}. {}", error.user_message())
            }
            Self::MalformedRule(_) => "The selected mapping rule could not be read.".to_string(),
            Self::MissingSelection => {
                "Select a researcher set or enter researcher identifiers.".to_string()
            }
            Self::UnknownRule(name) => format!("No mapping rule named '{name}' is configured."),
        }
    }
}

impl From<ModelError> for PipelineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MalformedRule { reason } => Self::MalformedRule(reason),
            ModelError::Json(err) => Self::MalformedRule(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
