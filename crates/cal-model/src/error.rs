use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed mapping rule: {reason}")]
    MalformedRule { reason: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
