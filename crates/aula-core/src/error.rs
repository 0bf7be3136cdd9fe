use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("malformed lesson plan: {0}")]
    MalformedPlan(String),

    #[error("unknown teaching modality: {0}")]
    UnknownModality(String),
}
