use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("form data must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
