use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialbackError {
    #[error("Invalid delay. Must be 1-60 minutes.")]
    InvalidDelay,

    #[error("call store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DialbackError>;
