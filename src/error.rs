use thiserror::Error;

pub type Result<T> = std::result::Result<T, FollowbackError>;

/// Infrastructure failures: storage, filesystem, HTTP.
///
/// Input problems are not errors of this kind; see
/// [`NormalizeError`](crate::tools::normalize::NormalizeError).
#[derive(Debug, Error)]
pub enum FollowbackError {
    #[error("storage error during {operation}: {message}")]
    Storage { operation: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl FollowbackError {
    pub fn storage_error(operation: &str, message: &str) -> Self {
        FollowbackError::Storage {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }
}
