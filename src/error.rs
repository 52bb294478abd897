use crate::storage::StoreError;
use thiserror::Error;

/// Errors returned by the rating core to the request layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Authorization(String),
}

impl CoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::Conflict(_))
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => CoreError::NotFound(err.to_string()),
            other => CoreError::Conflict(other.to_string()),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
