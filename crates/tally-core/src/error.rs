use thiserror::Error;

use crate::store::StoreError;

/// Unified error type for the core services.
///
/// Each variant maps to a distinct caller-facing failure class; the HTTP
/// layer translates them to status codes without inspecting messages.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Too many requests, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { category, month } => CoreError::Conflict(format!(
                "budget already exists for {category} in {month}"
            )),
            StoreError::Io(message) => CoreError::Storage(message),
            StoreError::Corrupt(message) => CoreError::Storage(message),
        }
    }
}
