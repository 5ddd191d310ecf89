//! Error types raised by repository implementations.

use companion_core::{CompanionError, ErrorSeverity};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl CompanionError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Json(_) => "REPOSITORY_JSON",
            Self::CorruptedData(_) => "REPOSITORY_CORRUPTED_DATA",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
