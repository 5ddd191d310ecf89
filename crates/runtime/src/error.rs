//! Unified error type surfaced by the runtime API.
//!
//! Wraps engine precondition failures and repository failures so front-ends
//! can bubble them up with a single `?`.
use companion_core::{BookId, CompanionError, EngineError, ErrorSeverity};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("book {0} is not in the library")]
    BookNotFound(BookId),

    #[error("pet name must not be empty")]
    EmptyPetName,

    #[error("persistence is enabled but no data directory is configured")]
    MissingDataDir,
}

impl CompanionError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(err) => err.severity(),
            Self::Repository(err) => err.severity(),
            Self::BookNotFound(_) | Self::EmptyPetName => ErrorSeverity::Validation,
            Self::MissingDataDir => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(err) => err.error_code(),
            Self::Repository(err) => err.error_code(),
            Self::BookNotFound(_) => "RUNTIME_BOOK_NOT_FOUND",
            Self::EmptyPetName => "RUNTIME_EMPTY_PET_NAME",
            Self::MissingDataDir => "RUNTIME_MISSING_DATA_DIR",
        }
    }
}
