//! Common error infrastructure for companion-core.
//!
//! The engine is total over well-typed input. The only failures are
//! precondition violations (an empty seed, a genre or attribute name outside
//! the fixed enumerations), which point at a caller or schema bug rather than
//! a runtime data condition. Degenerate input such as an empty library or a
//! zero-second session is never an error.

/// Severity level of an error, used for categorization by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: empty seed, unknown genre label
    Validation,

    /// Unexpected inconsistency in stored or collaborator-provided data.
    ///
    /// Examples: unreadable persisted snapshot
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a bug or corrupted data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for errors surfaced by the companion crates.
///
/// Provides a uniform interface for classification so that front-ends can
/// decide between "tell the user" and "log and investigate".
pub trait CompanionError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Precondition violations detected by the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("seed must not be empty")]
    EmptySeed,

    #[error("unknown genre: {0:?}")]
    UnknownGenre(String),

    #[error("unknown attribute: {0:?}")]
    UnknownAttribute(String),

    #[error("unknown pet stage: {0:?}")]
    UnknownStage(String),
}

impl CompanionError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySeed => "ENGINE_EMPTY_SEED",
            Self::UnknownGenre(_) => "ENGINE_UNKNOWN_GENRE",
            Self::UnknownAttribute(_) => "ENGINE_UNKNOWN_ATTRIBUTE",
            Self::UnknownStage(_) => "ENGINE_UNKNOWN_STAGE",
        }
    }
}

pub type Result<T> = core::result::Result<T, EngineError>;
