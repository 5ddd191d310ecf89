//! Runtime orchestration for the reading companion.
//!
//! `companion-core` is pure: it derives characters, avatars and pets from a
//! seed and a library but never stores anything. This crate supplies the
//! collaborators the engine leaves to its callers and wires them into a
//! single entry point, [`ReadingTracker`].
//!
//! Modules are organized by responsibility:
//! - [`tracker`] hosts the orchestrator and its builder
//! - [`repository`] persists the seed and the library snapshot
//! - [`config`] reads runtime settings from the environment
//! - [`clock`] abstracts wall-clock time so tests stay deterministic
pub mod clock;
pub mod config;
pub mod error;
pub mod repository;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use repository::{
    FileLibraryRepository, FileSeedStore, InMemoryLibraryRepo, InMemorySeedStore,
    LibraryRepository, LibrarySnapshot, ReadingSession, RepositoryError, SeedStore,
};
pub use tracker::{
    BookAdded, BookRemoved, NewBook, Progress, ReadingTracker, ReadingTrackerBuilder,
    SessionCompleted,
};
