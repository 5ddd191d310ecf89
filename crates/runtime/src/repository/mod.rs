//! Repository layer for reader data.
//!
//! Two independent stores back a tracker:
//! - the seed store holds the reader's identity token
//! - the library repository holds the snapshot (books, cached character,
//!   pet, session history)
//!
//! Everything derivable (avatar layers, pet traits, recommendations) is
//! recomputed on demand and never stored separately.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileLibraryRepository, FileSeedStore};
pub use memory::{InMemoryLibraryRepo, InMemorySeedStore};
pub use traits::{LibraryRepository, SeedStore};
pub use types::{LibrarySnapshot, ReadingSession};
