//! Repository contracts for saving and loading reader state.

use super::{LibrarySnapshot, Result};

/// Storage for the reader's seed.
///
/// The seed is written once, when first generated, and again only on an
/// explicit identity reset. Implementations store the raw string; validation
/// happens in the tracker.
pub trait SeedStore: Send + Sync {
    /// Returns the stored seed, if any.
    fn get(&self) -> Result<Option<String>>;

    /// Replaces the stored seed.
    fn set(&self, seed: &str) -> Result<()>;
}

/// Storage for the library snapshot.
pub trait LibraryRepository: Send + Sync {
    /// Loads the last saved snapshot; `None` for a new reader.
    fn load(&self) -> Result<Option<LibrarySnapshot>>;

    /// Replaces the saved snapshot.
    fn save(&self, snapshot: &LibrarySnapshot) -> Result<()>;
}
