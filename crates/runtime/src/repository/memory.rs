//! In-memory repository implementations for tests and ephemeral runs.

use std::sync::RwLock;

use super::{LibraryRepository, LibrarySnapshot, RepositoryError, Result, SeedStore};

/// In-memory seed store.
#[derive(Debug, Default)]
pub struct InMemorySeedStore {
    seed: RwLock<Option<String>>,
}

impl InMemorySeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a seed already stored.
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: RwLock::new(Some(seed.into())),
        }
    }
}

impl SeedStore for InMemorySeedStore {
    fn get(&self) -> Result<Option<String>> {
        let seed = self.seed.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(seed.clone())
    }

    fn set(&self, value: &str) -> Result<()> {
        let mut seed = self
            .seed
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *seed = Some(value.to_string());
        Ok(())
    }
}

/// In-memory library repository.
///
/// Counts saves so tests can assert that unchanged state is not rewritten.
#[derive(Debug, Default)]
pub struct InMemoryLibraryRepo {
    snapshot: RwLock<Option<LibrarySnapshot>>,
    saves: RwLock<usize>,
}

impl InMemoryLibraryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: LibrarySnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
            saves: RwLock::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.read().map(|saves| *saves).unwrap_or(0)
    }
}

impl LibraryRepository for InMemoryLibraryRepo {
    fn load(&self) -> Result<Option<LibrarySnapshot>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshot.clone())
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<()> {
        let mut current = self
            .snapshot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *current = Some(snapshot.clone());

        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *saves += 1;
        Ok(())
    }
}

impl<R: LibraryRepository + ?Sized> LibraryRepository for std::sync::Arc<R> {
    fn load(&self) -> Result<Option<LibrarySnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}

impl<S: SeedStore + ?Sized> SeedStore for std::sync::Arc<S> {
    fn get(&self) -> Result<Option<String>> {
        (**self).get()
    }

    fn set(&self, seed: &str) -> Result<()> {
        (**self).set(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_store_round_trip() {
        let store = InMemorySeedStore::new();
        assert_eq!(store.get().unwrap(), None);

        store.set("cafe").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("cafe"));
    }

    #[test]
    fn library_repo_counts_saves() {
        let repo = InMemoryLibraryRepo::new();
        assert!(repo.load().unwrap().is_none());

        let snapshot = LibrarySnapshot {
            onboarded: true,
            ..Default::default()
        };
        repo.save(&snapshot).unwrap();
        repo.save(&snapshot).unwrap();

        assert_eq!(repo.load().unwrap(), Some(snapshot));
        assert_eq!(repo.save_count(), 2);
    }
}
