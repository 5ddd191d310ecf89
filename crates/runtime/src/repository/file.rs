//! File-based repository implementations.
//!
//! Layout under the data directory:
//! ```text
//! {data_dir}/
//!   seed           plain text, one line
//!   library.json   pretty-printed LibrarySnapshot
//! ```
//!
//! Writes go to a sibling `.tmp` file first and are renamed into place, so a
//! crash mid-write never leaves a truncated document behind.

use std::fs;
use std::path::{Path, PathBuf};

use super::{LibraryRepository, LibrarySnapshot, RepositoryError, Result, SeedStore};

const SEED_FILE: &str = "seed";
const LIBRARY_FILE: &str = "library.json";

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Seed stored as a one-line text file.
pub struct FileSeedStore {
    path: PathBuf,
}

impl FileSeedStore {
    /// Opens the store in `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(SEED_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedStore for FileSeedStore {
    fn get(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)?;
        tracing::debug!("Loaded seed from {}", self.path.display());
        Ok(Some(raw.trim().to_string()))
    }

    fn set(&self, seed: &str) -> Result<()> {
        write_atomic(&self.path, format!("{seed}\n").as_bytes())?;
        tracing::debug!("Saved seed to {}", self.path.display());
        Ok(())
    }
}

/// Library snapshot stored as one JSON document.
pub struct FileLibraryRepository {
    path: PathBuf,
}

impl FileLibraryRepository {
    /// Opens the repository in `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(LIBRARY_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryRepository for FileLibraryRepository {
    fn load(&self) -> Result<Option<LibrarySnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Err(RepositoryError::CorruptedData(format!(
                "{} is empty",
                self.path.display()
            )));
        }

        let snapshot: LibrarySnapshot =
            serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!(
            "Loaded library snapshot from {} ({} books)",
            self.path.display(),
            snapshot.books.len()
        );

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        write_atomic(&self.path, json.as_bytes())?;

        tracing::debug!(
            "Saved library snapshot to {} ({} books)",
            self.path.display(),
            snapshot.books.len()
        );

        Ok(())
    }
}
