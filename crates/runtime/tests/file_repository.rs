//! File-backed stores and tracker persistence across restarts.

use std::fs;

use companion_core::{Genre, PetStage};
use companion_runtime::{
    FileLibraryRepository, FileSeedStore, LibraryRepository, LibrarySnapshot, NewBook,
    ReadingTracker, RepositoryError, RuntimeConfig, RuntimeError, SeedStore,
};
use tempfile::TempDir;

fn setup() -> TempDir {
    TempDir::new().unwrap()
}

#[test]
fn seed_file_round_trip() {
    let temp = setup();
    let store = FileSeedStore::new(temp.path()).unwrap();
    assert_eq!(store.get().unwrap(), None);

    store.set("0123456789abcdef").unwrap();
    assert_eq!(store.get().unwrap().as_deref(), Some("0123456789abcdef"));
    assert!(store.path().exists());
    assert!(!temp.path().join("seed.tmp").exists());
}

#[test]
fn snapshot_round_trip() {
    let temp = setup();
    let repo = FileLibraryRepository::new(temp.path().join("nested")).unwrap();
    assert!(repo.load().unwrap().is_none());

    let snapshot = LibrarySnapshot {
        onboarded: true,
        ..Default::default()
    };
    repo.save(&snapshot).unwrap();

    assert_eq!(repo.load().unwrap(), Some(snapshot));
    assert!(!temp.path().join("nested").join("library.tmp").exists());
}

#[test]
fn corrupt_snapshot_is_reported() {
    let temp = setup();
    let repo = FileLibraryRepository::new(temp.path()).unwrap();

    fs::write(repo.path(), "{ not json").unwrap();
    assert!(matches!(repo.load(), Err(RepositoryError::Json(_))));

    fs::write(repo.path(), "").unwrap();
    assert!(matches!(repo.load(), Err(RepositoryError::CorruptedData(_))));
}

#[test]
fn snapshot_uses_product_spellings() {
    let temp = setup();
    let config = RuntimeConfig::default().with_data_dir(temp.path());
    let mut tracker = ReadingTracker::from_config(&config).unwrap();
    tracker
        .add_book(NewBook::new("Foundation", "Isaac Asimov", Genre::ScienceFiction))
        .unwrap();

    let json = fs::read_to_string(temp.path().join("library.json")).unwrap();
    assert!(json.contains("\"Science Fiction\""));
    assert!(json.contains("\"dateAdded\""));
    assert!(json.contains("\"attributeImpact\""));
    assert!(json.contains("\"stage\": \"egg\""));
}

#[test]
fn tracker_state_survives_restart() {
    let temp = setup();
    let config = RuntimeConfig::default().with_data_dir(temp.path());

    let (seed, pet, character, book_id) = {
        let mut tracker = ReadingTracker::from_config(&config).unwrap();
        let added = tracker
            .add_book(NewBook::new("Ficciones", "Jorge Luis Borges", Genre::Fiction))
            .unwrap();
        tracker.complete_session(84_000).unwrap();
        tracker.rename_pet("Borges").unwrap();
        (
            tracker.seed().clone(),
            tracker.pet().clone(),
            tracker.character().clone(),
            added.book.id,
        )
    };

    let reopened = ReadingTracker::from_config(&config).unwrap();
    assert_eq!(reopened.seed(), &seed);
    assert_eq!(reopened.pet(), &pet);
    assert_eq!(reopened.pet().stage, PetStage::Adult);
    assert_eq!(reopened.character(), &character);
    assert_eq!(reopened.sessions().len(), 1);
    assert!(reopened.library().get(book_id).is_some());
}

#[test]
fn persistent_config_requires_a_directory() {
    let config = RuntimeConfig::default();
    assert!(matches!(
        ReadingTracker::from_config(&config),
        Err(RuntimeError::MissingDataDir)
    ));
}

#[test]
fn in_memory_config_touches_nothing() {
    let temp = setup();
    let config = RuntimeConfig {
        persist: false,
        ..RuntimeConfig::default().with_data_dir(temp.path())
    };

    let mut tracker = ReadingTracker::from_config(&config).unwrap();
    tracker
        .add_book(NewBook::new("Beloved", "Toni Morrison", Genre::Fiction))
        .unwrap();

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
