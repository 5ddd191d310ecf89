//! Reading tracker orchestrator.
//!
//! The tracker owns the reader's seed, library, character and pet, applies
//! events through the engine, keeps the pet in step after every change, and
//! persists the snapshot only when something actually changed.

use chrono::{DateTime, Utc};
use companion_core::{
    BaseTraits, Book, BookId, CharacterLayers, CharacterState, CharacterTraits, Genre,
    GenreCount, Library, Pet, PetStage, Seed, compute_character_layers,
    compute_genre_distribution, rebuild_character,
};

use crate::clock::{Clock, SystemClock};
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::{
    FileLibraryRepository, FileSeedStore, InMemoryLibraryRepo, InMemorySeedStore,
    LibraryRepository, LibrarySnapshot, ReadingSession, SeedStore,
};

/// A book about to be logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub cover_reference: Option<String>,
    pub themes: Vec<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, genre: Genre) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre,
            cover_reference: None,
            themes: Vec::new(),
        }
    }

    /// A book described by catalogue subjects; the genre is inferred from
    /// them and the subjects are kept as themes.
    pub fn from_subjects<S: AsRef<str>>(
        title: impl Into<String>,
        author: impl Into<String>,
        subjects: &[S],
    ) -> Self {
        Self {
            themes: subjects.iter().map(|s| s.as_ref().to_string()).collect(),
            ..Self::new(title, author, Genre::infer_from_subjects(subjects))
        }
    }

    pub fn with_cover(mut self, cover_reference: impl Into<String>) -> Self {
        self.cover_reference = Some(cover_reference.into());
        self
    }
}

/// Level and stage movement caused by one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub previous_level: u32,
    pub current_level: u32,
    pub previous_stage: PetStage,
    pub current_stage: PetStage,
    /// Pet stage or traits changed.
    pub pet_evolved: bool,
}

impl Progress {
    pub fn leveled_up(&self) -> bool {
        self.current_level > self.previous_level
    }

    pub fn stage_changed(&self) -> bool {
        self.current_stage != self.previous_stage
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookAdded {
    pub book: Book,
    pub progress: Progress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookRemoved {
    pub book: Book,
    pub progress: Progress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCompleted {
    pub session: ReadingSession,
    pub progress: Progress,
}

/// Everything the tracker persists besides the seed.
#[derive(Clone, Debug)]
struct ReaderState {
    library: Library,
    character: CharacterState,
    pet: Pet,
    sessions: Vec<ReadingSession>,
    onboarded: bool,
}

impl ReaderState {
    /// Evolves the pet against the current character; true if it changed.
    fn evolve_pet(&mut self, now: DateTime<Utc>) -> bool {
        let evolution = self
            .pet
            .clone()
            .evolve_if_needed(&self.character, self.library.as_slice(), now);

        if evolution.did_evolve && evolution.pet.stage != evolution.previous_stage {
            tracing::info!(
                "Pet {} evolved: {} -> {}",
                evolution.pet.name,
                evolution.previous_stage,
                evolution.pet.stage
            );
        }

        self.pet = evolution.pet;
        evolution.did_evolve
    }

    fn snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            books: self.library.clone(),
            character: Some(self.character.clone()),
            pet: Some(self.pet.clone()),
            sessions: self.sessions.clone(),
            onboarded: self.onboarded,
        }
    }
}

/// Orchestrates one reader's state.
///
/// Every event works on a copy of the current state and swaps it in only
/// once the snapshot is saved. A failed save leaves the tracker as it was,
/// so the same call can simply be retried.
pub struct ReadingTracker {
    seed: Seed,
    state: ReaderState,

    seeds: Box<dyn SeedStore>,
    repository: Box<dyn LibraryRepository>,
    clock: Box<dyn Clock>,
}

impl ReadingTracker {
    pub fn builder() -> ReadingTrackerBuilder {
        ReadingTrackerBuilder::new()
    }

    /// Opens a tracker on the given stores with the system clock.
    pub fn open(
        seeds: impl SeedStore + 'static,
        repository: impl LibraryRepository + 'static,
    ) -> Result<Self> {
        Self::builder()
            .seed_store(seeds)
            .repository(repository)
            .open()
    }

    /// Opens a tracker backed by the stores `config` selects.
    ///
    /// Persistent configs need a data directory; the CLI resolves a platform
    /// default before calling this.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        if !config.persist {
            tracing::info!("Persistence disabled; using in-memory stores");
            return Self::open(InMemorySeedStore::new(), InMemoryLibraryRepo::new());
        }

        let data_dir = config
            .data_dir
            .as_ref()
            .ok_or(RuntimeError::MissingDataDir)?;

        tracing::info!("Using data directory {}", data_dir.display());
        Self::open(
            FileSeedStore::new(data_dir)?,
            FileLibraryRepository::new(data_dir)?,
        )
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn library(&self) -> &Library {
        &self.state.library
    }

    pub fn character(&self) -> &CharacterState {
        &self.state.character
    }

    pub fn pet(&self) -> &Pet {
        &self.state.pet
    }

    /// Completed sessions, oldest first.
    pub fn sessions(&self) -> &[ReadingSession] {
        &self.state.sessions
    }

    pub fn is_onboarded(&self) -> bool {
        self.state.onboarded
    }

    /// Genres that train the reader's weakest attribute.
    pub fn recommendations(&self) -> Vec<Genre> {
        self.state.character.recommend_genres()
    }

    pub fn genre_distribution(&self) -> Vec<GenreCount> {
        compute_genre_distribution(self.state.library.as_slice())
    }

    /// Layered avatar for the current seed and library.
    pub fn avatar(&self) -> CharacterLayers {
        let base = BaseTraits::derive(&self.seed);
        compute_character_layers(&self.seed, &base, self.state.library.as_slice())
    }

    pub fn character_traits(&self) -> CharacterTraits {
        CharacterTraits::derive(&self.seed)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Logs a book and reports whether the reader leveled up.
    pub fn add_book(&mut self, new_book: NewBook) -> Result<BookAdded> {
        let now = self.clock.now();
        let before = &self.state.character;

        let mut book = Book::new(new_book.title, new_book.author, new_book.genre, now)
            .with_themes(new_book.themes);
        book.cover_reference = new_book.cover_reference;

        let after = before.apply_book(&book);
        book.attribute_impact = after.impact_since(before);
        let previous_level = before.current_level;

        let mut next = self.state.clone();
        next.library.push(book.clone());
        next.character = after;
        let progress = self.settle(next, previous_level)?;

        tracing::info!(
            "Logged book {} ({}): +{} points",
            book.id,
            book.genre,
            book.attribute_impact.values().sum::<u32>()
        );
        Ok(BookAdded { book, progress })
    }

    /// Removes a book and rebuilds the character from the remaining history.
    ///
    /// The rebuild replays books only: points earned through reading
    /// sessions are not recovered, and the pet may move back a stage.
    pub fn remove_book(&mut self, id: BookId) -> Result<BookRemoved> {
        let mut next = self.state.clone();
        let book = next
            .library
            .remove(id)
            .ok_or(RuntimeError::BookNotFound(id))?;

        let previous_level = next.character.current_level;
        next.character = rebuild_character(&next.library);
        let remaining = next.library.len();
        let progress = self.settle(next, previous_level)?;

        tracing::info!(
            "Removed book {}; rebuilt character from {} books",
            book.id,
            remaining
        );
        Ok(BookRemoved { book, progress })
    }

    /// Records a finished reading session of `duration_seconds`.
    pub fn complete_session(&mut self, duration_seconds: u64) -> Result<SessionCompleted> {
        let now = self.clock.now();
        let before = &self.state.character;
        let after = before.apply_reading_session(duration_seconds);

        let session = ReadingSession::new(duration_seconds, now, after.impact_since(before));
        let previous_level = before.current_level;

        let mut next = self.state.clone();
        next.sessions.push(session.clone());
        next.character = after;
        let progress = self.settle(next, previous_level)?;

        tracing::info!(
            "Completed {}s reading session: +{} points",
            duration_seconds,
            session.attribute_gains.values().sum::<u32>()
        );
        Ok(SessionCompleted { session, progress })
    }

    /// Renames the pet. Surrounding whitespace is trimmed.
    pub fn rename_pet(&mut self, name: &str) -> Result<&Pet> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RuntimeError::EmptyPetName);
        }

        if self.state.pet.name != name {
            let mut next = self.state.clone();
            next.pet = next.pet.renamed(name);
            self.commit(next)?;
            tracing::info!("Pet renamed to {}", name);
        }

        Ok(&self.state.pet)
    }

    /// Replaces the reader's seed with a fresh one.
    ///
    /// The avatar is re-derived from the new seed. The pet keeps the seed it
    /// hatched with, so its look and name are unaffected.
    pub fn reset_identity(&mut self) -> Result<&Seed> {
        let seed = Seed::generate();
        self.seeds.set(seed.as_str())?;
        self.seed = seed;

        tracing::info!("Reader identity reset");
        Ok(&self.seed)
    }

    /// Marks onboarding as done. Idempotent.
    pub fn complete_onboarding(&mut self) -> Result<()> {
        if !self.state.onboarded {
            let mut next = self.state.clone();
            next.onboarded = true;
            self.commit(next)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Evolves the pet in `next` and commits it.
    ///
    /// Callers pass a state whose library, character or sessions changed, so
    /// a save is always due.
    fn settle(&mut self, mut next: ReaderState, previous_level: u32) -> Result<Progress> {
        let previous_stage = next.pet.stage;
        let pet_evolved = next.evolve_pet(self.clock.now());

        let progress = Progress {
            previous_level,
            current_level: next.character.current_level,
            previous_stage,
            current_stage: next.pet.stage,
            pet_evolved,
        };

        self.commit(next)?;

        if progress.leveled_up() {
            tracing::info!(
                "Character leveled up: {} -> {}",
                progress.previous_level,
                progress.current_level
            );
        }
        Ok(progress)
    }

    /// Saves `next` and makes it current; on error nothing changes.
    fn commit(&mut self, next: ReaderState) -> Result<()> {
        if let Err(err) = self.repository.save(&next.snapshot()) {
            tracing::warn!("Save failed, keeping previous state: {}", err);
            return Err(err.into());
        }
        self.state = next;
        Ok(())
    }
}

/// Builder for [`ReadingTracker`].
pub struct ReadingTrackerBuilder {
    seeds: Option<Box<dyn SeedStore>>,
    repository: Option<Box<dyn LibraryRepository>>,
    clock: Box<dyn Clock>,
}

impl ReadingTrackerBuilder {
    fn new() -> Self {
        Self {
            seeds: None,
            repository: None,
            clock: Box::new(SystemClock),
        }
    }

    /// Seed storage; in-memory if not set.
    pub fn seed_store(mut self, seeds: impl SeedStore + 'static) -> Self {
        self.seeds = Some(Box::new(seeds));
        self
    }

    /// Snapshot storage; in-memory if not set.
    pub fn repository(mut self, repository: impl LibraryRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Loads stored state and brings it up to date.
    ///
    /// - A missing or blank seed is replaced by a generated one, persisted
    ///   immediately.
    /// - The stored character is used as-is; it is rebuilt from the books
    ///   only when missing.
    /// - A missing pet is hatched; an existing one is evolved.
    ///
    /// The snapshot is written only if one of those steps changed it.
    pub fn open(self) -> Result<ReadingTracker> {
        let seeds = self
            .seeds
            .unwrap_or_else(|| Box::new(InMemorySeedStore::new()));
        let repository = self
            .repository
            .unwrap_or_else(|| Box::new(InMemoryLibraryRepo::new()));
        let clock = self.clock;

        let seed = load_seed(seeds.as_ref())?;
        let snapshot = repository.load()?.unwrap_or_default();
        let mut dirty = false;

        let character = match snapshot.character {
            Some(character) => character,
            None => {
                dirty = true;
                rebuild_character(&snapshot.books)
            }
        };

        let (pet, hatched) = match snapshot.pet {
            Some(pet) => (pet, false),
            None => {
                let pet = Pet::hatch(&seed, &character, snapshot.books.as_slice(), None, clock.now());
                tracing::info!("Hatched pet {} ({})", pet.name, pet.stage);
                (pet, true)
            }
        };
        dirty |= hatched;

        let mut state = ReaderState {
            library: snapshot.books,
            character,
            pet,
            sessions: snapshot.sessions,
            onboarded: snapshot.onboarded,
        };
        dirty |= state.evolve_pet(clock.now());
        if dirty {
            repository.save(&state.snapshot())?;
        }

        tracing::info!(
            "Opened tracker: {} books, level {}, pet {} ({})",
            state.library.len(),
            state.character.current_level,
            state.pet.name,
            state.pet.stage
        );

        let tracker = ReadingTracker {
            seed,
            state,
            seeds,
            repository,
            clock,
        };
        Ok(tracker)
    }
}

fn load_seed(seeds: &dyn SeedStore) -> Result<Seed> {
    if let Some(raw) = seeds.get()? {
        match Seed::new(raw) {
            Ok(seed) => return Ok(seed),
            Err(_) => tracing::warn!("Stored seed is blank; generating a new identity"),
        }
    }

    let seed = Seed::generate();
    seeds.set(seed.as_str())?;
    tracing::info!("Generated new reader seed");
    Ok(seed)
}
