//! Pet evolution engine.
//!
//! The pet is a companion whose stage follows the reader's character level
//! and whose look mixes its own seed with the reader's taste:
//!
//! ```text
//! egg (level 1) → hatchling (level 4) → adult (level 8)
//! ```
//!
//! Stage and traits are never patched. [`Pet::evolve_if_needed`] recomputes
//! both from scratch and replaces them only when something differs, so it is
//! safe to call after every event and idempotent when nothing changed. A
//! rebuild after a book removal can legitimately move the pet back a stage.

use core::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::book::Book;
use crate::character::CharacterState;
use crate::config::EngineConfig;
use crate::genre::{EquipmentSlot, Genre, compute_genre_distribution};
use crate::seed::Seed;

const PET_PRIMARY_COLORS: &[&str] = &[
    "#9B7EBD", "#A8D8EA", "#D8A7B1", "#E8B86D", "#A8C5A0", "#F4A6D7", "#C9A9E0", "#7BA3B8",
    "#8BC5A7", "#B8A9D4",
];

const PET_SECONDARY_COLORS: &[&str] = &[
    "#F5EADB", "#E8F4F8", "#FCE8EC", "#FDF3E0", "#E8F0E8", "#FDE8F4", "#EDE0F4", "#E0EEF2",
    "#E0F0E4", "#EDE8F4",
];

const PET_NAMES: &[&str] = &[
    "Spark", "Ember", "Page", "Ink", "Tome", "Nimbus", "Whisper", "Glint", "Rune", "Fable",
];

/// Pet life stage.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PetStage {
    #[default]
    Egg,
    Hatchling,
    Adult,
}

impl PetStage {
    /// Minimum character level for each stage, ascending.
    pub const THRESHOLDS: [(PetStage, u32); 3] = [
        (PetStage::Egg, 1),
        (PetStage::Hatchling, EngineConfig::HATCHLING_LEVEL),
        (PetStage::Adult, EngineConfig::ADULT_LEVEL),
    ];

    pub const fn min_level(self) -> u32 {
        match self {
            PetStage::Egg => 1,
            PetStage::Hatchling => EngineConfig::HATCHLING_LEVEL,
            PetStage::Adult => EngineConfig::ADULT_LEVEL,
        }
    }

    /// Highest stage whose threshold `level` reaches.
    pub fn for_level(level: u32) -> Self {
        Self::THRESHOLDS
            .iter()
            .rev()
            .find(|(_, min_level)| level >= *min_level)
            .map_or(PetStage::Egg, |(stage, _)| *stage)
    }

    /// Stage for a character; depends on nothing but `current_level`.
    pub fn of(character: &CharacterState) -> Self {
        Self::for_level(character.current_level)
    }
}

/// Accessory the dominant genre may grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase")]
pub enum PetAccessory {
    Hat,
    Scarf,
    Glasses,
}

impl PetAccessory {
    /// Only a curated subset of genres grants anything.
    fn for_genre(genre: Genre) -> Option<Self> {
        match genre.visual().slot {
            EquipmentSlot::Hat => Some(PetAccessory::Hat),
            EquipmentSlot::Cloak => Some(PetAccessory::Scarf),
            _ if genre == Genre::Philosophy => Some(PetAccessory::Glasses),
            _ => None,
        }
    }
}

/// Pet look. Always derived, never edited.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PetTraits {
    /// 0 blob, 1 quadruped, 2 winged.
    pub body_type: u8,
    pub primary_color: String,
    pub secondary_color: String,
    /// 0 none, 1 spots, 2 stripes.
    pub marking_style: u8,
    /// 0..=3
    pub eye_style: u8,
    /// 0..=2
    pub mouth_style: u8,
    pub accessory: Option<PetAccessory>,
}

impl PetTraits {
    /// Derives traits from the pet's seed and the reader's books.
    ///
    /// Shape and face come from the seed alone. The primary color follows the
    /// dominant genre once any book is logged; the secondary color stays
    /// seed-derived.
    pub fn compute(seed: &Seed, books: &[Book]) -> Self {
        let dominant = compute_genre_distribution(books)
            .first()
            .map(|entry| entry.genre);

        let primary_color = match dominant {
            Some(genre) => genre.visual().color,
            None => *seed.pick_from("pet_primary", PET_PRIMARY_COLORS),
        };

        let accessory = dominant
            .filter(|_| books.len() >= EngineConfig::PET_ACCESSORY_MIN_BOOKS)
            .and_then(PetAccessory::for_genre);

        Self {
            body_type: seed.pick("pet_body", 3) as u8,
            primary_color: primary_color.to_string(),
            secondary_color: seed.pick_from("pet_secondary", PET_SECONDARY_COLORS).to_string(),
            marking_style: seed.pick("pet_markings", 3) as u8,
            eye_style: seed.pick("pet_eyes", 4) as u8,
            mouth_style: seed.pick("pet_mouth", 3) as u8,
            accessory,
        }
    }
}

/// Stable pet identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PetId(pub Uuid);

impl PetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The reader's companion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Pet {
    pub id: PetId,
    /// Identity of the pet itself; survives a reader's identity reset.
    pub seed: Seed,
    pub name: String,
    pub stage: PetStage,
    pub traits: PetTraits,
    pub created_at: DateTime<Utc>,
    /// Last time stage or traits actually changed.
    pub last_evolved_at: DateTime<Utc>,
}

/// Result of [`Pet::evolve_if_needed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evolution {
    pub pet: Pet,
    pub did_evolve: bool,
    pub previous_stage: PetStage,
}

impl Pet {
    /// Creates the pet for a reader.
    pub fn hatch(
        seed: &Seed,
        character: &CharacterState,
        books: &[Book],
        id: Option<PetId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.unwrap_or_default(),
            seed: seed.clone(),
            name: Self::default_name(seed).to_string(),
            stage: PetStage::of(character),
            traits: PetTraits::compute(seed, books),
            created_at: now,
            last_evolved_at: now,
        }
    }

    /// Deterministic name for a fresh pet.
    pub fn default_name(seed: &Seed) -> &'static str {
        *seed.pick_from("pet_name", PET_NAMES)
    }

    /// Re-derives stage and traits, replacing them only if they differ.
    ///
    /// When nothing changed the same pet comes back untouched with
    /// `did_evolve == false`, so callers can skip persistence. Identity,
    /// name and creation time always survive.
    pub fn evolve_if_needed(
        self,
        character: &CharacterState,
        books: &[Book],
        now: DateTime<Utc>,
    ) -> Evolution {
        let previous_stage = self.stage;
        let stage = PetStage::of(character);
        let traits = PetTraits::compute(&self.seed, books);

        if stage == self.stage && traits == self.traits {
            return Evolution {
                pet: self,
                did_evolve: false,
                previous_stage,
            };
        }

        Evolution {
            pet: Pet {
                stage,
                traits,
                last_evolved_at: now,
                ..self
            },
            did_evolve: true,
            previous_stage,
        }
    }

    /// Replaces the name. Blank names are the caller's to reject.
    pub fn renamed(self, name: impl Into<String>) -> Pet {
        Pet {
            name: name.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Library;
    use crate::character::{initialize_character, rebuild_character};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn seed() -> Seed {
        Seed::new("abc123").unwrap()
    }

    fn library(genres: &[Genre]) -> Library {
        genres
            .iter()
            .enumerate()
            .map(|(i, genre)| Book::new("t", "a", *genre, t0() + Duration::minutes(i as i64)))
            .collect()
    }

    #[test]
    fn stage_thresholds() {
        assert_eq!(PetStage::for_level(1), PetStage::Egg);
        assert_eq!(PetStage::for_level(3), PetStage::Egg);
        assert_eq!(PetStage::for_level(4), PetStage::Hatchling);
        assert_eq!(PetStage::for_level(7), PetStage::Hatchling);
        assert_eq!(PetStage::for_level(8), PetStage::Adult);
        assert_eq!(PetStage::for_level(30), PetStage::Adult);
        assert_eq!(PetStage::Hatchling.min_level(), 4);
    }

    #[test]
    fn stage_depends_only_on_level() {
        // level 4 via twenty fantasy books vs. via reading sessions
        let by_books = rebuild_character(&library(&[Genre::Fantasy; 20]));
        let by_sessions = initialize_character().apply_reading_session(36_120);
        assert_eq!(by_books.current_level, 4);
        assert_eq!(by_sessions.current_level, 4);
        assert_ne!(by_books.attributes, by_sessions.attributes);
        assert_eq!(PetStage::of(&by_books), PetStage::of(&by_sessions));
        assert_eq!(PetStage::of(&by_books), PetStage::Hatchling);
    }

    #[test]
    fn single_fantasy_book_leaves_an_egg() {
        let books = library(&[Genre::Fantasy]);
        let character = rebuild_character(&books);
        let pet = Pet::hatch(&seed(), &character, books.as_slice(), None, t0());

        assert_eq!(pet.stage, PetStage::Egg);
        assert_eq!(pet.traits.primary_color, "#E8B86D");
        assert_eq!(pet.traits.accessory, None);
        assert_eq!(pet.created_at, pet.last_evolved_at);
        assert!(PET_NAMES.contains(&pet.name.as_str()));
        assert_eq!(pet.name, Pet::default_name(&seed()));
    }

    #[test]
    fn default_name_is_fixed_per_seed() {
        let name: &'static str = Pet::default_name(&Seed::new("abc123").unwrap());
        assert_eq!(name, "Glint");
    }

    #[test]
    fn empty_library_uses_seed_palette() {
        let traits = PetTraits::compute(&seed(), &[]);
        assert!(PET_PRIMARY_COLORS.contains(&traits.primary_color.as_str()));
        assert!(PET_SECONDARY_COLORS.contains(&traits.secondary_color.as_str()));
        assert!(traits.body_type < 3);
        assert!(traits.marking_style < 3);
        assert!(traits.eye_style < 4);
        assert!(traits.mouth_style < 3);
        assert_eq!(traits.accessory, None);
    }

    #[test]
    fn seed_traits_survive_reading() {
        let empty = PetTraits::compute(&seed(), &[]);
        let read = PetTraits::compute(&seed(), library(&[Genre::Poetry; 4]).as_slice());
        assert_eq!(empty.body_type, read.body_type);
        assert_eq!(empty.marking_style, read.marking_style);
        assert_eq!(empty.eye_style, read.eye_style);
        assert_eq!(empty.secondary_color, read.secondary_color);
        assert_eq!(read.primary_color, Genre::Poetry.visual().color);
    }

    #[test]
    fn accessory_follows_dominant_genre() {
        let accessory = |genres: &[Genre]| {
            PetTraits::compute(&seed(), library(genres).as_slice()).accessory
        };

        assert_eq!(accessory(&[Genre::Fantasy, Genre::Fantasy]), Some(PetAccessory::Hat));
        assert_eq!(accessory(&[Genre::History, Genre::Fiction, Genre::History]), Some(PetAccessory::Scarf));
        assert_eq!(accessory(&[Genre::Philosophy, Genre::Philosophy]), Some(PetAccessory::Glasses));
        assert_eq!(accessory(&[Genre::Romance, Genre::Romance]), None);
        assert_eq!(accessory(&[Genre::ScienceFiction, Genre::Other]), None);
        assert_eq!(accessory(&[Genre::Mystery]), None);
    }

    #[test]
    fn evolution_is_idempotent() {
        let books = library(&[Genre::Fantasy; 20]);
        let egg = Pet::hatch(&seed(), &initialize_character(), &[], None, t0());
        let character = rebuild_character(&books);

        let later = t0() + Duration::days(3);
        let first = egg.clone().evolve_if_needed(&character, books.as_slice(), later);
        assert!(first.did_evolve);
        assert_eq!(first.previous_stage, PetStage::Egg);
        assert_eq!(first.pet.stage, PetStage::Hatchling);
        assert_eq!(first.pet.last_evolved_at, later);
        assert_eq!(first.pet.id, egg.id);
        assert_eq!(first.pet.name, egg.name);
        assert_eq!(first.pet.created_at, egg.created_at);

        let evolved = first.pet.clone();
        let second = first
            .pet
            .evolve_if_needed(&character, books.as_slice(), later + Duration::days(1));
        assert!(!second.did_evolve);
        assert_eq!(second.pet, evolved);
    }

    #[test]
    fn trait_change_alone_triggers_evolution() {
        let character = initialize_character();
        let pet = Pet::hatch(&seed(), &character, &[], None, t0());
        let books = library(&[Genre::Thriller]);

        let evolution = pet.evolve_if_needed(&character, books.as_slice(), t0() + Duration::hours(1));
        assert!(evolution.did_evolve);
        assert_eq!(evolution.pet.stage, PetStage::Egg);
        assert_eq!(evolution.pet.traits.primary_color, "#C97070");
    }

    #[test]
    fn removing_the_only_book_regresses_an_adult() {
        // sessions cap every attribute: level 8, adult
        let capped = initialize_character().apply_reading_session(84_000);
        let mut books = library(&[Genre::Poetry]);
        let character = capped.apply_book(&books.as_slice()[0]);
        let adult = Pet::hatch(&seed(), &character, books.as_slice(), None, t0());
        assert_eq!(adult.stage, PetStage::Adult);

        let id = books.as_slice()[0].id;
        books.remove(id);
        let rebuilt = rebuild_character(&books);
        assert_eq!(rebuilt.current_level, 1);

        let evolution = adult.evolve_if_needed(&rebuilt, books.as_slice(), t0() + Duration::days(1));
        assert!(evolution.did_evolve);
        assert_eq!(evolution.previous_stage, PetStage::Adult);
        assert_eq!(evolution.pet.stage, PetStage::Egg);
    }

    #[test]
    fn rename_keeps_everything_else() {
        let pet = Pet::hatch(&seed(), &initialize_character(), &[], Some(PetId::new()), t0());
        let renamed = pet.clone().renamed("Quill");
        assert_eq!(renamed.name, "Quill");
        assert_eq!(renamed.id, pet.id);
        assert_eq!(renamed.traits, pet.traits);
        assert_eq!(renamed.last_evolved_at, pet.last_evolved_at);
    }

    #[test]
    fn same_seed_same_pet_look() {
        let books = library(&[Genre::History, Genre::Poetry]);
        assert_eq!(
            PetTraits::compute(&seed(), books.as_slice()),
            PetTraits::compute(&seed(), books.as_slice())
        );
    }
}
