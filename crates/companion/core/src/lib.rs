//! Deterministic reading-companion engine.
//!
//! `companion-core` turns a stable identity seed, a library of books and the
//! accumulated character state into reproducible visual descriptions: an
//! avatar (seed-derived body plus per-genre equipment) and a pet that moves
//! through a small life cycle as the reader levels up.
//!
//! Every function here is pure. Callers own persistence and clocks; the
//! engine only reads its arguments and returns new values, so recomputing
//! from history and applying one event at a time always agree.
pub mod avatar;
pub mod book;
pub mod character;
pub mod config;
pub mod error;
pub mod genre;
pub mod pet;
pub mod seed;

pub use avatar::{
    BaseTraits, CharacterLayers, CharacterTraits, EquipmentLayer, avatar_level,
    compute_character_layers,
};
pub use book::{Book, BookId, Library};
pub use character::{
    Accessory, Attribute, AttributeImpact, AttributeKind, Aura, CharacterState, VisualTraits,
    genre_impact, initialize_character, rebuild_character,
};
pub use config::EngineConfig;
pub use error::{CompanionError, EngineError, ErrorSeverity, Result};
pub use genre::{EquipmentSlot, Genre, GenreCount, GenreVisual, compute_genre_distribution};
pub use pet::{Evolution, Pet, PetAccessory, PetId, PetStage, PetTraits};
pub use seed::{Seed, generate_seed, hash_to_number, seed_value};
