//! Attribute and leveling engine.
//!
//! # Layers
//!
//! ```text
//! [ Genre impact table ]  fixed reference data
//!      ↓
//! [ Attributes ]          7 values clamped to [0, 100]
//!      ↓
//! [ Character level ]     floor(sum / 100) + 1
//!      ↓
//! [ Visual traits ]       append-only unlocks and aura
//! ```
//!
//! Every operation takes `&CharacterState` and returns a new state. Books are
//! replayed oldest-first when rebuilding from history; see
//! [`rebuild_character`].

mod attribute;
mod progression;
mod state;

pub use attribute::{Attribute, AttributeImpact, AttributeKind};
pub use progression::{genre_impact, initialize_character, rebuild_character};
pub use state::{Accessory, Aura, CharacterState, VisualTraits};
