use chrono::{DateTime, Utc};
use companion_core::{AttributeImpact, CharacterState, Library, Pet};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed reading session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSession {
    pub id: Uuid,
    pub duration_seconds: u64,
    pub date: DateTime<Utc>,
    /// Positive per-attribute deltas, frozen when the session completed.
    /// Usually empty for sessions under fourteen minutes.
    #[serde(default)]
    pub attribute_gains: AttributeImpact,
}

impl ReadingSession {
    pub fn new(duration_seconds: u64, date: DateTime<Utc>, attribute_gains: AttributeImpact) -> Self {
        Self {
            id: Uuid::new_v4(),
            duration_seconds,
            date,
            attribute_gains,
        }
    }
}

/// Everything persisted for one reader apart from the seed.
///
/// `books` is the source of truth. `character` is a cache that also carries
/// session points, which a rebuild from books cannot recover; when it is
/// missing the tracker rebuilds it. `pet` is missing only for a reader who
/// has never opened a tracker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub books: Library,
    #[serde(default)]
    pub character: Option<CharacterState>,
    #[serde(default)]
    pub pet: Option<Pet>,
    #[serde(default)]
    pub sessions: Vec<ReadingSession>,
    #[serde(default)]
    pub onboarded: bool,
}
