//! Genres and their visual registry.
//!
//! The genre set is closed. Each genre owns one fixed visual entry (color,
//! equipment slot, label) that both the avatar and the pet read. The table is
//! a `const fn` match, so it cannot be mutated at runtime.

use core::str::FromStr;

use crate::book::Book;
use crate::error::{EngineError, Result};

/// Book genre.
///
/// `Other` is the fallback for anything the catalog cannot classify.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Genre {
    Fiction,
    #[strum(to_string = "Non-Fiction")]
    #[cfg_attr(feature = "serde", serde(rename = "Non-Fiction"))]
    NonFiction,
    Mystery,
    #[strum(to_string = "Science Fiction")]
    #[cfg_attr(feature = "serde", serde(rename = "Science Fiction"))]
    ScienceFiction,
    Fantasy,
    Biography,
    History,
    #[strum(to_string = "Self-Help")]
    #[cfg_attr(feature = "serde", serde(rename = "Self-Help"))]
    SelfHelp,
    Philosophy,
    Poetry,
    Romance,
    Thriller,
    Other,
}

/// Equipment slot a genre occupies on the avatar.
#[derive(
    Clone,
    Copy,
    Debug,
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
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipmentSlot {
    Hat,
    Cloak,
    Held,
    Companion,
    Aura,
    Face,
}

/// Registry entry for one genre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenreVisual {
    pub color: &'static str,
    pub slot: EquipmentSlot,
    pub label: &'static str,
}

impl GenreVisual {
    const fn new(color: &'static str, slot: EquipmentSlot, label: &'static str) -> Self {
        Self { color, slot, label }
    }
}

/// Subject keywords used to classify catalog results, scanned in order.
const GENRE_KEYWORDS: &[(&str, Genre)] = &[
    ("fiction", Genre::Fiction),
    ("novel", Genre::Fiction),
    ("non-fiction", Genre::NonFiction),
    ("nonfiction", Genre::NonFiction),
    ("mystery", Genre::Mystery),
    ("detective", Genre::Mystery),
    ("science fiction", Genre::ScienceFiction),
    ("sci-fi", Genre::ScienceFiction),
    ("fantasy", Genre::Fantasy),
    ("biography", Genre::Biography),
    ("autobiography", Genre::Biography),
    ("memoir", Genre::Biography),
    ("history", Genre::History),
    ("historical", Genre::History),
    ("self-help", Genre::SelfHelp),
    ("self help", Genre::SelfHelp),
    ("philosophy", Genre::Philosophy),
    ("poetry", Genre::Poetry),
    ("poems", Genre::Poetry),
    ("romance", Genre::Romance),
    ("love", Genre::Romance),
    ("thriller", Genre::Thriller),
    ("suspense", Genre::Thriller),
];

impl Genre {
    /// Visual registry entry for this genre.
    pub const fn visual(self) -> GenreVisual {
        use EquipmentSlot::*;

        match self {
            Genre::Fiction => GenreVisual::new("#9B7EBD", Cloak, "Story Cloak"),
            Genre::NonFiction => GenreVisual::new("#7BA3B8", Held, "Tome"),
            Genre::Mystery => GenreVisual::new("#6B6B8D", Hat, "Detective Hat"),
            Genre::ScienceFiction => GenreVisual::new("#A8D8EA", Face, "Tech Visor"),
            Genre::Fantasy => GenreVisual::new("#E8B86D", Hat, "Wizard Hat"),
            Genre::Biography => GenreVisual::new("#C9A9E0", Held, "Quill"),
            Genre::History => GenreVisual::new("#A8C5A0", Cloak, "Scholar Robe"),
            Genre::SelfHelp => GenreVisual::new("#8BC5A7", Aura, "Growth Aura"),
            Genre::Philosophy => GenreVisual::new("#B8A9D4", Companion, "Owl"),
            Genre::Poetry => GenreVisual::new("#F4A6D7", Hat, "Flower Crown"),
            Genre::Romance => GenreVisual::new("#D8A7B1", Companion, "Heart"),
            Genre::Thriller => GenreVisual::new("#C97070", Face, "Scar"),
            Genre::Other => GenreVisual::new("#B5B5B8", Held, "Scroll"),
        }
    }

    /// Parses a genre label, failing on anything outside the enumeration.
    pub fn parse(label: &str) -> Result<Self> {
        Self::from_str(label.trim()).map_err(|_| EngineError::UnknownGenre(label.to_string()))
    }

    /// Classifies a catalog record from its free-text subjects.
    ///
    /// The first subject containing any keyword decides; keywords are tried
    /// in table order. Unclassifiable records fall back to [`Genre::Other`].
    pub fn infer_from_subjects<S: AsRef<str>>(subjects: &[S]) -> Self {
        subjects
            .iter()
            .map(|subject| subject.as_ref().to_lowercase())
            .find_map(|subject| {
                GENRE_KEYWORDS
                    .iter()
                    .find(|(keyword, _)| subject.contains(keyword))
                    .map(|(_, genre)| *genre)
            })
            .unwrap_or(Genre::Other)
    }
}

/// One row of a library's genre distribution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenreCount {
    pub genre: Genre,
    pub count: usize,
    /// `count / total`, in `(0, 1]`.
    pub ratio: f64,
    pub visual: GenreVisual,
}

/// Counts genres across `books`, most frequent first.
///
/// Ties keep first-seen order, so the result is deterministic for a fixed
/// book list. An empty library yields an empty distribution.
pub fn compute_genre_distribution(books: &[Book]) -> Vec<GenreCount> {
    distribution_of(books.iter().map(|book| book.genre))
}

pub(crate) fn distribution_of(genres: impl IntoIterator<Item = Genre>) -> Vec<GenreCount> {
    let mut counts: Vec<(Genre, usize)> = Vec::new();
    let mut total = 0usize;

    for genre in genres {
        total += 1;
        match counts.iter_mut().find(|(seen, _)| *seen == genre) {
            Some((_, count)) => *count += 1,
            None => counts.push((genre, 1)),
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre,
            count,
            ratio: count as f64 / total as f64,
            visual: genre.visual(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn registry_covers_every_genre() {
        assert_eq!(Genre::COUNT, 13);
        for genre in Genre::iter() {
            let visual = genre.visual();
            assert!(visual.color.starts_with('#'));
            assert!(!visual.label.is_empty());
        }
        assert_eq!(Genre::Fantasy.visual().slot, EquipmentSlot::Hat);
        assert_eq!(Genre::Fiction.visual().slot, EquipmentSlot::Cloak);
        assert_eq!(Genre::Philosophy.visual().label, "Owl");
    }

    #[test]
    fn labels_round_trip_through_display() {
        for genre in Genre::iter() {
            assert_eq!(Genre::parse(&genre.to_string()), Ok(genre));
        }
        assert_eq!(Genre::ScienceFiction.as_ref(), "Science Fiction");
        assert_eq!(Genre::parse("self-help"), Ok(Genre::SelfHelp));
    }

    #[test]
    fn unknown_label_fails_fast() {
        assert_eq!(
            Genre::parse("Cookbooks"),
            Err(EngineError::UnknownGenre("Cookbooks".into()))
        );
    }

    #[test]
    fn distribution_sorts_by_count_and_keeps_first_seen_on_ties() {
        use Genre::*;
        let dist = distribution_of([Poetry, Fantasy, Fantasy, Mystery, Poetry, Fantasy]);

        let order: Vec<_> = dist.iter().map(|g| (g.genre, g.count)).collect();
        assert_eq!(order, vec![(Fantasy, 3), (Poetry, 2), (Mystery, 1)]);
        assert!((dist[0].ratio - 0.5).abs() < f64::EPSILON);

        let tied = distribution_of([Romance, History, History, Romance]);
        assert_eq!(tied[0].genre, Romance);
        assert_eq!(tied[1].genre, History);
    }

    #[test]
    fn empty_library_has_empty_distribution() {
        assert!(compute_genre_distribution(&[]).is_empty());
    }

    #[test]
    fn subjects_infer_first_matching_genre() {
        assert_eq!(
            Genre::infer_from_subjects(&["Dragons", "Epic FANTASY"]),
            Genre::Fantasy
        );
        assert_eq!(
            Genre::infer_from_subjects(&["Detective and mystery stories"]),
            Genre::Mystery
        );
        // "fiction" is tried before the longer keywords that contain it
        assert_eq!(
            Genre::infer_from_subjects(&["Science fiction"]),
            Genre::Fiction
        );
        assert_eq!(Genre::infer_from_subjects(&["Memoirs"]), Genre::Biography);
        assert_eq!(Genre::infer_from_subjects::<&str>(&[]), Genre::Other);
        assert_eq!(Genre::infer_from_subjects(&["Cooking"]), Genre::Other);
    }
}
