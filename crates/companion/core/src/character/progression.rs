use strum::IntoEnumIterator;

use super::attribute::AttributeKind;
use super::state::CharacterState;
use crate::book::{Book, Library};
use crate::config::EngineConfig;
use crate::genre::Genre;

/// What reading a genre develops.
///
/// Single source of truth for attribute gains. Editing it retroactively
/// changes every character rebuilt from history.
pub const fn genre_impact(genre: Genre) -> &'static [(AttributeKind, u32)] {
    use AttributeKind::*;

    match genre {
        Genre::Fiction => &[(Imagination, 8), (Empathy, 6), (Creativity, 5)],
        Genre::NonFiction => &[(Wisdom, 10), (Curiosity, 7), (Focus, 5)],
        Genre::Mystery => &[(Focus, 9), (Curiosity, 7), (Wisdom, 4)],
        Genre::ScienceFiction => &[(Imagination, 9), (Curiosity, 8), (Creativity, 6)],
        Genre::Fantasy => &[(Imagination, 10), (Creativity, 8), (Empathy, 5)],
        Genre::Biography => &[(Wisdom, 8), (Empathy, 7), (Resilience, 6)],
        Genre::History => &[(Wisdom, 9), (Curiosity, 6), (Focus, 5)],
        Genre::SelfHelp => &[(Wisdom, 7), (Resilience, 9), (Focus, 6)],
        Genre::Philosophy => &[(Wisdom, 10), (Curiosity, 8), (Focus, 7)],
        Genre::Poetry => &[(Creativity, 10), (Empathy, 8), (Imagination, 7)],
        Genre::Romance => &[(Empathy, 10), (Imagination, 6), (Creativity, 5)],
        Genre::Thriller => &[(Focus, 9), (Resilience, 7), (Curiosity, 6)],
        Genre::Other => &[(Wisdom, 5), (Curiosity, 5), (Focus, 5)],
    }
}

fn impact_weight(genre: Genre, kind: AttributeKind) -> u32 {
    genre_impact(genre)
        .iter()
        .find(|(attr, _)| *attr == kind)
        .map_or(0, |(_, points)| *points)
}

/// A new character with every attribute at zero.
pub fn initialize_character() -> CharacterState {
    CharacterState::new()
}

/// Recomputes a character from scratch by replaying every book oldest-first.
///
/// This is the consistency path after a removal (or when no character was
/// persisted): it never subtracts, so it cannot drift. Reading-session
/// points are not part of the book history and are not replayed.
pub fn rebuild_character(library: &Library) -> CharacterState {
    library
        .replay()
        .fold(initialize_character(), |character, book| {
            character.apply_book(book)
        })
}

impl CharacterState {
    /// Applies one logged book.
    pub fn apply_book(&self, book: &Book) -> CharacterState {
        let mut next = self.apply_genre(book.genre);
        next.total_books_read += 1;
        next
    }

    fn apply_genre(&self, genre: Genre) -> CharacterState {
        let mut next = self.clone();
        for &(kind, points) in genre_impact(genre) {
            if let Some(attr) = next.attributes.get_mut(&kind) {
                attr.add(points);
            }
        }
        next.refresh_level();
        next.visual_traits = next.visual_traits.advanced_to(next.current_level);
        next
    }

    /// Applies a completed reading session.
    ///
    /// Sessions earn half a point per minute, split evenly across all seven
    /// attributes. The division remainder is dropped, so sessions shorter
    /// than 14 minutes change no attribute. Visual traits only move when a
    /// book is logged.
    pub fn apply_reading_session(&self, duration_seconds: u64) -> CharacterState {
        let total_points = duration_seconds / EngineConfig::SESSION_SECONDS_PER_POINT;
        let per_attribute = total_points / AttributeKind::ALL.len() as u64;
        let per_attribute = u32::try_from(per_attribute).unwrap_or(u32::MAX);

        let mut next = self.clone();
        if per_attribute > 0 {
            for attr in next.attributes.values_mut() {
                attr.add(per_attribute);
            }
        }
        next.total_reading_time_seconds = next
            .total_reading_time_seconds
            .saturating_add(duration_seconds);
        next.refresh_level();
        next
    }

    /// Up to three genres that train the weakest attribute hardest.
    pub fn recommend_genres(&self) -> Vec<Genre> {
        let Some(weakest) = self.weakest() else {
            return Vec::new();
        };

        Genre::iter()
            .filter(|genre| impact_weight(*genre, weakest) >= EngineConfig::RECOMMENDATION_MIN_WEIGHT)
            .take(EngineConfig::MAX_RECOMMENDATIONS)
            .collect()
    }

    fn refresh_level(&mut self) {
        self.current_level = Self::level_for(self.total_points());
    }
}
