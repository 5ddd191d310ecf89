//! Avatar trait derivation.
//!
//! An avatar has two halves:
//! - a seed-only baseline ("who you are") that never changes with reading,
//! - equipment layers, one per genre in the library ("what you read").
//!
//! Two renderings consume this: a geometric constellation driven by
//! [`BaseTraits`] and a humanoid figure driven by [`CharacterTraits`] plus
//! equipment. Both read from the same seed so they stay consistent.

use crate::book::Book;
use crate::config::EngineConfig;
use crate::genre::{EquipmentSlot, Genre, GenreCount, compute_genre_distribution};
use crate::seed::Seed;

pub const SKIN_TONES: &[&str] = &[
    "#FDDCB5", "#F5C7A1", "#E8B48A", "#D49B6A", "#C48558", "#A66E47", "#8B5E3C", "#6B4226",
    "#F5D6C3", "#F0E0D0",
];

pub const HAIR_COLORS: &[&str] = &[
    "#2C1810", "#4A3222", "#8B6240", "#D4A76A", "#F2D49B", "#C94A2A", "#9B4DCA", "#3D5A99",
    "#1E7B4E", "#E8E0D0",
];

pub const EYE_COLORS: &[&str] = &["#4A3222", "#2E5A3E", "#3D5A99", "#7B5CB0", "#8B6240", "#1A1A2E"];

/// Seed-only geometry for the constellation rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BaseTraits {
    /// Vertices of the core polygon, 3..=8.
    pub core_vertices: u8,
    /// Rotation offset in degrees, [0, 360).
    pub base_rotation: f64,
    /// Hue shift applied to genre colors, [-20, 20).
    pub hue_shift: f64,
    /// Inner pattern scale, [0.6, 1.0).
    pub inner_scale: f64,
    /// Line pattern angle in degrees, [0, 180).
    pub pattern_angle: f64,
}

impl BaseTraits {
    pub fn derive(seed: &Seed) -> Self {
        Self {
            core_vertices: 3 + seed.pick("vertices", 6) as u8,
            base_rotation: seed.value("rotation") * 360.0,
            hue_shift: (seed.value("hue") - 0.5) * 40.0,
            inner_scale: 0.6 + seed.value("scale") * 0.4,
            pattern_angle: seed.value("pattern") * 180.0,
        }
    }
}

/// Seed-only body and face for the humanoid rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct CharacterTraits {
    pub skin_tone: &'static str,
    pub hair_color: &'static str,
    pub eye_color: &'static str,
    /// 0 round, 1 oval, 2 square-ish.
    pub head_shape: u8,
    /// 0..=4
    pub hair_style: u8,
    /// 0..=3
    pub eye_style: u8,
    /// 0..=2
    pub mouth_style: u8,
}

impl CharacterTraits {
    /// Picks colors and style indices from the seed alone; books never move
    /// these.
    pub fn derive(seed: &Seed) -> Self {
        Self {
            skin_tone: *seed.pick_from("skin", SKIN_TONES),
            hair_color: *seed.pick_from("hair", HAIR_COLORS),
            eye_color: *seed.pick_from("eyes", EYE_COLORS),
            head_shape: seed.pick("headshape", 3) as u8,
            hair_style: seed.pick("hairstyle", 5) as u8,
            eye_style: seed.pick("eyestyle", 4) as u8,
            mouth_style: seed.pick("mouth", 3) as u8,
        }
    }
}

/// One genre's equipment on the avatar.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EquipmentLayer {
    pub slot: EquipmentSlot,
    pub genre: Genre,
    pub color: &'static str,
    pub label: &'static str,
    /// `min(count / 5, 1)`.
    pub intensity: f64,
}

impl EquipmentLayer {
    fn from_count(entry: &GenreCount) -> Self {
        Self {
            slot: entry.visual.slot,
            genre: entry.genre,
            color: entry.visual.color,
            label: entry.visual.label,
            intensity: (entry.count as f64 / EngineConfig::FULL_INTENSITY_BOOKS as f64).min(1.0),
        }
    }
}

/// Complete layered avatar description.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct CharacterLayers {
    pub base: BaseTraits,
    pub character: CharacterTraits,
    /// One layer per distinct genre, most-read first.
    pub equipment: Vec<EquipmentLayer>,
    pub dominant_genre: Option<Genre>,
    pub dominant_color: &'static str,
    pub book_count: usize,
    /// 0 means "no avatar yet", otherwise 1..=20.
    pub level: u32,
}

impl CharacterLayers {
    /// Layers that can actually render: one per slot.
    ///
    /// Where several genres share a slot, the most-read genre wins; equal
    /// counts keep distribution order.
    pub fn visible_equipment(&self) -> Vec<&EquipmentLayer> {
        let mut taken: Vec<EquipmentSlot> = Vec::new();
        self.equipment
            .iter()
            .filter(|layer| {
                if taken.contains(&layer.slot) {
                    false
                } else {
                    taken.push(layer.slot);
                    true
                }
            })
            .collect()
    }

    /// The visible layer for one slot.
    pub fn slot(&self, slot: EquipmentSlot) -> Option<&EquipmentLayer> {
        self.equipment.iter().find(|layer| layer.slot == slot)
    }

    /// True when the library is empty and nothing should be drawn yet.
    pub fn is_placeholder(&self) -> bool {
        self.level == 0
    }
}

/// Avatar level for a library size.
///
/// Logarithmic: `clamp(floor(log2(n + 1) * 3.5), 1, 20)`, and exactly 0 for
/// an empty library.
pub fn avatar_level(book_count: usize) -> u32 {
    if book_count == 0 {
        return 0;
    }
    let raw = ((book_count as f64 + 1.0).log2() * EngineConfig::AVATAR_LEVEL_CURVE).floor();
    (raw as u32).clamp(1, EngineConfig::AVATAR_MAX_LEVEL)
}

/// Combines the seed baseline with the library's equipment.
pub fn compute_character_layers(seed: &Seed, base: &BaseTraits, books: &[Book]) -> CharacterLayers {
    let distribution = compute_genre_distribution(books);
    let dominant = distribution.first();

    CharacterLayers {
        base: *base,
        character: CharacterTraits::derive(seed),
        equipment: distribution.iter().map(EquipmentLayer::from_count).collect(),
        dominant_genre: dominant.map(|entry| entry.genre),
        dominant_color: dominant.map_or(EngineConfig::NEUTRAL_COLOR, |entry| entry.visual.color),
        book_count: books.len(),
        level: avatar_level(books.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn seed() -> Seed {
        Seed::new("abc123").unwrap()
    }

    fn shelf(genres: &[Genre]) -> Vec<Book> {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        genres
            .iter()
            .enumerate()
            .map(|(i, genre)| Book::new("t", "a", *genre, start + Duration::minutes(i as i64)))
            .collect()
    }

    #[test]
    fn empty_library_is_level_zero_placeholder() {
        let seed = seed();
        let layers = compute_character_layers(&seed, &BaseTraits::derive(&seed), &[]);

        assert_eq!(layers.level, 0);
        assert!(layers.is_placeholder());
        assert!(layers.equipment.is_empty());
        assert_eq!(layers.dominant_genre, None);
        assert_eq!(layers.dominant_color, "#D4D0C8");
    }

    #[test]
    fn level_curve_is_logarithmic_and_clamped() {
        assert_eq!(avatar_level(0), 0);
        assert_eq!(avatar_level(1), 3);
        assert_eq!(avatar_level(7), 10);
        assert_eq!(avatar_level(1_000), 20);
        let mut previous = 0;
        for n in 1..200 {
            let level = avatar_level(n);
            assert!((1..=20).contains(&level));
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn base_traits_stay_in_range_and_repeat() {
        for i in 0..200 {
            let seed = Seed::new(format!("seed-{i}")).unwrap();
            let base = BaseTraits::derive(&seed);
            assert!((3..=8).contains(&base.core_vertices));
            assert!((0.0..360.0).contains(&base.base_rotation));
            assert!((-20.0..20.0).contains(&base.hue_shift));
            assert!((0.6..1.0).contains(&base.inner_scale));
            assert!((0.0..180.0).contains(&base.pattern_angle));
            assert_eq!(base, BaseTraits::derive(&seed));
        }
    }

    #[test]
    fn character_traits_ignore_books() {
        let seed = seed();
        let base = BaseTraits::derive(&seed);
        let none = compute_character_layers(&seed, &base, &[]);
        let some = compute_character_layers(&seed, &base, &shelf(&[Genre::Poetry, Genre::Fiction]));

        assert_eq!(none.character, some.character);
        assert!(SKIN_TONES.contains(&some.character.skin_tone));
        assert!(some.character.hair_style < 5);
        assert!(some.character.eye_style < 4);
    }

    #[test]
    fn one_layer_per_genre_with_capped_intensity() {
        let seed = seed();
        let books = shelf(&[
            Genre::Fantasy,
            Genre::Fantasy,
            Genre::Fantasy,
            Genre::Fantasy,
            Genre::Fantasy,
            Genre::Fantasy,
            Genre::Philosophy,
            Genre::Romance,
            Genre::Romance,
        ]);
        let layers = compute_character_layers(&seed, &BaseTraits::derive(&seed), &books);

        assert_eq!(layers.equipment.len(), 3);
        assert_eq!(layers.equipment[0].genre, Genre::Fantasy);
        assert_eq!(layers.equipment[0].intensity, 1.0);
        assert_eq!(layers.equipment[1].genre, Genre::Romance);
        assert!((layers.equipment[1].intensity - 0.4).abs() < 1e-9);
        assert!((layers.equipment[2].intensity - 0.2).abs() < 1e-9);
        assert_eq!(layers.dominant_genre, Some(Genre::Fantasy));
        assert_eq!(layers.dominant_color, "#E8B86D");
        assert_eq!(layers.book_count, 9);
    }

    #[test]
    fn contested_slot_goes_to_most_read_genre() {
        let seed = seed();
        // Mystery, Fantasy and Poetry all want the hat slot
        let books = shelf(&[
            Genre::Mystery,
            Genre::Poetry,
            Genre::Poetry,
            Genre::Fantasy,
            Genre::Poetry,
            Genre::Fantasy,
            Genre::Thriller,
        ]);
        let layers = compute_character_layers(&seed, &BaseTraits::derive(&seed), &books);

        assert_eq!(layers.equipment.len(), 4);
        let visible = layers.visible_equipment();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].genre, Genre::Poetry);
        assert_eq!(visible[0].slot, EquipmentSlot::Hat);
        assert_eq!(visible[1].slot, EquipmentSlot::Face);
        assert_eq!(layers.slot(EquipmentSlot::Hat).map(|l| l.genre), Some(Genre::Poetry));
        assert!(layers.slot(EquipmentSlot::Cloak).is_none());
    }

    #[test]
    fn layers_are_order_independent() {
        let seed = seed();
        let base = BaseTraits::derive(&seed);
        let forward = shelf(&[Genre::History, Genre::Poetry, Genre::Poetry]);
        let mut backward = forward.clone();
        backward.reverse();

        let a = compute_character_layers(&seed, &base, &forward);
        let b = compute_character_layers(&seed, &base, &backward);
        assert_eq!(a.dominant_genre, b.dominant_genre);
        assert_eq!(a.level, b.level);
        assert_eq!(a.equipment.len(), b.equipment.len());
    }
}
