use std::collections::BTreeMap;

use super::attribute::{Attribute, AttributeImpact, AttributeKind};
use crate::config::EngineConfig;

/// Character-wide accessory unlocked by level.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase")]
pub enum Accessory {
    Hat,
    Book,
    Glasses,
}

impl Accessory {
    /// Unlocks in the order they are earned.
    const UNLOCKS: [(u32, Accessory); 3] = [
        (EngineConfig::HAT_UNLOCK_LEVEL, Accessory::Hat),
        (EngineConfig::BOOK_UNLOCK_LEVEL, Accessory::Book),
        (EngineConfig::GLASSES_UNLOCK_LEVEL, Accessory::Glasses),
    ];
}

/// Glow drawn around the character; ordered from weakest to strongest.
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
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
#[strum(serialize_all = "kebab-case")]
pub enum Aura {
    #[default]
    None,
    SoftGlow,
    Radiant,
    Ethereal,
}

impl Aura {
    /// Aura earned at `level`.
    pub const fn for_level(level: u32) -> Self {
        if level >= EngineConfig::ETHEREAL_LEVEL {
            Aura::Ethereal
        } else if level >= EngineConfig::RADIANT_LEVEL {
            Aura::Radiant
        } else if level >= EngineConfig::SOFT_GLOW_LEVEL {
            Aura::SoftGlow
        } else {
            Aura::None
        }
    }
}

/// Level-driven cosmetics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct VisualTraits {
    pub base_color: String,
    /// Unlock order, no duplicates.
    pub accessories: Vec<Accessory>,
    pub aura: Aura,
}

impl Default for VisualTraits {
    fn default() -> Self {
        Self {
            base_color: EngineConfig::DEFAULT_BASE_COLOR.to_string(),
            accessories: Vec::new(),
            aura: Aura::None,
        }
    }
}

impl VisualTraits {
    /// Moves the traits forward to `level`.
    ///
    /// Accessories are append-only and the aura never drops. A rebuild starts
    /// from fresh traits, so a smaller library can still show less.
    pub fn advanced_to(&self, level: u32) -> Self {
        let mut accessories = self.accessories.clone();
        for (min_level, accessory) in Accessory::UNLOCKS {
            if level >= min_level && !accessories.contains(&accessory) {
                accessories.push(accessory);
            }
        }

        Self {
            base_color: self.base_color.clone(),
            accessories,
            aura: self.aura.max(Aura::for_level(level)),
        }
    }
}

/// Accumulated reading progress for one reader.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CharacterState {
    pub attributes: BTreeMap<AttributeKind, Attribute>,
    pub total_books_read: u32,
    pub total_reading_time_seconds: u64,
    pub current_level: u32,
    pub visual_traits: VisualTraits,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterState {
    /// A brand new character: every attribute at 0/100, level 1.
    pub fn new() -> Self {
        Self {
            attributes: AttributeKind::ALL
                .into_iter()
                .map(|kind| (kind, Attribute::new(kind)))
                .collect(),
            total_books_read: 0,
            total_reading_time_seconds: 0,
            current_level: 1,
            visual_traits: VisualTraits::default(),
        }
    }

    /// Current value of one attribute.
    pub fn value(&self, kind: AttributeKind) -> u32 {
        self.attributes.get(&kind).map_or(0, |attr| attr.value)
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.get(&kind)
    }

    /// Sum of all attribute values.
    pub fn total_points(&self) -> u32 {
        self.attributes.values().map(|attr| attr.value).sum()
    }

    /// Character level for a summed attribute total.
    pub const fn level_for(total_points: u32) -> u32 {
        total_points / EngineConfig::POINTS_PER_CHARACTER_LEVEL + 1
    }

    /// Attributes strongest first; equal values keep canonical order.
    pub fn ranked(&self) -> Vec<&Attribute> {
        let mut ranked: Vec<&Attribute> = self.attributes.values().collect();
        ranked.sort_by(|a, b| b.value.cmp(&a.value));
        ranked
    }

    /// Weakest attribute; ties resolve to the earliest in canonical order.
    pub fn weakest(&self) -> Option<AttributeKind> {
        self.attributes
            .values()
            .min_by_key(|attr| attr.value)
            .map(|attr| attr.kind)
    }

    /// Strictly positive per-attribute gains since `before`.
    ///
    /// This is what a book or session records as its impact; attributes that
    /// were already capped record nothing.
    pub fn impact_since(&self, before: &CharacterState) -> AttributeImpact {
        self.attributes
            .iter()
            .filter_map(|(kind, attr)| {
                let gained = attr.value.saturating_sub(before.value(*kind));
                (gained > 0).then_some((*kind, gained))
            })
            .collect()
    }
}
