use core::str::FromStr;
use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Per-attribute point gains, keyed in declaration order.
pub type AttributeImpact = BTreeMap<AttributeKind, u32>;

/// The seven traits reading develops.
///
/// Declaration order is the canonical iteration order; it breaks ties when
/// looking for the weakest attribute.
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
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AttributeKind {
    Wisdom,
    Curiosity,
    Empathy,
    Imagination,
    Focus,
    Creativity,
    Resilience,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 7] = [
        AttributeKind::Wisdom,
        AttributeKind::Curiosity,
        AttributeKind::Empathy,
        AttributeKind::Imagination,
        AttributeKind::Focus,
        AttributeKind::Creativity,
        AttributeKind::Resilience,
    ];

    pub const fn color(self) -> &'static str {
        match self {
            AttributeKind::Wisdom => "#9B7EBD",
            AttributeKind::Curiosity => "#A8D8EA",
            AttributeKind::Empathy => "#D8A7B1",
            AttributeKind::Imagination => "#E8B86D",
            AttributeKind::Focus => "#A8C5A0",
            AttributeKind::Creativity => "#F4A6D7",
            AttributeKind::Resilience => "#C9A9E0",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            AttributeKind::Wisdom => "🦉",
            AttributeKind::Curiosity => "🔍",
            AttributeKind::Empathy => "💖",
            AttributeKind::Imagination => "✨",
            AttributeKind::Focus => "🎯",
            AttributeKind::Creativity => "🎨",
            AttributeKind::Resilience => "🛡️",
        }
    }

    /// Parses an attribute name, failing on anything outside the enumeration.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name.trim()).map_err(|_| EngineError::UnknownAttribute(name.to_string()))
    }
}

/// One attribute's accumulated value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub value: u32,
    pub max_value: u32,
    pub level: u32,
}

impl Attribute {
    /// A fresh attribute at zero.
    pub const fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            value: 0,
            max_value: EngineConfig::MAX_ATTRIBUTE_VALUE,
            level: Self::level_for(0),
        }
    }

    /// Attribute level for a value: `floor(value / 20) + 1`.
    pub const fn level_for(value: u32) -> u32 {
        value / EngineConfig::ATTRIBUTE_LEVEL_STEP + 1
    }

    /// Adds points, clamping at `max_value`, and returns the points actually
    /// gained.
    pub fn add(&mut self, points: u32) -> u32 {
        let before = self.value;
        self.value = self.value.saturating_add(points).min(self.max_value);
        self.level = Self::level_for(self.value);
        self.value - before
    }

    pub const fn is_capped(&self) -> bool {
        self.value >= self.max_value
    }

    pub const fn color(&self) -> &'static str {
        self.kind.color()
    }

    pub const fn icon(&self) -> &'static str {
        self.kind.icon()
    }
}
