/// Engine constants.
///
/// These are reference data, not tunables: changing any of them changes every
/// value derived from history the next time a library is rebuilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig;

impl EngineConfig {
    // ===== attributes & leveling =====
    /// Cap for every attribute value.
    pub const MAX_ATTRIBUTE_VALUE: u32 = 100;
    /// Attribute value span covered by one attribute level.
    pub const ATTRIBUTE_LEVEL_STEP: u32 = 20;
    /// Summed attribute points per character level.
    pub const POINTS_PER_CHARACTER_LEVEL: u32 = 100;
    /// Reading sessions award half a point per minute.
    pub const SESSION_SECONDS_PER_POINT: u64 = 120;

    // ===== visual unlocks =====
    pub const HAT_UNLOCK_LEVEL: u32 = 5;
    pub const BOOK_UNLOCK_LEVEL: u32 = 10;
    pub const GLASSES_UNLOCK_LEVEL: u32 = 15;
    pub const SOFT_GLOW_LEVEL: u32 = 8;
    pub const RADIANT_LEVEL: u32 = 16;
    pub const ETHEREAL_LEVEL: u32 = 25;
    pub const DEFAULT_BASE_COLOR: &'static str = "#FFDAB9";

    // ===== recommendations =====
    pub const MAX_RECOMMENDATIONS: usize = 3;
    pub const RECOMMENDATION_MIN_WEIGHT: u32 = 7;

    // ===== avatar =====
    /// Books of one genre needed for a fully saturated equipment layer.
    pub const FULL_INTENSITY_BOOKS: usize = 5;
    pub const AVATAR_LEVEL_CURVE: f64 = 3.5;
    pub const AVATAR_MAX_LEVEL: u32 = 20;
    pub const NEUTRAL_COLOR: &'static str = "#D4D0C8";

    // ===== pet =====
    pub const HATCHLING_LEVEL: u32 = 4;
    pub const ADULT_LEVEL: u32 = 8;
    /// Library size from which the dominant genre may grant a pet accessory.
    pub const PET_ACCESSORY_MIN_BOOKS: usize = 2;
}
