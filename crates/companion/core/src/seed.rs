//! Identity seeds and deterministic value derivation.
//!
//! A seed is a 128-bit hex token generated once per reader. Every visual
//! trait is picked from it through [`seed_value`], which hashes
//! `"{seed}:{key}"` into `[0, 1)`. Distinct keys give independent-looking
//! values from the same seed, and the hash is stable across platforms and
//! runs for identical input bytes.
//!
//! # Determinism
//!
//! Nothing here keeps hidden state. The same seed and key always produce the
//! same value; only [`generate_seed`] reads entropy.

use core::fmt;

use rand::RngCore;

use crate::error::{EngineError, Result};

/// Number of random bytes in a generated seed (hex-encoded to 32 chars).
pub const SEED_BYTES: usize = 16;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Produces a fresh identity token: 16 random bytes as lowercase hex.
pub fn generate_seed() -> String {
    generate_seed_with(&mut rand::thread_rng())
}

/// Produces an identity token from the given entropy source.
pub fn generate_seed_with<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; SEED_BYTES];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hashes a string into `[0, 1)`.
///
/// FNV-1a folds in each byte, a murmur-style finalizer mixes the high bits,
/// and the unsigned 32-bit result is divided by 2^32.
pub fn hash_to_number(input: &str) -> f64 {
    let mut hash = input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    });

    hash ^= hash >> 16;
    hash = hash.wrapping_mul(0x85eb_ca6b);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(0xc2b2_ae35);
    hash ^= hash >> 16;

    f64::from(hash) / 4_294_967_296.0
}

/// Derives the value for `key` from `seed`: `hash_to_number("{seed}:{key}")`.
pub fn seed_value(seed: &str, key: &str) -> f64 {
    let mut input = String::with_capacity(seed.len() + key.len() + 1);
    input.push_str(seed);
    input.push(':');
    input.push_str(key);
    hash_to_number(&input)
}

/// A validated, non-empty identity seed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Seed(String);

impl Seed {
    /// Wraps an existing token, rejecting blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EngineError::EmptySeed);
        }
        Ok(Self(raw))
    }

    /// Generates a fresh random seed.
    pub fn generate() -> Self {
        Self(generate_seed())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derived value in `[0, 1)` for `key`.
    pub fn value(&self, key: &str) -> f64 {
        seed_value(&self.0, key)
    }

    /// Picks an index in `0..n` for `key`. `n` must be non-zero.
    pub fn pick(&self, key: &str, n: usize) -> usize {
        debug_assert!(n > 0, "cannot pick from an empty range");
        ((self.value(key) * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// Picks an element of a non-empty palette for `key`.
    pub fn pick_from<'a, T>(&self, key: &str, items: &'a [T]) -> &'a T {
        &items[self.pick(key, items.len())]
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Seed {
    type Error = EngineError;

    fn try_from(raw: String) -> Result<Self> {
        Self::new(raw)
    }
}

impl TryFrom<&str> for Seed {
    type Error = EngineError;

    fn try_from(raw: &str) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl AsRef<str> for Seed {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_value_is_deterministic() {
        for key in ["skin", "hair", "pet_body", "vertices"] {
            assert_eq!(seed_value("abc123", key), seed_value("abc123", key));
        }
        assert_eq!(hash_to_number(""), hash_to_number(""));
    }

    #[test]
    fn hash_matches_known_values() {
        // fixed outputs; any change here re-rolls every stored avatar
        assert_eq!(hash_to_number(""), f64::from(0xab3e_7c0b_u32) / 4_294_967_296.0);
        assert_eq!(
            seed_value("abc123", "pet_body"),
            f64::from(0x9d66_2b03_u32) / 4_294_967_296.0
        );
        assert_eq!(
            seed_value("abc123", "pet_name"),
            f64::from(0xc296_d1a3_u32) / 4_294_967_296.0
        );

        let seed = Seed::new("abc123").unwrap();
        assert_eq!(seed.pick("pet_body", 3), 1);
    }

    #[test]
    fn values_stay_in_unit_interval() {
        for i in 0..2_000 {
            let v = seed_value(&format!("seed-{i}"), "unit");
            assert!((0.0..1.0).contains(&v), "value {v} out of range");
        }
    }

    #[test]
    fn keys_and_order_change_the_value() {
        assert_ne!(seed_value("abc123", "skin"), seed_value("abc123", "hair"));
        assert_ne!(hash_to_number("ab"), hash_to_number("ba"));
    }

    #[test]
    fn three_way_pick_is_roughly_uniform() {
        let mut buckets = [0usize; 3];
        for i in 0..3_000 {
            let seed = Seed::new(format!("{i:032x}")).unwrap();
            buckets[seed.pick("pet_body", 3)] += 1;
        }
        for count in buckets {
            assert!(count > 750, "bucket too small: {buckets:?}");
        }
    }

    #[test]
    fn generated_seeds_are_hex_and_distinct() {
        let a = generate_seed();
        let b = generate_seed();
        assert_eq!(a.len(), SEED_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }

    #[test]
    fn blank_seed_is_rejected() {
        assert_eq!(Seed::new(""), Err(EngineError::EmptySeed));
        assert_eq!(Seed::new("   "), Err(EngineError::EmptySeed));
        assert!(Seed::new("abc123").is_ok());
    }

    #[test]
    fn pick_from_returns_palette_member() {
        let seed = Seed::new("abc123").unwrap();
        let palette = ["a", "b", "c", "d"];
        let picked = seed.pick_from("palette", &palette);
        assert!(palette.contains(picked));
        assert_eq!(picked, seed.pick_from("palette", &palette));
    }
}
