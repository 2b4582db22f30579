//! Seed handling for reproducible map generation.
//!
//! A seed is always a string. It is hashed with 64-bit FNV-1a and the hash
//! seeds a ChaCha8 generator, so the same string yields the same stream of
//! draws on every platform.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::warn;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Range (in seconds) of the clock jitter added to time-derived seeds
pub const JITTER_SECONDS: std::ops::Range<u64> = 1..60;

/// Hash a seed string into a 64-bit value using FNV-1a
pub fn hash_seed(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Where the seed for a run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// Use the given string as is
    Fixed(String),
    /// Derive a fresh string from the current time
    Random,
}

impl SeedSource {
    pub fn new(seed: &str, use_random_seed: bool) -> Self {
        if use_random_seed {
            SeedSource::Random
        } else {
            SeedSource::Fixed(seed.to_string())
        }
    }

    /// Resolve against the system clock, drawing the jitter from the thread RNG
    pub fn resolve(&self) -> ResolvedSeed {
        let jitter = rand::thread_rng().gen_range(JITTER_SECONDS);
        self.resolve_at(SystemTime::now(), jitter)
    }

    /// Resolve against an explicit clock reading and jitter
    ///
    /// Time-derived seeds are the whole seconds since the Unix epoch of
    /// `now + jitter_secs`, written in decimal. A clock set before the epoch
    /// gives a negative count.
    pub fn resolve_at(&self, now: SystemTime, jitter_secs: u64) -> ResolvedSeed {
        match self {
            SeedSource::Fixed(text) => ResolvedSeed::from_text(text.clone()),
            SeedSource::Random => {
                let jitter = Duration::from_secs(jitter_secs);
                let shifted = now.checked_add(jitter).unwrap_or(now);
                let secs: i64 = match shifted.duration_since(UNIX_EPOCH) {
                    Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                    Err(err) => {
                        let before = err.duration().as_secs();
                        warn!(seconds = before, "system clock is before the Unix epoch");
                        i64::try_from(before).map_or(i64::MIN, |s| -s)
                    }
                };
                ResolvedSeed::from_text(secs.to_string())
            }
        }
    }
}

/// The seed actually used by a run, kept so the run can be repeated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedSeed {
    pub text: String,
    pub value: u64,
}

impl ResolvedSeed {
    pub fn from_text(text: String) -> Self {
        let value = hash_seed(&text);
        ResolvedSeed { text, value }
    }

    /// Create the generator that drives the fill stage
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.value)
    }
}
