//! Deterministic, sub-stream-addressable random source.
//!
//! Every draw is derived on demand from the master seed plus a structured
//! [`StreamKey`]; no generator state is retained between calls. Two draws
//! with the same key therefore return the same value, and draws on unrelated
//! keys are independent of call order. Callers make a key unique per logical
//! draw by varying the turn number or the entity slug; the scheduler does
//! this by construction.
//!
//! # Determinism
//!
//! All derivation is fixed-width integer arithmetic: SHA-256 over the seed
//! string, an FNV-style fold of the key bytes, a SplitMix64-style avalanche,
//! and a single PCG-XSH-RR output step. The only float operation is the
//! final division by 2^32, which is exact for every 32-bit input, so the
//! same seed and version yield the same sequence on every platform.

use core::fmt;

use sha2::{Digest, Sha256};

use crate::error::{CoreError, ErrorSeverity};

/// Structured sub-stream identifier.
///
/// Encoded as `"{mechanic}:{entity}:turn:{turn}"`, e.g.
/// `"event:funding_crisis:turn:12"`. The type exists so that every draw
/// site names its mechanic, entity, and turn; free-form key strings (and
/// the accidental collisions they invite) are not accepted by the public
/// API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StreamKey<'a> {
    /// Game mechanic owning the draw (e.g. `"event"`, `"staff"`).
    pub mechanic: &'a str,
    /// Entity within the mechanic (e.g. an event id).
    pub entity: &'a str,
    /// Turn number, which keeps repeated draws for the same entity distinct.
    pub turn: u64,
}

impl<'a> StreamKey<'a> {
    pub fn new(mechanic: &'a str, entity: &'a str, turn: u64) -> Self {
        Self {
            mechanic,
            entity,
            turn,
        }
    }

    /// Canonical textual encoding, also used as the stream name when a draw
    /// is recorded in the verification chain.
    pub fn encode(&self) -> String {
        format!("{}:{}:turn:{}", self.mechanic, self.entity, self.turn)
    }
}

impl fmt::Display for StreamKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:turn:{}", self.mechanic, self.entity, self.turn)
    }
}

/// Errors surfaced by the RNG operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RngError {
    #[error("cannot sample {requested} distinct elements from {available}")]
    SampleTooLarge { requested: usize, available: usize },
}

impl CoreError for RngError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SampleTooLarge { .. } => "rng.sample_too_large",
        }
    }
}

/// Seed-keyed deterministic random source partitioned into named sub-streams.
///
/// Constructed once per session from the opaque seed string and the version
/// string; both participate in master seed derivation so that a balance
/// version bump re-keys every stream.
#[derive(Clone, Copy, Debug)]
pub struct DeterministicRng {
    master: u64,
}

impl DeterministicRng {
    /// PCG multiplier constant (PCG-XSH-RR).
    const PCG_MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const PCG_INCREMENT: u64 = 1442695040888963407;

    /// FNV-1a 64-bit prime, used to fold key bytes into the master seed.
    const KEY_FOLD_PRIME: u64 = 0x100000001b3;

    /// Derives the master seed from the session seed and version strings.
    ///
    /// SHA-256 keeps string hashing independent of the platform's hasher;
    /// the NUL separator keeps `("ab", "c")` and `("a", "bc")` distinct.
    pub fn new(seed: &str, version: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed.as_bytes());
        hasher.update([0u8]);
        hasher.update(version.as_bytes());
        let digest = hasher.finalize();

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        Self {
            master: u64::from_be_bytes(word),
        }
    }

    /// Draws a value in `[0, 1)` from the sub-stream named by `key`.
    ///
    /// Exactly one generator step; the same key always yields the same
    /// value. Callers vary `key.turn` (or a per-call counter in the entity
    /// slug) to obtain fresh draws.
    pub fn draw(&self, key: StreamKey<'_>) -> f64 {
        self.draw_encoded(&key.encode())
    }

    /// Draws once and maps the result onto an element of `items`.
    ///
    /// The index is `floor(draw * len)`, clamped to the last element.
    /// Returns `None` for an empty slice.
    pub fn choose<'s, T>(&self, key: StreamKey<'_>, items: &'s [T]) -> Option<&'s T> {
        if items.is_empty() {
            return None;
        }
        let index = Self::scale_to_index(self.draw(key), items.len());
        Some(&items[index])
    }

    /// Selects `k` distinct elements from `items`, preserving determinism
    /// regardless of how the caller's containers iterate.
    ///
    /// Draw `i` uses the sub-stream `"{key}:{i}"` and removes one entry from
    /// an explicit index list. Selection never mutates the input slice, so
    /// there is no live-container mutation during sampling.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::SampleTooLarge`] when `k > items.len()`; asking
    /// for more distinct elements than exist is a caller logic error.
    pub fn sample_without_replacement<'s, T>(
        &self,
        key: StreamKey<'_>,
        items: &'s [T],
        k: usize,
    ) -> Result<Vec<&'s T>, RngError> {
        if k > items.len() {
            return Err(RngError::SampleTooLarge {
                requested: k,
                available: items.len(),
            });
        }

        let encoded = key.encode();
        let mut remaining: Vec<usize> = (0..items.len()).collect();
        let mut picked = Vec::with_capacity(k);
        for draw_index in 0..k {
            let value = self.draw_encoded(&format!("{encoded}:{draw_index}"));
            let slot = Self::scale_to_index(value, remaining.len());
            picked.push(&items[remaining.remove(slot)]);
        }
        Ok(picked)
    }

    /// Exposes the raw derived sub-stream seed.
    ///
    /// For components (per-entity name generators, map decoration) that need
    /// their own independent deterministic source keyed off the master seed.
    pub fn derive_seed(&self, key: StreamKey<'_>) -> u64 {
        self.derive_from_bytes(key.encode().as_bytes())
    }

    fn draw_encoded(&self, encoded: &str) -> f64 {
        let seed = self.derive_from_bytes(encoded.as_bytes());
        let output = Self::pcg_output(Self::pcg_step(seed));
        // Exact conversion: every u32 / 2^32 is representable in an f64.
        f64::from(output) / 4_294_967_296.0
    }

    /// Folds key bytes into the master seed, then avalanches.
    ///
    /// The fold is FNV-1a over the encoded key starting from the master
    /// seed; the avalanche is the SplitMix64 finalizer, which spreads
    /// single-byte key differences across all 64 bits.
    fn derive_from_bytes(&self, bytes: &[u8]) -> u64 {
        let mut hash = self.master;
        for &byte in bytes {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(Self::KEY_FOLD_PRIME);
        }

        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        hash
    }

    /// Advance the PCG state by one LCG step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::PCG_MULTIPLIER)
            .wrapping_add(Self::PCG_INCREMENT)
    }

    /// PCG XSH-RR output permutation: xorshift high bits, random rotate.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    #[inline]
    fn scale_to_index(value: f64, len: usize) -> usize {
        ((value * len as f64) as usize).min(len - 1)
    }
}
