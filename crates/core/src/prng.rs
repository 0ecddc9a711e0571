//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! The random source is an explicit value rather than ambient global state:
//! the pipeline-wide instance lives in the [`ExecutionContext`](crate::context::ExecutionContext),
//! and units with their own `seed` parameter build a private instance so that
//! editing one unit's seed never perturbs another unit's randomness.
//!
//! Same seed always produces the same sequence on every platform (pure integer
//! arithmetic in the core step, one exact division for the float conversion).

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xorshift64 {
    seed: u64,
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift algorithm.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { Self::FALLBACK_SEED } else { seed };
        Self { seed, state }
    }

    /// The seed this instance was constructed with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewinds the stream to its first value.
    pub fn restart(&mut self) {
        *self = Self::new(self.seed);
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0 (division by zero in modulo).
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }

    /// Advances the stream by `count` draws without using the values.
    ///
    /// Units call this for a branch they skip, so every later draw keeps the
    /// same position in the sequence whether the branch is active or not.
    pub fn discard(&mut self, count: usize) {
        for _ in 0..count {
            self.next_u64();
        }
    }
}
