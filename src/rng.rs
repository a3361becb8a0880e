//! Deterministic Park–Miller generator used for angle jitter.

use serde::{Deserialize, Serialize};

/// Multiplier of the minimal-standard Lehmer recurrence.
pub const MULTIPLIER: u64 = 16807;

/// Modulus of the recurrence (2^31 - 1).
pub const MODULUS: u64 = 2_147_483_647;

/// A seedable multiplicative linear-congruential generator.
///
/// Each draw advances `seed = seed * 16807 mod 2147483647` and maps the new
/// state to `(seed - 1) / 2147483646`, so identical seeds reproduce identical
/// sequences on every platform.
///
/// Seed `0` is the default. It is a fixed point of the recurrence and always
/// yields `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Creates a generator positioned at the start of the sequence for `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Resets the sequence. This is the only way to rewind the generator.
    pub fn set_seed(&mut self, seed: u64) {
        self.state = seed % MODULUS;
    }

    /// Current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Returns the next value in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        self.state.saturating_sub(1) as f64 / (MODULUS - 1) as f64
    }

    /// Returns `base` offset by a uniform draw in `[-variance, +variance]`.
    ///
    /// Always consumes exactly one draw, even when `variance` is zero.
    pub fn vary(&mut self, base: f32, variance: f32) -> f32 {
        let r = self.random() as f32;
        base + (r * 2.0 - 1.0) * variance
    }
}
