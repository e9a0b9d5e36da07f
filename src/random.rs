//! Seeded random number generation for reproducible trajectories.
//!
//! Every stochastic decision in the program flows through one
//! [`RandomSource`] owned by the program state, and the seed is echoed in the
//! report so a trajectory can be rerun bit-for-bit.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::f64::consts::{FRAC_1_SQRT_2, TAU};
use std::time::{SystemTime, UNIX_EPOCH};

/// A seeded uniform/Gaussian/edge-weighted/sign source.
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: StdRng,
}

impl RandomSource {
    /// Create a source from an explicit seed, or generate one.
    ///
    /// When `seed` is `None`, a seed is drawn from the operating system's
    /// entropy source; if that is unavailable, the process id is mixed with
    /// the current time.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(generate_seed);
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed this source was initialized with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reinitialize deterministically from a new seed (or a generated one).
    pub fn reset_seed(&mut self, seed: Option<u64>) {
        *self = Self::new(seed);
    }

    /// Uniform random number in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Edge-weighted random number in [-1, 1].
    ///
    /// Computed as sin(2*pi*u), which is bimodal with peaks near the edges.
    pub fn edge_weighted(&mut self) -> f64 {
        (TAU * self.uniform()).sin()
    }

    /// Truncated normal random number in [-1, 1].
    ///
    /// Drawn from N(0, 1/sqrt(2)) and resampled until the value falls inside
    /// [-1, 1]. The width matches the ground-state probability density of the
    /// quantum harmonic oscillator between its classical turning points.
    pub fn gaussian(&mut self) -> f64 {
        loop {
            let value = box_muller_normal(&mut self.rng) * FRAC_1_SQRT_2;
            if (-1.0..=1.0).contains(&value) {
                return value;
            }
        }
    }

    /// Either 1 or -1 with equal probability.
    pub fn one_or_neg_one(&mut self) -> i32 {
        if self.uniform() >= 0.5 { 1 } else { -1 }
    }
}

/// Generate a seed from OS entropy, falling back to pid mixed with time.
fn generate_seed() -> u64 {
    let mut bytes = [0u8; 8];
    if OsRng.try_fill_bytes(&mut bytes).is_ok() {
        return u64::from_be_bytes(bytes);
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64 ^ d.as_secs())
        .unwrap_or(0);
    (std::process::id() as u64) << 32 ^ nanos
}

/// Box-Muller transform for a standard normal random number.
fn box_muller_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen_range(0.0001..1.0);
    let u2: f64 = rng.gen_range(0.0..TAU);
    (-2.0 * u1.ln()).sqrt() * u2.cos()
}
