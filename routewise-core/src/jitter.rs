//! Randomness seam for chart synthesis.
//!
//! All jitter goes through [`Jitter`], so tests can swap in [`NoJitter`] or a
//! seeded generator and get repeatable charts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Jitter {
    /// A uniform offset in `[-spread, spread]`.
    fn offset(&mut self, spread: f64) -> f64;
}

/// `rand`-backed jitter. One instance per request; never shared.
#[derive(Debug, Clone)]
pub struct RngJitter<R = StdRng> {
    rng: R,
}

impl RngJitter<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Jitter for RngJitter<R> {
    fn offset(&mut self, spread: f64) -> f64 {
        if spread <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-spread..=spread)
    }
}

/// Zero-variance jitter: every offset is 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn offset(&mut self, _spread: f64) -> f64 {
        0.0
    }
}
