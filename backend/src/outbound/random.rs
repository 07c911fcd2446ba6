//! `RandomSource` adapter backed by a small fast PRNG.

use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::domain::ports::RandomSource;

/// PRNG-backed [`RandomSource`]. Not suitable for secrets.
#[derive(Debug)]
pub struct SmallRngSource {
    rng: Mutex<SmallRng>,
}

impl SmallRngSource {
    /// Seed from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Deterministic sequence for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SmallRngSource {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..len),
            // A poisoned lock only means another caller panicked mid-draw.
            Err(poisoned) => poisoned.into_inner().gen_range(0..len),
        }
    }
}
