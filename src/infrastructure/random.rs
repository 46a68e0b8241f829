use crate::domain::market_data::random::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// [`RandomSource`] backed by a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRngSource {
    rng: StdRng,
}

impl StdRngSource {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl RandomSource for StdRngSource {
    fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}
