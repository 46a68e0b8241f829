//! Pluggable randomness for the synthetic series generator.
//!
//! The generator never reaches for an ambient RNG; callers hand it a
//! [`RandomSource`], which lets tests pin every draw.

/// Source of uniform samples.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform sample in `[-1, 1)`.
    fn signed(&mut self) -> f64 {
        self.unit() * 2.0 - 1.0
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }

    fn signed(&mut self) -> f64 {
        (**self).signed()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }

    fn signed(&mut self) -> f64 {
        (**self).signed()
    }
}

/// Every draw is zero: no volatility shock, no wicks, base volume only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroSource;

impl RandomSource for ZeroSource {
    fn unit(&mut self) -> f64 {
        0.0
    }

    fn signed(&mut self) -> f64 {
        0.0
    }
}

/// Replays a fixed list of unit samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    samples: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Samples are clamped into `[0, 1)`; an empty list behaves like [`ZeroSource`].
    pub fn new(samples: Vec<f64>) -> Self {
        let samples = samples
            .into_iter()
            .map(|s| if s.is_finite() { s.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        Self { samples, cursor: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        value
    }
}
