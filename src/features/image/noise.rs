//! Jitter sources for expression scoring
//!
//! Raw expression scores get a small symmetric jitter so near-ties between
//! expressions don't always resolve the same way. The source is injected so
//! tests and reproducible runs can seed it or switch it off.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform values in [0, 1)
pub trait NoiseSource {
    /// Next uniform value in [0, 1)
    fn next_unit(&mut self) -> f32;

    /// Symmetric jitter in [-amplitude, amplitude)
    fn jitter(&mut self, amplitude: f32) -> f32 {
        (self.next_unit() - 0.5) * 2.0 * amplitude
    }
}

/// `StdRng`-backed noise
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    /// Reproducible noise from a fixed seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Noise seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn next_unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// No jitter at all: every call returns the midpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn next_unit(&mut self) -> f32 {
        0.5
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}
