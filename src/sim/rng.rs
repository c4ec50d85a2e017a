//! Seedable random source for spawning
//!
//! The simulation never touches a global RNG. All draws go through
//! [`RandomSource`] so tests can script exact sequences.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws in [0, 1)
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform draw in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }

    /// Seed this source was built from (0 when not applicable)
    fn seed(&self) -> u64 {
        0
    }
}

/// PCG32-backed source used by real runs
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are clamped into [0, 1) so a script cannot break the range contract.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// An empty script behaves like a constant 0.0
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, cursor: 0 }
    }

    /// A source that always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Draws consumed so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
