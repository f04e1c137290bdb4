//! Injectable random source
//!
//! Every random draw in the simulation funnels through [`RandomSource`], so a run is
//! reproducible from its seed and tests can script exact sequences.

use rand::{Rng, RngCore};

/// A source of uniform samples in [0, 1)
pub trait RandomSource {
    /// Next uniform sample in [0, 1)
    fn next_unit(&mut self) -> f32;

    /// Uniform index in `0..n` (n must be > 0)
    fn next_index(&mut self, n: usize) -> usize {
        ((self.next_unit() * n as f32) as usize).min(n - 1)
    }

    /// Uniform integer in `lo..=hi`
    fn next_between(&mut self, lo: i32, hi: i32) -> i32 {
        lo + self.next_index((hi - lo + 1) as usize) as i32
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct Scripted {
    samples: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl Scripted {
    pub fn new(samples: impl Into<Vec<f32>>) -> Self {
        let samples = samples.into();
        assert!(!samples.is_empty(), "scripted source needs at least one sample");
        Self { samples, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for Scripted {
    fn next_unit(&mut self) -> f32 {
        let v = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        v.clamp(0.0, 0.999_999)
    }
}
