use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Capability to draw uniform floats in [0, 1).
///
/// Every stochastic score in the pipeline (token field intensity, token
/// qualification, tone baselines) is drawn through this trait so tests can
/// swap in a scripted sequence.
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// Production source backed by `StdRng`.
#[derive(Debug)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Largest f64 strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Replays a fixed sequence of draws, wrapping around at the end.
/// Values are clamped into [0, 1).
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values: Vec<f64> = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        for v in values.iter_mut() {
            *v = if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, BELOW_ONE)
            };
        }
        Self { values, cursor: 0 }
    }

    /// Every draw returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
