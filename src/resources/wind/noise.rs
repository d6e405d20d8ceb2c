use noise::{NoiseFn, Perlin};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::SEED_RANGE;

/// Per-session offsets into the noise plane.
///
/// Speed and direction are read from different regions of the same field, so the
/// two queries stay decorrelated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindSeeds {
    pub time: f64,
    pub altitude: f64,
    pub direction: f64,
}

impl WindSeeds {
    pub fn new(time: f64, altitude: f64, direction: f64) -> Self {
        Self {
            time,
            altitude,
            direction,
        }
    }

    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self {
            time: rng.gen_range(0.0..SEED_RANGE),
            altitude: rng.gen_range(0.0..SEED_RANGE),
            direction: rng.gen_range(0.0..SEED_RANGE),
        }
    }
}

/// Fractal (fBm) sum of 2D Perlin noise, normalised to `[0, 1]`
#[derive(Clone)]
pub struct NoiseField {
    noise: Perlin,
    seeds: WindSeeds,
}

impl NoiseField {
    pub fn new(seeds: WindSeeds) -> Self {
        // The permutation table stays fixed; sessions differ only by their offsets.
        Self {
            noise: Perlin::new(Perlin::DEFAULT_SEED),
            seeds,
        }
    }

    pub fn seeds(&self) -> WindSeeds {
        self.seeds
    }

    pub fn sample(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut sum = 0.0;
        let mut max = 0.0;

        for _ in 0..octaves {
            sum += amplitude * self.unit_noise(x * frequency, y * frequency);
            max += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        if max == 0.0 {
            return 0.0;
        }
        sum / max
    }

    // Perlin returns roughly [-1, 1]; remap and clamp the overshoot
    fn unit_noise(&self, x: f64, y: f64) -> f64 {
        (self.noise.get([x, y]) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("seeds", &self.seeds)
            .finish()
    }
}
