use crate::math::{v, V3};
use crate::noise::{NoiseField, SeedVector};
use serde::{Deserialize, Serialize};

/// Hard ceiling on fBm octaves; larger requests are clamped silently.
pub const MAX_OCTAVES: u32 = 8;

/// How far the field drifts along z per second of elapsed time.
const DRIFT_PER_SECOND: f64 = 0.15;

/// A scalar field whose sign separates open space (positive) from rock
/// (negative). Everything downstream of the noise only needs this.
pub trait DensityField {
    fn density(&self, x: &V3) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldParameters {
    pub threshold: f64,
    pub base_frequency: f64,
    pub octaves: u32,
    pub gain: f64,
    pub lacunarity: f64,
    /// Slowly scroll the field along z with elapsed time.
    pub animate: bool,
}

impl Default for FieldParameters {
    fn default() -> Self {
        FieldParameters {
            threshold: 0.3,
            base_frequency: 0.3,
            octaves: 3,
            gain: 0.8,
            lacunarity: 2.0,
            animate: true,
        }
    }
}

impl FieldParameters {
    pub fn effective_octaves(&self) -> u32 {
        self.octaves.min(MAX_OCTAVES)
    }
}

/// fBm over [`NoiseField`], frozen at one point in time.
#[derive(Clone, Copy, Debug)]
pub struct FractalField {
    noise: NoiseField,
    params: FieldParameters,
    time: f64,
}

impl FractalField {
    pub fn new(seed: SeedVector, params: FieldParameters, time: f64) -> FractalField {
        FractalField {
            noise: NoiseField::new(seed),
            params,
            time,
        }
    }

    pub fn params(&self) -> &FieldParameters {
        &self.params
    }

    pub fn evaluate(&self, x: &V3) -> f64 {
        let p = if self.params.animate {
            v(x.x, x.y, x.z + DRIFT_PER_SECOND * self.time)
        } else {
            *x
        };

        let mut value = 0.;
        let mut amplitude = 0.5;
        let mut frequency = self.params.base_frequency;
        for _ in 0..self.params.effective_octaves() {
            value += amplitude * self.noise.sample(&(frequency * p));
            frequency *= self.params.lacunarity;
            amplitude *= self.params.gain;
        }
        value
    }
}

impl DensityField for FractalField {
    fn density(&self, x: &V3) -> f64 {
        self.evaluate(x) - self.params.threshold
    }
}
