use crate::error::ConfigError;
use crate::field::FieldParameters;
use crate::marcher::MarchParameters;
use crate::math::{v, V3};
use crate::noise::SeedVector;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Externally owned, freely mutable render settings. Field names on the
/// wire match the query-string keys.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub seed: i32,
    pub threshold: f64,
    pub freq: f64,
    pub octaves: u32,
    pub gain: f64,
    pub lacunarity: f64,
    pub cam_dist: f64,
    pub max_steps: u32,
    pub max_dist: f64,
    pub step_size: f64,
    pub animate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let field = FieldParameters::default();
        let march = MarchParameters::default();
        Settings {
            seed: 0,
            threshold: field.threshold,
            freq: field.base_frequency,
            octaves: field.octaves,
            gain: field.gain,
            lacunarity: field.lacunarity,
            cam_dist: 3.0,
            max_steps: march.max_steps,
            max_dist: march.max_distance,
            step_size: march.step_size,
            animate: field.animate,
        }
    }
}

fn finite(name: &'static str, x: f64) -> Result<f64, ConfigError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ConfigError::NotFinite(name))
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

impl Settings {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "seed" => self.seed = parse(key, value)?,
            "threshold" => self.threshold = parse(key, value)?,
            "freq" => self.freq = parse(key, value)?,
            "octaves" => self.octaves = parse(key, value)?,
            "gain" => self.gain = parse(key, value)?,
            "lacunarity" => self.lacunarity = parse(key, value)?,
            "camDist" => self.cam_dist = parse(key, value)?,
            "maxSteps" => self.max_steps = parse(key, value)?,
            "maxDist" => self.max_dist = parse(key, value)?,
            "stepSize" => self.step_size = parse(key, value)?,
            "animate" => self.animate = parse_flag(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Applies `key=value` pairs separated by `&`, with an optional leading
    /// `?`. Nothing is changed unless every pair parses.
    pub fn apply_query(&mut self, query: &str) -> Result<(), ConfigError> {
        let mut next = *self;
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            next.set(key.trim(), value.trim())?;
        }
        *self = next;
        Ok(())
    }

    pub fn field(&self) -> FieldParameters {
        FieldParameters {
            threshold: self.threshold,
            base_frequency: self.freq,
            octaves: self.octaves,
            gain: self.gain,
            lacunarity: self.lacunarity,
            animate: self.animate,
        }
    }

    pub fn march(&self) -> MarchParameters {
        MarchParameters {
            step_size: self.step_size,
            max_steps: self.max_steps,
            max_distance: self.max_dist,
        }
    }

    /// Where the camera starts before any movement input.
    pub fn start_position(&self) -> V3 {
        v(0., 0., self.cam_dist)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("threshold", self.threshold)?;
        finite("camDist", self.cam_dist)?;
        if !(finite("maxDist", self.max_dist)? > 0.) {
            return Err(ConfigError::MaxDistance(self.max_dist));
        }
        if !(finite("stepSize", self.step_size)? > 0.) {
            return Err(ConfigError::StepSize(self.step_size));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::NoSteps);
        }
        if !(finite("freq", self.freq)? > 0.) {
            return Err(ConfigError::Frequency(self.freq));
        }
        if !(finite("lacunarity", self.lacunarity)? > 0.) {
            return Err(ConfigError::Lacunarity(self.lacunarity));
        }
        let gain = finite("gain", self.gain)?;
        if gain <= 0. || gain >= 1. {
            return Err(ConfigError::Gain(gain));
        }
        if self.octaves == 0 {
            return Err(ConfigError::NoOctaves);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Resolution, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::Resolution { width, height });
        }
        Ok(Resolution { width, height })
    }
}

/// Largest supersampling grid side a frame accepts.
pub const MAX_ANTIALIAS: u32 = 16;

/// Everything one frame reads, copied once before the first pixel.
#[derive(Clone, Copy, Debug)]
pub struct FrameParams {
    pub seed: SeedVector,
    pub field: FieldParameters,
    pub march: MarchParameters,
    pub resolution: Resolution,
    pub time: f64,
    /// Supersampling grid side; 1 means one centred ray per pixel.
    pub antialias: u32,
}

/// Holds the last settings that passed validation.
#[derive(Clone, Debug, Default)]
pub struct ParamStore {
    current: Settings,
}

impl ParamStore {
    pub fn new(initial: Settings) -> Result<ParamStore, ConfigError> {
        initial.validate()?;
        Ok(ParamStore { current: initial })
    }

    pub fn settings(&self) -> &Settings {
        &self.current
    }

    /// Replaces the settings if `candidate` validates. On failure the
    /// previous settings stay in effect and the error is returned.
    pub fn update(&mut self, candidate: Settings) -> Result<(), ConfigError> {
        match candidate.validate() {
            Ok(()) => {
                debug!("accepted settings {:?}", candidate);
                self.current = candidate;
                Ok(())
            }
            Err(e) => {
                warn!("rejected settings update, keeping previous: {}", e);
                Err(e)
            }
        }
    }

    pub fn apply_query(&mut self, query: &str) -> Result<(), ConfigError> {
        let mut candidate = self.current;
        candidate.apply_query(query)?;
        self.update(candidate)
    }

    /// Frame-start snapshot; later updates never reach a frame in flight.
    /// A negative or non-finite elapsed time refuses the frame.
    pub fn frame(
        &self,
        resolution: Resolution,
        time: f64,
        antialias: u32,
    ) -> Result<FrameParams, ConfigError> {
        if !(finite("time", time)? >= 0.) {
            return Err(ConfigError::NegativeTime(time));
        }
        Ok(FrameParams {
            seed: SeedVector::from_seed(self.current.seed),
            field: self.current.field(),
            march: self.current.march(),
            resolution,
            time,
            antialias: antialias.clamp(1, MAX_ANTIALIAS),
        })
    }
}
