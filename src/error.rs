use thiserror::Error;

/// Reasons a settings snapshot is refused. None of these are raised while
/// rendering; they are all caught when a frame's parameters are taken.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("maxDist must be positive, got {0}")]
    MaxDistance(f64),
    #[error("stepSize must be positive, got {0}")]
    StepSize(f64),
    #[error("maxSteps must be at least 1")]
    NoSteps,
    #[error("freq must be positive, got {0}")]
    Frequency(f64),
    #[error("lacunarity must be positive, got {0}")]
    Lacunarity(f64),
    #[error("gain must lie strictly between 0 and 1, got {0}")]
    Gain(f64),
    #[error("octaves must be at least 1")]
    NoOctaves,
    #[error("elapsed time must not be negative, got {0}")]
    NegativeTime(f64),
    #[error("{0} is not a finite number")]
    NotFinite(&'static str),
    #[error("resolution {width}x{height} has an empty axis")]
    Resolution { width: u32, height: u32 },
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("cannot parse `{value}` for setting `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
}
