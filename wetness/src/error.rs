//! Error types for the wetness engine.
//!
//! Configuration problems are hard failures surfaced to whoever supplied the
//! bad input. Per-tick problems (unknown objects, incompatible material kinds)
//! never show up here; they are absorbed by the engine and logged.

use std::path::PathBuf;
use thiserror::Error;

pub type WetnessResult<T> = Result<T, WetnessError>;

/// Which half of a material pair is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    Dry,
    Wet,
}

impl std::fmt::Display for MaterialSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialSlot::Dry => f.write_str("dry"),
            MaterialSlot::Wet => f.write_str("wet"),
        }
    }
}

/// Invalid input given while registering objects or changing parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("transition distance must be positive and finite, got {0}")]
    InvalidTransitionDistance(f64),

    #[error("transition speed must be positive and finite, got {0}")]
    InvalidTransitionSpeed(f64),

    #[error("wetness multiplier must be non-negative and finite, got {0}")]
    InvalidWetnessMultiplier(f64),

    #[error("{0} material is missing")]
    MissingMaterial(MaterialSlot),

    #[error("unknown wave type `{0}` (expected sine, triangle or square)")]
    UnknownWaveType(String),

    #[error("water level simulation parameter `{name}` must be finite, got {value}")]
    InvalidSimulationParameter { name: &'static str, value: f64 },

    #[error("water level must be finite, got {0}")]
    InvalidWaterLevel(f64),
}

#[derive(Error, Debug)]
pub enum WetnessError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("could not access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[source] ron::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[source] ron::Error),
}

impl WetnessError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, WetnessError::Configuration(_))
    }
}
