//! Wetness from an object's vertical distance to the water surface.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_TRANSITION_DISTANCE, DEFAULT_TRANSITION_SPEED, DEFAULT_WETNESS_MULTIPLIER,
};
use crate::error::ConfigurationError;

/// Per-object transition tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Vertical band (world units) over which wetness fades from 1 to 0
    pub distance: f64,
    /// Maximum change of displayed wetness per second
    pub speed: f64,
    /// Scale applied to the raw fraction before clamping
    pub multiplier: f64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            distance: DEFAULT_TRANSITION_DISTANCE,
            speed: DEFAULT_TRANSITION_SPEED,
            multiplier: DEFAULT_WETNESS_MULTIPLIER,
        }
    }
}

impl TransitionSettings {
    /// Builds validated settings.
    pub fn new(distance: f64, speed: f64, multiplier: f64) -> Result<Self, ConfigurationError> {
        let settings = Self {
            distance,
            speed,
            multiplier,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(ConfigurationError::InvalidTransitionDistance(self.distance));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigurationError::InvalidTransitionSpeed(self.speed));
        }
        if !(self.multiplier.is_finite() && self.multiplier >= 0.0) {
            return Err(ConfigurationError::InvalidWetnessMultiplier(self.multiplier));
        }
        Ok(())
    }

    /// Target wetness for an object at `object_height` with these settings.
    #[inline]
    pub fn target_wetness(&self, object_height: f64, water_level: f64) -> f64 {
        wetness_fraction(object_height, water_level, self.distance, self.multiplier)
    }
}

/// Wetness fraction in [0, 1] for an object at `object_height`.
///
/// Full wetness at the surface, fading linearly to zero at
/// `transition_distance` above or below it. `transition_distance` must be
/// positive; registration guarantees that.
pub fn wetness_fraction(
    object_height: f64,
    water_level: f64,
    transition_distance: f64,
    wetness_multiplier: f64,
) -> f64 {
    let distance = (object_height - water_level).abs();

    let raw = if distance <= 0.0 {
        wetness_multiplier
    } else if distance < transition_distance {
        (1.0 - distance / transition_distance) * wetness_multiplier
    } else {
        0.0
    };

    // NaN inputs land on dry
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}
