use std::time::Duration;

/// Wetness differences at or below this are treated as settled.
pub const WETNESS_EPSILON: f64 = 0.01;

/// Minimum time between two simulation batches.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(100);

pub const DEFAULT_TRANSITION_DISTANCE: f64 = 2.0;
pub const DEFAULT_TRANSITION_SPEED: f64 = 1.0;
pub const DEFAULT_WETNESS_MULTIPLIER: f64 = 1.0;

pub const DEFAULT_WAVE_AMPLITUDE: f64 = 0.5;
pub const DEFAULT_WAVE_FREQUENCY: f64 = 1.0;
pub const DEFAULT_WAVE_SPEED: f64 = 1.0;

/// Wetness above which the discrete fallback picks the wet material.
pub const FALLBACK_SWITCH_WETNESS: f64 = 0.5;
