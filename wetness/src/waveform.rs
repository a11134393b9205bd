//! Procedural water level over time.
//!
//! The level either stays where it was put by hand, or follows one of three
//! periodic waveforms around a base level. The waveform is a pure function of
//! time and configuration so every object evaluated in a batch sees the same
//! value.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_WAVE_AMPLITUDE, DEFAULT_WAVE_FREQUENCY, DEFAULT_WAVE_SPEED};
use crate::error::ConfigurationError;

/// Shape of the periodic water level signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveType {
    #[default]
    Sine,
    Triangle,
    Square,
}

impl WaveType {
    pub const ALL: [WaveType; 3] = [WaveType::Sine, WaveType::Triangle, WaveType::Square];

    pub fn as_str(self) -> &'static str {
        match self {
            WaveType::Sine => "sine",
            WaveType::Triangle => "triangle",
            WaveType::Square => "square",
        }
    }

    /// Value of the unit waveform (range [-1, 1]) at `phase` cycles.
    pub fn sample(self, phase: f64) -> f64 {
        match self {
            WaveType::Sine => (TAU * phase).sin(),
            WaveType::Triangle => 2.0 * (2.0 * (phase - (phase + 0.5).floor())).abs() - 1.0,
            WaveType::Square => sign((TAU * phase).sin()),
        }
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        WaveType::ALL
            .into_iter()
            .find(|wave| wave.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigurationError::UnknownWaveType(s.to_string()))
    }
}

/// `f64::signum` maps zero to one; a square wave must sit on the base level at
/// its zero crossings instead.
#[inline]
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Process-wide water level simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterLevelSimulation {
    /// When false the water level is set manually.
    pub enabled: bool,
    /// Level the wave oscillates around (Y coordinate)
    pub base_level: f64,
    /// Peak distance from the base level
    pub amplitude: f64,
    /// Cycles per second at unit speed
    pub frequency: f64,
    /// Time scale applied before sampling
    pub speed: f64,
    pub wave_type: WaveType,
}

impl Default for WaterLevelSimulation {
    fn default() -> Self {
        Self {
            enabled: false,
            base_level: 0.0,
            amplitude: DEFAULT_WAVE_AMPLITUDE,
            frequency: DEFAULT_WAVE_FREQUENCY,
            speed: DEFAULT_WAVE_SPEED,
            wave_type: WaveType::Sine,
        }
    }
}

impl WaterLevelSimulation {
    /// Water level at `time` seconds.
    ///
    /// Returns `base_level` unchanged while the simulation is disabled.
    pub fn water_level(&self, time: f64) -> f64 {
        if !self.enabled {
            return self.base_level;
        }

        let phase = self.frequency * self.speed * time;
        self.base_level + self.amplitude * self.wave_type.sample(phase)
    }

    /// Rejects non-finite parameters.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let fields = [
            ("base_level", self.base_level),
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("speed", self.speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigurationError::InvalidSimulationParameter { name, value });
            }
        }
        Ok(())
    }

    /// Returns a copy with every field set in `params` replaced.
    pub fn merged(&self, params: &WaterLevelSimulationParams) -> Self {
        Self {
            enabled: params.enabled.unwrap_or(self.enabled),
            base_level: params.base_level.unwrap_or(self.base_level),
            amplitude: params.amplitude.unwrap_or(self.amplitude),
            frequency: params.frequency.unwrap_or(self.frequency),
            speed: params.speed.unwrap_or(self.speed),
            wave_type: params.wave_type.unwrap_or(self.wave_type),
        }
    }
}

/// Partial update of [`WaterLevelSimulation`]; unset fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterLevelSimulationParams {
    pub enabled: Option<bool>,
    pub base_level: Option<f64>,
    pub amplitude: Option<f64>,
    pub frequency: Option<f64>,
    pub speed: Option<f64>,
    pub wave_type: Option<WaveType>,
}

impl WaterLevelSimulationParams {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_base_level(mut self, base_level: f64) -> Self {
        self.base_level = Some(base_level);
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = Some(amplitude);
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_wave_type(mut self, wave_type: WaveType) -> Self {
        self.wave_type = Some(wave_type);
        self
    }
}
