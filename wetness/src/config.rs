//! Engine configuration, loadable from RON.

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::calculator::TransitionSettings;
use crate::constants::DEFAULT_UPDATE_INTERVAL;
use crate::error::{ConfigurationError, WetnessError, WetnessResult};
use crate::waveform::WaterLevelSimulation;

/// Everything needed to start an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WetnessConfig {
    /// Minimum milliseconds between two simulation batches
    pub update_interval_ms: u64,
    /// Manual water level used while the simulation is off
    pub water_level: f64,
    /// Defaults for registrations that bring no settings of their own
    pub transition: TransitionSettings,
    pub simulation: WaterLevelSimulation,
}

impl Default for WetnessConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: DEFAULT_UPDATE_INTERVAL.as_millis() as u64,
            water_level: 0.0,
            transition: TransitionSettings::default(),
            simulation: WaterLevelSimulation::default(),
        }
    }
}

impl WetnessConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.water_level.is_finite() {
            return Err(ConfigurationError::InvalidWaterLevel(self.water_level));
        }
        self.transition.validate()?;
        self.simulation.validate()
    }

    pub fn from_ron_str(contents: &str) -> WetnessResult<Self> {
        let config: WetnessConfig = ron::de::from_str(contents).map_err(WetnessError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> WetnessResult<String> {
        let pretty_config = PrettyConfig::new()
            .with_depth_limit(3)
            .with_separate_tuple_members(true);
        ron::ser::to_string_pretty(self, pretty_config).map_err(WetnessError::Serialize)
    }

    pub fn load(path: &Path) -> WetnessResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| WetnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&contents)?;
        log::info!("Loaded wetness config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> WetnessResult<()> {
        let serialized = self.to_ron_string()?;
        let io_error = |source: std::io::Error| WetnessError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, serialized).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::WaveType;

    #[test]
    fn test_defaults() {
        let config = WetnessConfig::default();
        assert_eq!(config.update_interval(), Duration::from_millis(100));
        assert_eq!(config.transition.distance, 2.0);
        assert!(!config.simulation.enabled);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = WetnessConfig::from_ron_str(
            "(update_interval_ms: 50, simulation: (enabled: true, wave_type: triangle))",
        )
        .unwrap();
        assert_eq!(config.update_interval_ms, 50);
        assert!(config.simulation.enabled);
        assert_eq!(config.simulation.wave_type, WaveType::Triangle);
        assert_eq!(config.simulation.amplitude, 0.5);
        assert_eq!(config.transition, TransitionSettings::default());
    }

    #[test]
    fn test_round_trip_through_ron() {
        let mut config = WetnessConfig::default();
        config.simulation.wave_type = WaveType::Square;
        config.transition.speed = 3.0;
        let text = config.to_ron_string().unwrap();
        assert_eq!(WetnessConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_wave_type_is_rejected() {
        let result = WetnessConfig::from_ron_str("(simulation: (wave_type: sawtooth))");
        assert!(matches!(result, Err(WetnessError::Parse(_))));
    }

    #[test]
    fn test_invalid_transition_is_configuration_error() {
        let result = WetnessConfig::from_ron_str("(transition: (distance: -1.0))");
        assert!(matches!(
            result,
            Err(WetnessError::Configuration(
                ConfigurationError::InvalidTransitionDistance(_)
            ))
        ));
    }

    #[test]
    fn test_save_then_load_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("wetness-config-{}", std::process::id()));
        let path = root.join("nested").join("wetness.ron");
        let _ = fs::remove_dir_all(&root);

        let mut config = WetnessConfig::default();
        config.update_interval_ms = 250;
        config.water_level = -0.5;
        config.simulation.enabled = true;
        config.simulation.wave_type = WaveType::Triangle;
        config.save(&path).unwrap();

        let loaded = WetnessConfig::load(&path).unwrap();
        fs::remove_dir_all(&root).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = WetnessConfig::load(Path::new("/nonexistent/wetness.ron"));
        assert!(matches!(result, Err(WetnessError::Io { .. })));
    }
}
