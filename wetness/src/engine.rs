//! The simulation loop and the engine's public surface.
//!
//! ## Tick flow
//!
//! ```text
//! tick(now) ──throttle──▶ water level (once per batch)
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!       object A height                 object B height
//!       target wetness                  target wetness
//!       rate-limited step               rate-limited step
//!       material refresh?               material refresh?
//!              │                               │
//!              ▼                               ▼
//!       SceneAccess::assign_material    SceneAccess::assign_material
//! ```
//!
//! The engine is synchronous and owns no threads. The host calls [`WetnessEngine::tick`]
//! once per frame from a single thread; re-entering the engine from inside a
//! [`SceneAccess`] callback is not supported.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::calculator::TransitionSettings;
use crate::config::WetnessConfig;
use crate::error::{ConfigurationError, WetnessResult};
use crate::material::{interpolate, Material};
use crate::registry::{MaterialPair, RegisterOutcome, Registration, Registry};
use crate::waveform::{WaterLevelSimulation, WaterLevelSimulationParams};

/// The rendering side, as seen by the engine.
pub trait SceneAccess<K> {
    /// World-space height of the object, or `None` if it is not in the scene.
    fn object_height(&self, id: &K) -> Option<f64>;

    /// Shows `material` on the object.
    fn assign_material(&mut self, id: &K, material: Arc<Material>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Nothing registered; batches only advance the water level.
    Idle,
    Active,
}

/// Summary of one `tick` or `force_update` call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchReport {
    /// False when the call was throttled
    pub ran: bool,
    pub water_level: f64,
    /// Objects whose state was stepped
    pub evaluated: usize,
    /// Objects that received a new material
    pub reassigned: usize,
    /// Registered objects the scene could not find
    pub missing: usize,
}

#[derive(Debug)]
pub struct WetnessEngine<K> {
    registry: Registry<K>,
    defaults: TransitionSettings,
    simulation: WaterLevelSimulation,
    water_level: f64,
    update_interval: Duration,
    /// Latest host time seen, in seconds
    clock: f64,
    last_batch: Option<f64>,
}

impl<K> Default for WetnessEngine<K> {
    fn default() -> Self {
        let config = WetnessConfig::default();
        Self {
            registry: Registry::default(),
            defaults: config.transition,
            simulation: config.simulation,
            water_level: config.water_level,
            update_interval: config.update_interval(),
            clock: 0.0,
            last_batch: None,
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> WetnessEngine<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &WetnessConfig) -> WetnessResult<Self> {
        config.validate()?;
        let water_level = if config.simulation.enabled {
            config.simulation.water_level(0.0)
        } else {
            config.water_level
        };
        Ok(Self {
            registry: Registry::new(),
            defaults: config.transition,
            simulation: config.simulation,
            water_level,
            update_interval: config.update_interval(),
            clock: 0.0,
            last_batch: None,
        })
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Starts managing `id` and shows its dry material.
    ///
    /// Registering a known id again changes nothing, not even the material
    /// currently shown. Returns whether a new registration was created.
    pub fn register_wet_material(
        &mut self,
        id: K,
        pair: MaterialPair,
        scene: &mut impl SceneAccess<K>,
    ) -> WetnessResult<bool> {
        let outcome = self
            .registry
            .register(id.clone(), pair, &self.defaults, self.clock)?;

        if outcome == RegisterOutcome::AlreadyRegistered {
            log::debug!("{id:?} is already registered, keeping its materials");
            return Ok(false);
        }

        let Some(entry) = self.registry.get_mut(&id) else {
            return Ok(false);
        };
        if entry.uses_discrete_fallback() {
            log::warn!(
                "{id:?}: dry material '{}' is {} but wet material '{}' is {}; wetness will switch at 0.5 instead of blending",
                entry.dry.name,
                entry.dry.kind.label(),
                entry.wet.name,
                entry.wet.kind.label()
            );
        }
        scene.assign_material(&id, Arc::clone(&entry.dry));
        entry.state.mark_dry_applied();

        log::debug!("Registered {id:?} for wetness ({} total)", self.registry.len());
        Ok(true)
    }

    /// Stops managing `id`. Unknown ids are ignored.
    pub fn remove_wet_material(&mut self, id: &K) -> bool {
        let removed = self.registry.remove(id).is_some();
        if removed {
            log::debug!("Removed {id:?} from wetness management");
        }
        removed
    }

    /// Releases every registration. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.registry.is_empty() {
            log::info!("Disposing {} wet material registrations", self.registry.len());
        }
        self.registry.clear();
        self.last_batch = None;
    }

    // ------------------------------------------------------------------
    // Water level
    // ------------------------------------------------------------------

    /// Sets the manual water level.
    ///
    /// While the waveform is enabled the next batch overwrites this value.
    pub fn set_water_level(&mut self, level: f64) -> WetnessResult<()> {
        if !level.is_finite() {
            return Err(ConfigurationError::InvalidWaterLevel(level).into());
        }
        if self.simulation.enabled {
            log::debug!("Manual water level {level} set while the waveform is running");
        }
        self.water_level = level;
        Ok(())
    }

    pub fn enable_water_level_simulation(&mut self, enabled: bool) {
        if self.simulation.enabled != enabled {
            log::info!(
                "Water level simulation {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
        self.simulation.enabled = enabled;
        if !enabled {
            self.water_level = self.simulation.base_level;
        }
    }

    /// Applies the fields set in `params`; nothing changes if any is invalid.
    pub fn set_water_level_simulation_params(
        &mut self,
        params: WaterLevelSimulationParams,
    ) -> WetnessResult<()> {
        let merged = self.simulation.merged(&params);
        merged.validate()?;
        // Toggle last so a disable resets to the new base level
        self.simulation = WaterLevelSimulation {
            enabled: self.simulation.enabled,
            ..merged
        };
        if let Some(enabled) = params.enabled {
            self.enable_water_level_simulation(enabled);
        }
        Ok(())
    }

    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    pub fn water_level_simulation(&self) -> &WaterLevelSimulation {
        &self.simulation
    }

    // ------------------------------------------------------------------
    // Transition parameters
    // ------------------------------------------------------------------

    /// Defaults used by later registrations that carry no settings.
    pub fn set_default_transition_parameters(
        &mut self,
        settings: TransitionSettings,
    ) -> WetnessResult<()> {
        settings.validate()?;
        self.defaults = settings;
        Ok(())
    }

    /// Changes the settings of one registration. Returns false for unknown ids.
    pub fn set_transition_parameters(
        &mut self,
        id: &K,
        settings: TransitionSettings,
    ) -> WetnessResult<bool> {
        settings.validate()?;
        Ok(match self.registry.get_mut(id) {
            Some(entry) => {
                entry.transition = settings;
                true
            }
            None => false,
        })
    }

    pub fn default_transition(&self) -> &TransitionSettings {
        &self.defaults
    }

    pub fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval;
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Displayed wetness of `id`, or 0 when it is not registered.
    pub fn get_wetness_level(&self, id: &K) -> f64 {
        self.current_wetness(id).unwrap_or(0.0)
    }

    pub fn current_wetness(&self, id: &K) -> Option<f64> {
        self.registry.current_wetness(id)
    }

    pub fn target_wetness(&self, id: &K) -> Option<f64> {
        self.registry
            .get(id)
            .map(|entry| entry.state.target_wetness())
    }

    pub fn is_transitioning(&self, id: &K) -> Option<bool> {
        self.registry
            .get(id)
            .map(|entry| entry.state.is_transitioning())
    }

    pub fn uses_discrete_fallback(&self, id: &K) -> bool {
        self.registry
            .get(id)
            .is_some_and(Registration::uses_discrete_fallback)
    }

    pub fn is_registered(&self, id: &K) -> bool {
        self.registry.contains(id)
    }

    pub fn registration(&self, id: &K) -> Option<&Registration> {
        self.registry.get(id)
    }

    pub fn registered_objects(&self) -> Vec<K> {
        self.registry.list_registered()
    }

    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    pub fn phase(&self) -> EnginePhase {
        if self.registry.is_empty() {
            EnginePhase::Idle
        } else {
            EnginePhase::Active
        }
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    // ------------------------------------------------------------------
    // Simulation loop
    // ------------------------------------------------------------------

    /// Host frame callback. Runs a batch unless the last one was less than
    /// the update interval ago.
    pub fn tick(&mut self, now: f64, scene: &mut impl SceneAccess<K>) -> BatchReport {
        self.clock = now;

        if let Some(last) = self.last_batch {
            if now - last < self.update_interval.as_secs_f64() {
                return BatchReport {
                    ran: false,
                    water_level: self.water_level,
                    ..Default::default()
                };
            }
        }

        self.run_batch(scene)
    }

    /// Runs a batch right away at the latest clock, ignoring the throttle.
    pub fn force_update(&mut self, scene: &mut impl SceneAccess<K>) -> BatchReport {
        self.run_batch(scene)
    }

    fn run_batch(&mut self, scene: &mut impl SceneAccess<K>) -> BatchReport {
        let now = self.clock;
        if self.simulation.enabled {
            self.water_level = self.simulation.water_level(now);
        }
        // Every object in this batch sees this exact value
        let water_level = self.water_level;

        let mut report = BatchReport {
            ran: true,
            water_level,
            ..Default::default()
        };

        for (id, entry) in self.registry.iter_mut() {
            let Some(height) = scene.object_height(id) else {
                log::debug!("{id:?} is registered but not in the scene, skipping");
                report.missing += 1;
                continue;
            };

            let target = entry.transition.target_wetness(height, water_level);
            let outcome = entry.state.advance(target, entry.transition.speed, now);
            report.evaluated += 1;

            if !entry.state.needs_material_refresh(&outcome) {
                continue;
            }

            let wetness = entry.state.displayed_wetness();
            match interpolate(Some(&entry.dry), Some(&entry.wet), wetness) {
                Ok(material) => {
                    scene.assign_material(id, material);
                    entry.state.mark_applied();
                    report.reassigned += 1;
                }
                Err(err) => log::warn!("{id:?}: could not build wet material: {err}"),
            }
        }

        self.last_batch = Some(now);
        report
    }
}
