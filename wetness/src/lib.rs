//! Dynamic wetness for renderable objects.
//!
//! Objects are registered with a dry and a wet material. Every batch the
//! engine derives a target wetness from each object's height relative to the
//! water level, moves the displayed wetness toward it at a bounded speed, and
//! hands a blended material back to the renderer.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use bevy::color::LinearRgba;
//! use wetness::{Material, MaterialPair, SceneAccess, WetnessEngine};
//!
//! struct Pillar {
//!     height: f64,
//!     material: Option<Arc<Material>>,
//! }
//!
//! impl SceneAccess<u32> for Pillar {
//!     fn object_height(&self, _id: &u32) -> Option<f64> {
//!         Some(self.height)
//!     }
//!
//!     fn assign_material(&mut self, _id: &u32, material: Arc<Material>) {
//!         self.material = Some(material);
//!     }
//! }
//!
//! let dry = Arc::new(Material::physically_based("sand", LinearRgba::rgb(0.8, 0.7, 0.5), 0.0, 0.9));
//! let wet = Arc::new(Material::physically_based("sand_wet", LinearRgba::rgb(0.4, 0.35, 0.25), 0.0, 0.3));
//!
//! let mut pillar = Pillar { height: 1.0, material: None };
//! let mut engine = WetnessEngine::new();
//! engine.register_wet_material(1, MaterialPair::new(dry, wet), &mut pillar).unwrap();
//!
//! engine.tick(1.0, &mut pillar);
//! assert!((engine.get_wetness_level(&1) - 0.5).abs() < 1e-9);
//! ```

pub mod calculator;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod material;
pub mod registry;
pub mod scheduler;
pub mod waveform;

pub use calculator::{wetness_fraction, TransitionSettings};
pub use config::WetnessConfig;
pub use constants::*;
pub use engine::{BatchReport, EnginePhase, SceneAccess, WetnessEngine};
pub use error::{ConfigurationError, MaterialSlot, WetnessError, WetnessResult};
pub use material::{blend, interpolate, Blend, Material, MaterialKind};
pub use registry::{MaterialPair, RegisterOutcome, Registration, Registry};
pub use scheduler::{ObjectState, StepOutcome};
pub use waveform::{WaterLevelSimulation, WaterLevelSimulationParams, WaveType};
