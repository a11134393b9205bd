//! Bevy integration for the wetness engine.
//!
//! Entities carrying a [`WetSurface`] next to a `MeshMaterial3d<StandardMaterial>`
//! are registered automatically. Each frame the engine is ticked with the app's
//! elapsed time and writes blended materials back through [`scene::BevyScene`].
//!
//! ```text
//! Update ──▶ register_wet_surfaces ──▶ unregister_removed_surfaces
//!                                               │
//!            follow_water_level ◀── step_wetness
//! ```

pub mod convert;
pub mod scene;

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use wetness::{
    ConfigurationError, MaterialPair, MaterialSlot, TransitionSettings, WetnessConfig,
    WetnessEngine,
};

use convert::material_from_standard;
use scene::{BevyScene, SurfaceBinding, SurfaceQuery};

/// Dry and wet look of a surface. Both handles must point at loaded assets
/// when the component is added.
#[derive(Component, Debug, Clone)]
pub struct WetSurface {
    pub dry: Handle<StandardMaterial>,
    pub wet: Handle<StandardMaterial>,
    pub transition: Option<TransitionSettings>,
}

/// Marks the mesh that visualizes the water level.
#[derive(Component)]
pub struct WaterSurface;

/// Runs a wetness batch this frame even if the throttle would skip it.
#[derive(Event, Debug, Default)]
pub struct ForceWetnessUpdate;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct WetnessUpdateSet;

#[derive(Resource, Debug)]
pub struct WetnessState {
    pub engine: WetnessEngine<Entity>,
    bindings: HashMap<Entity, SurfaceBinding>,
}

impl WetnessState {
    pub fn new(engine: WetnessEngine<Entity>) -> Self {
        Self {
            engine,
            bindings: HashMap::new(),
        }
    }
}

pub struct WetnessPlugin {
    pub config: WetnessConfig,
}

impl Plugin for WetnessPlugin {
    fn build(&self, app: &mut App) {
        let engine = match WetnessEngine::from_config(&self.config) {
            Ok(engine) => engine,
            Err(err) => {
                error!("Invalid wetness config, using defaults: {err}");
                WetnessEngine::new()
            }
        };

        app.insert_resource(WetnessState::new(engine))
            .add_event::<ForceWetnessUpdate>()
            .add_systems(
                Update,
                (
                    register_wet_surfaces,
                    unregister_removed_surfaces,
                    step_wetness,
                    follow_water_level,
                )
                    .chain()
                    .in_set(WetnessUpdateSet),
            )
            .add_systems(Last, dispose_on_exit);
    }
}

fn resolve_pair(
    entity: Entity,
    surface: &WetSurface,
    name: Option<&Name>,
    materials: &Assets<StandardMaterial>,
) -> Result<(MaterialPair, SurfaceBinding), ConfigurationError> {
    let dry_standard = materials
        .get(&surface.dry)
        .ok_or(ConfigurationError::MissingMaterial(MaterialSlot::Dry))?;
    let wet_standard = materials
        .get(&surface.wet)
        .ok_or(ConfigurationError::MissingMaterial(MaterialSlot::Wet))?;

    let base_name = name.map_or_else(|| format!("surface_{entity}"), |name| name.to_string());
    let dry = Arc::new(material_from_standard(base_name.clone(), dry_standard));
    let wet = Arc::new(material_from_standard(format!("{base_name}_wet"), wet_standard));

    let mut pair = MaterialPair::new(Arc::clone(&dry), Arc::clone(&wet));
    if let Some(transition) = surface.transition {
        pair = pair.with_transition(transition);
    }
    let binding = SurfaceBinding {
        dry_handle: surface.dry.clone(),
        wet_handle: surface.wet.clone(),
        dry,
        wet,
        blend: None,
    };
    Ok((pair, binding))
}

fn register_wet_surfaces(
    added: Query<(Entity, &WetSurface, Option<&Name>), Added<WetSurface>>,
    mut surfaces: SurfaceQuery,
    mut state: ResMut<WetnessState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let WetnessState { engine, bindings } = &mut *state;

    for (entity, surface, name) in added.iter() {
        if engine.is_registered(&entity) {
            continue;
        }
        let (pair, binding) = match resolve_pair(entity, surface, name, &materials) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!("Cannot make {entity} wet: {err}");
                continue;
            }
        };
        bindings.insert(entity, binding);

        let mut scene = BevyScene {
            surfaces: &mut surfaces,
            bindings: &mut *bindings,
            materials: &mut materials,
        };
        if let Err(err) = engine.register_wet_material(entity, pair, &mut scene) {
            warn!("Cannot make {entity} wet: {err}");
            bindings.remove(&entity);
        }
    }
}

fn unregister_removed_surfaces(
    mut removed: RemovedComponents<WetSurface>,
    mut mesh_materials: Query<&mut MeshMaterial3d<StandardMaterial>>,
    mut state: ResMut<WetnessState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let WetnessState { engine, bindings } = &mut *state;

    for entity in removed.read() {
        engine.remove_wet_material(&entity);
        let Some(binding) = bindings.remove(&entity) else {
            continue;
        };

        // Still alive: the component was removed, not the entity
        if let Ok(mut mesh_material) = mesh_materials.get_mut(entity) {
            mesh_material.0 = binding.dry_handle.clone();
        }
        if let Some(blend) = binding.blend {
            materials.remove(&blend);
        }
    }
}

fn step_wetness(
    time: Res<Time>,
    mut forced: EventReader<ForceWetnessUpdate>,
    mut surfaces: SurfaceQuery,
    mut state: ResMut<WetnessState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let force = forced.read().count() > 0;
    let WetnessState { engine, bindings } = &mut *state;
    let mut scene = BevyScene {
        surfaces: &mut surfaces,
        bindings,
        materials: &mut materials,
    };

    let report = engine.tick(time.elapsed_secs_f64(), &mut scene);
    if force && !report.ran {
        let report = engine.force_update(&mut scene);
        debug!("Forced wetness batch: {report:?}");
    }
}

fn follow_water_level(
    state: Res<WetnessState>,
    mut water: Query<&mut Transform, With<WaterSurface>>,
) {
    let level = state.engine.water_level() as f32;
    for mut transform in water.iter_mut() {
        if transform.translation.y != level {
            transform.translation.y = level;
        }
    }
}

fn dispose_on_exit(mut exit: EventReader<AppExit>, mut state: ResMut<WetnessState>) {
    if exit.read().next().is_some() {
        state.engine.dispose();
        state.bindings.clear();
    }
}
