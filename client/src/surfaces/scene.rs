//! The Bevy world as seen by the wetness engine.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use wetness::{Material, SceneAccess};

use super::convert::apply_to_standard;
use super::WetSurface;

pub type SurfaceQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static GlobalTransform,
        &'static mut MeshMaterial3d<StandardMaterial>,
    ),
    With<WetSurface>,
>;

/// Per-entity bookkeeping for a registered surface.
#[derive(Debug)]
pub struct SurfaceBinding {
    pub dry_handle: Handle<StandardMaterial>,
    pub wet_handle: Handle<StandardMaterial>,
    pub dry: Arc<Material>,
    pub wet: Arc<Material>,
    /// Created on first blend and updated in place afterwards
    pub blend: Option<Handle<StandardMaterial>>,
}

pub struct BevyScene<'a, 'w, 's> {
    pub surfaces: &'a mut SurfaceQuery<'w, 's>,
    pub bindings: &'a mut HashMap<Entity, SurfaceBinding>,
    pub materials: &'a mut Assets<StandardMaterial>,
}

impl BevyScene<'_, '_, '_> {
    fn blend_handle(&mut self, entity: Entity) -> Option<Handle<StandardMaterial>> {
        let binding = self.bindings.get_mut(&entity)?;
        if let Some(handle) = &binding.blend {
            if self.materials.contains(handle) {
                return Some(handle.clone());
            }
        }

        // Start from the dry asset so untouched state (textures, alpha) carries over
        let base = self
            .materials
            .get(&binding.dry_handle)
            .cloned()
            .unwrap_or_default();
        let handle = self.materials.add(base);
        binding.blend = Some(handle.clone());
        Some(handle)
    }
}

impl SceneAccess<Entity> for BevyScene<'_, '_, '_> {
    fn object_height(&self, id: &Entity) -> Option<f64> {
        self.surfaces
            .get(*id)
            .ok()
            .map(|(transform, _)| transform.translation().y as f64)
    }

    fn assign_material(&mut self, id: &Entity, material: Arc<Material>) {
        let Some(binding) = self.bindings.get(id) else {
            warn!("No material binding for {id}, cannot show {}", material.name);
            return;
        };

        let handle = if Arc::ptr_eq(&material, &binding.dry) {
            binding.dry_handle.clone()
        } else if Arc::ptr_eq(&material, &binding.wet) {
            binding.wet_handle.clone()
        } else {
            let Some(handle) = self.blend_handle(*id) else {
                return;
            };
            if let Some(target) = self.materials.get_mut(&handle) {
                apply_to_standard(&material, target);
            }
            handle
        };

        if let Ok((_, mut mesh_material)) = self.surfaces.get_mut(*id) {
            if mesh_material.0 != handle {
                mesh_material.0 = handle;
            }
        }
    }
}
