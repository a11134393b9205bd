//! A small scene of block columns standing in a pool.

use bevy::prelude::*;
use rand::Rng;
use wetness::TransitionSettings;

use crate::constants::{BLOCKS_PER_COLUMN, BLOCK_STEP, COLUMN_SPACING, WATER_COLOR};
use crate::surfaces::{WaterSurface, WetSurface, WetnessState};

#[derive(Resource, Debug, Clone)]
pub struct DemoSettings {
    pub columns: u32,
}

/// Dry and wet look of one block family.
struct SurfacePreset {
    name: &'static str,
    dry: StandardMaterial,
    wet: StandardMaterial,
}

fn presets() -> [SurfacePreset; 4] {
    [
        SurfacePreset {
            name: "sand",
            dry: StandardMaterial {
                base_color: Color::srgb(0.86, 0.76, 0.55),
                perceptual_roughness: 0.95,
                ..default()
            },
            wet: StandardMaterial {
                base_color: Color::srgb(0.55, 0.45, 0.3),
                perceptual_roughness: 0.35,
                ..default()
            },
        },
        SurfacePreset {
            name: "stone",
            dry: StandardMaterial {
                base_color: Color::srgb(0.6, 0.6, 0.58),
                perceptual_roughness: 0.85,
                ..default()
            },
            wet: StandardMaterial {
                base_color: Color::srgb(0.32, 0.33, 0.35),
                perceptual_roughness: 0.15,
                specular_tint: Color::srgb(0.8, 0.85, 0.9),
                ..default()
            },
        },
        SurfacePreset {
            name: "wood",
            dry: StandardMaterial {
                base_color: Color::srgb(0.6, 0.42, 0.25),
                perceptual_roughness: 0.8,
                ..default()
            },
            wet: StandardMaterial {
                base_color: Color::srgb(0.35, 0.22, 0.12),
                perceptual_roughness: 0.3,
                ..default()
            },
        },
        SurfacePreset {
            name: "copper",
            dry: StandardMaterial {
                base_color: Color::srgb(0.72, 0.45, 0.2),
                metallic: 0.9,
                perceptual_roughness: 0.5,
                ..default()
            },
            wet: StandardMaterial {
                base_color: Color::srgb(0.5, 0.3, 0.15),
                metallic: 0.9,
                perceptual_roughness: 0.1,
                ..default()
            },
        },
    ]
}

pub fn setup_demo_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<DemoSettings>,
    state: Res<WetnessState>,
) {
    let span = settings.columns.max(1) as f32 * COLUMN_SPACING;

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, span * 0.6, span * 1.2).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("water"),
        WaterSurface,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(span * 1.5, span * 1.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: WATER_COLOR,
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 0.05,
            ..default()
        })),
        Transform::from_xyz(0.0, state.engine.water_level() as f32, 0.0),
    ));

    let cube = meshes.add(Cuboid::new(1.0, BLOCK_STEP * 0.95, 1.0));
    let presets = presets();
    let defaults = *state.engine.default_transition();
    let mut rng = rand::thread_rng();
    let origin = -(settings.columns.saturating_sub(1) as f32) * COLUMN_SPACING / 2.0;
    let lowest = -(BLOCKS_PER_COLUMN as f32) * BLOCK_STEP / 2.0;

    for column in 0..settings.columns {
        let preset = &presets[column as usize % presets.len()];
        let dry = materials.add(preset.dry.clone());
        let wet = materials.add(preset.wet.clone());
        let x = origin + column as f32 * COLUMN_SPACING;

        for block in 0..BLOCKS_PER_COLUMN {
            // Vary the pace so neighbouring columns drift apart visibly
            let speed = defaults.speed * rng.gen_range(0.6..1.4);
            let transition = TransitionSettings::new(defaults.distance, speed, defaults.multiplier)
                .ok();
            let transform = Transform::from_xyz(x, lowest + block as f32 * BLOCK_STEP, 0.0);
            commands.spawn((
                Name::new(format!("{}_{column}_{block}", preset.name)),
                Mesh3d(cube.clone()),
                MeshMaterial3d(dry.clone()),
                transform,
                // Heights are read before the first transform propagation
                GlobalTransform::from(transform),
                WetSurface {
                    dry: dry.clone(),
                    wet: wet.clone(),
                    transition,
                },
            ));
        }
    }

    info!(
        "Spawned {} wet surfaces in {} columns",
        settings.columns * BLOCKS_PER_COLUMN,
        settings.columns
    );
}
