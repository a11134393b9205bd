//! Mapping between Bevy's `StandardMaterial` and the engine's `Material`.

use bevy::prelude::*;
use wetness::{Material, MaterialKind};

/// Describes a `StandardMaterial` for the wetness engine.
///
/// Standard materials are always physically based; the specular tint stands
/// in for the reflectivity color.
pub fn material_from_standard(name: impl Into<String>, standard: &StandardMaterial) -> Material {
    Material {
        name: name.into(),
        kind: MaterialKind::PhysicallyBased {
            base_color: standard.base_color.to_linear(),
            metallic: standard.metallic,
            roughness: standard.perceptual_roughness,
            reflectivity: Some(standard.specular_tint.to_linear()),
        },
    }
}

/// Writes the interpolated properties of `material` onto `target`, leaving
/// everything else (textures, alpha mode, culling) as it was.
pub fn apply_to_standard(material: &Material, target: &mut StandardMaterial) {
    match material.kind {
        MaterialKind::PhysicallyBased {
            base_color,
            metallic,
            roughness,
            reflectivity,
        } => {
            target.base_color = base_color.into();
            target.metallic = metallic;
            target.perceptual_roughness = roughness;
            if let Some(reflectivity) = reflectivity {
                target.specular_tint = reflectivity.into();
            }
        }
        MaterialKind::SimpleReflectance { diffuse, specular } => {
            target.base_color = diffuse.into();
            target.specular_tint = specular.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_material_properties_survive() {
        let standard = StandardMaterial {
            base_color: Color::linear_rgb(0.5, 0.4, 0.3),
            metallic: 0.25,
            perceptual_roughness: 0.75,
            specular_tint: Color::linear_rgb(0.1, 0.2, 0.3),
            ..default()
        };
        let material = material_from_standard("tile", &standard);
        assert_eq!(material.name, "tile");

        let mut target = StandardMaterial::default();
        apply_to_standard(&material, &mut target);
        assert_eq!(target.base_color.to_linear(), standard.base_color.to_linear());
        assert_eq!(target.metallic, 0.25);
        assert_eq!(target.perceptual_roughness, 0.75);
        assert_eq!(
            target.specular_tint.to_linear(),
            standard.specular_tint.to_linear()
        );
    }

    #[test]
    fn test_simple_reflectance_keeps_pbr_factors() {
        let material = Material::simple_reflectance(
            "plaster",
            LinearRgba::rgb(0.9, 0.9, 0.85),
            LinearRgba::rgb(0.2, 0.2, 0.2),
        );
        let mut target = StandardMaterial {
            metallic: 0.6,
            perceptual_roughness: 0.4,
            ..default()
        };
        apply_to_standard(&material, &mut target);
        assert_eq!(target.base_color.to_linear(), LinearRgba::rgb(0.9, 0.9, 0.85));
        assert_eq!(target.metallic, 0.6);
        assert_eq!(target.perceptual_roughness, 0.4);
    }
}
