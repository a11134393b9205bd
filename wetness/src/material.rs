//! Material descriptions and dry/wet interpolation.
//!
//! A material is one of two structural kinds. Two materials of the same kind
//! blend property by property; materials of different kinds cannot be
//! blended and switch discretely at [`FALLBACK_SWITCH_WETNESS`] instead.

use bevy::color::{LinearRgba, Mix};
use serde::{Deserialize, Serialize};
use std::mem::discriminant;
use std::sync::Arc;

use crate::constants::FALLBACK_SWITCH_WETNESS;
use crate::error::{ConfigurationError, MaterialSlot};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Albedo / metallic / roughness model.
    PhysicallyBased {
        base_color: LinearRgba,
        metallic: f32,
        roughness: f32,
        /// Specular reflectivity tint, when the material defines one
        reflectivity: Option<LinearRgba>,
    },
    /// Diffuse / specular model.
    SimpleReflectance {
        diffuse: LinearRgba,
        specular: LinearRgba,
    },
}

impl MaterialKind {
    pub fn label(&self) -> &'static str {
        match self {
            MaterialKind::PhysicallyBased { .. } => "physically-based",
            MaterialKind::SimpleReflectance { .. } => "simple-reflectance",
        }
    }

    #[inline]
    pub fn same_kind(&self, other: &MaterialKind) -> bool {
        discriminant(self) == discriminant(other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
}

impl Material {
    pub fn physically_based(
        name: impl Into<String>,
        base_color: LinearRgba,
        metallic: f32,
        roughness: f32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::PhysicallyBased {
                base_color,
                metallic,
                roughness,
                reflectivity: None,
            },
        }
    }

    pub fn simple_reflectance(
        name: impl Into<String>,
        diffuse: LinearRgba,
        specular: LinearRgba,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::SimpleReflectance { diffuse, specular },
        }
    }

    /// Sets the reflectivity tint of a physically-based material. No effect on
    /// other kinds.
    pub fn with_reflectivity(mut self, color: LinearRgba) -> Self {
        if let MaterialKind::PhysicallyBased { reflectivity, .. } = &mut self.kind {
            *reflectivity = Some(color);
        }
        self
    }
}

/// Result of blending a dry and a wet material.
#[derive(Debug, Clone, PartialEq)]
pub enum Blend {
    /// A freshly built material between the two inputs.
    Interpolated(Material),
    /// Kinds differ and the dry material is kept as is.
    Dry,
    /// Kinds differ and the wet material is used as is.
    Wet,
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    // Exact at both ends, unlike a + (b - a) * t
    a * (1.0 - t) + b * t
}

/// Blends `dry` toward `wet` by `wetness` (clamped to [0, 1]).
///
/// Non-interpolated state (the name aside) is inherited from `dry`.
pub fn blend(dry: &Material, wet: &Material, wetness: f64) -> Blend {
    let wetness = if wetness.is_nan() {
        0.0
    } else {
        wetness.clamp(0.0, 1.0)
    };
    let t = wetness as f32;

    let kind = match (&dry.kind, &wet.kind) {
        (
            MaterialKind::PhysicallyBased {
                base_color: dry_color,
                metallic: dry_metallic,
                roughness: dry_roughness,
                reflectivity: dry_reflectivity,
            },
            MaterialKind::PhysicallyBased {
                base_color: wet_color,
                metallic: wet_metallic,
                roughness: wet_roughness,
                reflectivity: wet_reflectivity,
            },
        ) => MaterialKind::PhysicallyBased {
            base_color: dry_color.mix(wet_color, t),
            metallic: lerp(*dry_metallic, *wet_metallic, t),
            roughness: lerp(*dry_roughness, *wet_roughness, t),
            reflectivity: match (dry_reflectivity, wet_reflectivity) {
                (Some(dry_r), Some(wet_r)) => Some(dry_r.mix(wet_r, t)),
                _ => *dry_reflectivity,
            },
        },
        (
            MaterialKind::SimpleReflectance {
                diffuse: dry_diffuse,
                specular: dry_specular,
            },
            MaterialKind::SimpleReflectance {
                diffuse: wet_diffuse,
                specular: wet_specular,
            },
        ) => MaterialKind::SimpleReflectance {
            diffuse: dry_diffuse.mix(wet_diffuse, t),
            specular: dry_specular.mix(wet_specular, t),
        },
        _ => {
            log::debug!(
                "Cannot blend {} material '{}' with {} material '{}', switching discretely",
                dry.kind.label(),
                dry.name,
                wet.kind.label(),
                wet.name
            );
            return if wetness > FALLBACK_SWITCH_WETNESS {
                Blend::Wet
            } else {
                Blend::Dry
            };
        }
    };

    Blend::Interpolated(Material {
        name: format!("wet_{}_{:.2}", dry.name, wetness),
        kind,
    })
}

/// Produces the material to show at `wetness`.
///
/// Never mutates its inputs. For mismatched kinds the returned value is one of
/// the inputs itself (a discrete switch, not a smooth blend).
pub fn interpolate(
    dry: Option<&Arc<Material>>,
    wet: Option<&Arc<Material>>,
    wetness: f64,
) -> Result<Arc<Material>, ConfigurationError> {
    let dry = dry.ok_or(ConfigurationError::MissingMaterial(MaterialSlot::Dry))?;
    let wet = wet.ok_or(ConfigurationError::MissingMaterial(MaterialSlot::Wet))?;

    Ok(match blend(dry, wet, wetness) {
        Blend::Interpolated(material) => Arc::new(material),
        Blend::Dry => Arc::clone(dry),
        Blend::Wet => Arc::clone(wet),
    })
}
