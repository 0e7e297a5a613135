//! Area light sources.

use whitted_math::Vec3;

use crate::material::Color;

/// A square area light.
///
/// The light is sampled over a square of side `radius` centered at `position`
/// to produce soft shadows.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    /// Multiplier for the specular highlight contribution
    pub specular_intensity: f32,
    /// How strongly occlusion darkens a point (0=no shadows, 1=full shadows)
    pub shadow_intensity: f32,
    /// Side of the square the shadow rays are cast from
    pub radius: f32,
}

impl Light {
    /// Create a point light (zero radius) with full-strength shadows.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            specular_intensity: 1.0,
            shadow_intensity: 1.0,
            radius: 0.0,
        }
    }

    /// Set the specular intensity.
    pub fn with_specular_intensity(mut self, specular_intensity: f32) -> Self {
        self.specular_intensity = specular_intensity;
        self
    }

    /// Set the shadow intensity, clamped to [0, 1].
    pub fn with_shadow(mut self, shadow_intensity: f32) -> Self {
        self.shadow_intensity = shadow_intensity.clamp(0.0, 1.0);
        self
    }

    /// Set the side length of the sampling square.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self
    }
}
