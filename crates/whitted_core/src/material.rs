//! Surface materials.

use whitted_math::Vec3;

/// Color type alias (RGB values nominally 0-1)
pub type Color = Vec3;

/// Shading coefficients attached to a surface.
///
/// Materials are plain data. Surfaces hold them behind an `Arc` so one
/// material declared in a scene file can be shared by many surfaces.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color, multiplied with the Lambertian light term
    pub diffuse: Color,

    /// Specular color, multiplied with the Phong highlight term
    pub specular: Color,

    /// Reflection color, multiplied with the color seen along the mirror ray
    pub reflection: Color,

    /// Phong specularity exponent (>= 0)
    pub phong: f32,

    /// How much of the background shows through (0=opaque, 1=fully transparent)
    pub transparency: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::splat(0.5), // Grey default
            specular: Color::ZERO,
            reflection: Color::ZERO,
            phong: 1.0,
            transparency: 0.0,
        }
    }
}

impl Material {
    /// Create a purely diffuse material.
    pub fn diffuse(color: Color) -> Self {
        Self {
            diffuse: color,
            ..Default::default()
        }
    }

    /// Set the specular color and Phong exponent.
    pub fn with_specular(mut self, specular: Color, phong: f32) -> Self {
        self.specular = specular;
        self.phong = phong;
        self
    }

    /// Set the reflection color.
    pub fn with_reflection(mut self, reflection: Color) -> Self {
        self.reflection = reflection;
        self
    }

    /// Set the transparency, clamped to [0, 1].
    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency.clamp(0.0, 1.0);
        self
    }

    /// Check if this material reflects anything.
    pub fn is_reflective(&self) -> bool {
        self.reflection.max_element() > 0.0
    }
}
