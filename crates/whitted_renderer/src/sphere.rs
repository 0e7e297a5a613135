//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    surface::{Surface, SurfaceHit},
    Material, Ray,
};
use whitted_math::Vec3;

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Surface for Sphere {
    fn intersection(&self, ray: &Ray) -> Option<SurfaceHit> {
        let oc = self.center - ray.origin();
        let radius_sq = self.radius * self.radius;
        let outside = oc.length_squared() > radius_sq;

        // Length of oc along the ray; negative means the center is behind us
        let projection = oc.dot(ray.direction());
        if outside && projection < 0.0 {
            return None;
        }

        // Squared distance from the center to the ray's line
        let perpendicular_sq = oc.length_squared() - projection * projection;
        if perpendicular_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - perpendicular_sq).sqrt();

        // From outside the near root is the entry point; from inside only the
        // far root lies ahead
        let t = if outside {
            projection - half_chord
        } else {
            projection + half_chord
        };
        if t < 0.0 {
            return None;
        }

        let point = ray.at(t);
        let normal = (point - self.center).try_normalize()?;
        Some(SurfaceHit { point, normal, t })
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
