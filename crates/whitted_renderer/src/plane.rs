//! Infinite plane primitive.

use std::sync::Arc;

use crate::{
    surface::{Surface, SurfaceHit},
    Material, Ray,
};
use whitted_math::Vec3;

/// Rays with |normal . direction| below this are treated as parallel.
pub(crate) const PARALLEL_EPSILON: f32 = 1e-6;

/// Intersect a ray with the plane `normal . p == offset`.
///
/// `normal` must be unit length. The returned normal is whichever of
/// `normal` and `-normal` faces the ray origin.
pub(crate) fn intersect_plane(normal: Vec3, offset: f32, ray: &Ray) -> Option<SurfaceHit> {
    let denominator = normal.dot(ray.direction());
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (offset - normal.dot(ray.origin())) / denominator;
    if t < 0.0 {
        return None;
    }

    // Travelling against the normal means the origin is on its side
    let facing = if denominator < 0.0 { normal } else { -normal };
    Some(SurfaceHit::at(ray, t, facing))
}

/// A plane given by a unit normal and its signed distance from the origin.
pub struct Plane {
    normal: Vec3,
    offset: f32,
    material: Arc<Material>,
}

impl Plane {
    /// Create the plane of points `p` with `normal . p == offset`.
    ///
    /// A non-unit normal is normalized and the offset scaled with it, so the
    /// set of points is unchanged. A zero normal yields a plane nothing hits.
    pub fn new(normal: Vec3, offset: f32, material: Arc<Material>) -> Self {
        let length = normal.length();
        let (normal, offset) = if length > 0.0 {
            (normal / length, offset / length)
        } else {
            (Vec3::ZERO, 0.0)
        };

        Self {
            normal,
            offset,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

impl Surface for Plane {
    fn intersection(&self, ray: &Ray) -> Option<SurfaceHit> {
        intersect_plane(self.normal, self.offset, ray)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        // y = -1
        Plane::new(Vec3::Y, -1.0, Arc::new(Material::default()))
    }

    #[test]
    fn test_plane_hit_matches_analytic_t() {
        let plane = floor();
        let origin = Vec3::new(0.0, 3.0, 0.0);
        let direction = Vec3::new(1.0, -1.0, 2.0);
        let ray = Ray::new(origin, direction);

        let hit = plane.intersection(&ray).unwrap();

        // t = (d - n.o) / (n.dir) with the normalized direction
        let unit = direction.normalize();
        let expected = (-1.0 - origin.y) / unit.y;
        assert!((hit.t - expected).abs() < 1e-4);
        assert!((hit.point.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = floor();

        // Lies in the plane
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::X);
        assert!(plane.intersection(&ray).is_none());

        // Parallel above it
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(plane.intersection(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_origin() {
        let plane = floor();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(plane.intersection(&ray).is_none());
    }

    #[test]
    fn test_plane_normal_faces_ray_origin() {
        let plane = floor();

        let from_above = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        assert_eq!(plane.intersection(&from_above).unwrap().normal, Vec3::Y);

        let from_below = Ray::new(Vec3::new(0.0, -4.0, 0.0), Vec3::Y);
        assert_eq!(plane.intersection(&from_below).unwrap().normal, -Vec3::Y);
    }

    #[test]
    fn test_plane_normalizes_input() {
        // 2y = 4 is the plane y = 2
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), 4.0, Arc::new(Material::default()));
        assert_eq!(plane.normal(), Vec3::Y);
        assert_eq!(plane.offset(), 2.0);

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let hit = plane.intersection(&ray).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_normal_never_hits() {
        let plane = Plane::new(Vec3::ZERO, 1.0, Arc::new(Material::default()));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, 0.5));
        assert!(plane.intersection(&ray).is_none());
    }
}
