//! Surface trait and hit record for ray-object intersection.

use crate::{Material, Ray};
use whitted_math::Vec3;

/// Where a ray meets a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Ray parameter of the hit; equals the distance from the ray origin
    /// because ray directions are unit length
    pub t: f32,
}

impl SurfaceHit {
    /// Build a hit record at parameter `t` along `ray`.
    #[inline]
    pub fn at(ray: &Ray, t: f32, normal: Vec3) -> Self {
        Self {
            point: ray.at(t),
            normal,
            t,
        }
    }
}

/// Trait for geometry that rays can hit.
pub trait Surface: Send + Sync {
    /// The nearest intersection in front of the ray origin (`t >= 0`), if any.
    ///
    /// Degenerate cases (parallel rays, geometry behind the origin) are
    /// reported as `None`.
    fn intersection(&self, ray: &Ray) -> Option<SurfaceHit>;

    /// The material the surface is made of.
    fn material(&self) -> &Material;
}
