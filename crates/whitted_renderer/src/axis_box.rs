//! Axis-aligned box primitive.
//!
//! The box is treated as six bounded planes: each face is intersected with
//! the plane routine and kept only if the hit lies inside the other two axes'
//! extent.

use std::sync::Arc;

use crate::{
    plane::intersect_plane,
    surface::{Surface, SurfaceHit},
    Material, Ray,
};
use whitted_math::{Interval, Vec3};

/// Slack on the face bounds test so hits on edges and corners are kept.
const FACE_TOLERANCE: f32 = 1e-4;

/// An axis-aligned cube.
pub struct AxisBox {
    center: Vec3,
    side_length: f32,
    material: Arc<Material>,
}

impl AxisBox {
    /// Create a new box centered at `center` with the given side length.
    pub fn new(center: Vec3, side_length: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            side_length: side_length.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn side_length(&self) -> f32 {
        self.side_length
    }

    /// Extent of the box along one axis, padded by the face tolerance.
    fn extent(&self, axis: usize) -> Interval {
        Interval::centered(self.center[axis], self.side_length / 2.0).expand(2.0 * FACE_TOLERANCE)
    }

    /// Whether `point` lies within the bounds of the faces perpendicular to `axis`.
    fn in_face_bounds(&self, point: Vec3, axis: usize) -> bool {
        (0..3)
            .filter(|&other| other != axis)
            .all(|other| self.extent(other).contains(point[other]))
    }

    /// Every valid face hit, in axis order (-x, +x, -y, +y, -z, +z).
    fn face_hits(&self, ray: &Ray) -> Vec<SurfaceHit> {
        let half = self.side_length / 2.0;
        let mut hits = Vec::with_capacity(2);

        for (axis, normal) in Vec3::AXES.into_iter().enumerate() {
            for offset in [self.center[axis] - half, self.center[axis] + half] {
                if let Some(hit) = intersect_plane(normal, offset, ray) {
                    if self.in_face_bounds(hit.point, axis) {
                        hits.push(hit);
                    }
                }
            }
        }

        hits
    }
}

impl Surface for AxisBox {
    fn intersection(&self, ray: &Ray) -> Option<SurfaceHit> {
        // min_by keeps the first of equal elements, so an edge hit reports
        // the face that comes first in axis order
        self.face_hits(ray)
            .into_iter()
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AxisBox {
        AxisBox::new(Vec3::ZERO, 2.0, Arc::new(Material::default()))
    }

    #[test]
    fn test_box_axis_ray_hits_only_perpendicular_faces() {
        let cube = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let hits = cube.face_hits(&ray);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].point - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((hits[1].point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_box_returns_nearest_face() {
        let cube = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let hit = cube.intersection(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, -Vec3::Z);
    }

    #[test]
    fn test_box_every_axis() {
        let cube = AxisBox::new(Vec3::new(1.0, 2.0, 3.0), 1.0, Arc::new(Material::default()));

        for axis in Vec3::AXES {
            let origin = cube.center() - axis * 10.0;
            let ray = Ray::new(origin, axis);
            let hit = cube.intersection(&ray).unwrap();

            let expected = cube.center() - axis * 0.5;
            assert!((hit.point - expected).length() < 1e-4, "axis {axis}");
            assert_eq!(hit.normal, -axis);
        }
    }

    #[test]
    fn test_box_from_inside_hits_exit_face() {
        let cube = unit_box();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hits = cube.face_hits(&ray);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_box_miss() {
        let cube = unit_box();

        // Passes beside the box; the face planes are hit out of bounds
        let ray = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::Z);
        assert!(cube.intersection(&ray).is_none());

        // Box is behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        assert!(cube.intersection(&ray).is_none());
    }

    #[test]
    fn test_box_oblique_hit() {
        let cube = unit_box();
        let origin = Vec3::new(-4.0, 0.5, -4.0);
        let ray = Ray::towards(origin, Vec3::new(0.0, 0.5, 0.0)).unwrap();

        // Enters through the -x/-z edge at (-1, 0.5, -1)
        let hit = cube.intersection(&ray).unwrap();
        assert!((hit.point - Vec3::new(-1.0, 0.5, -1.0)).length() < 1e-4);
        assert!((hit.t - origin.distance(hit.point)).abs() < 1e-4);
    }
}
