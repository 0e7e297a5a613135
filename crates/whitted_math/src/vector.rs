//! Vector helpers that glam does not provide directly.

use crate::Vec3;

/// Extra operations on [`Vec3`] used by the tracer.
pub trait VectorExt {
    /// A vector perpendicular to `self`.
    ///
    /// The choice is arbitrary but deterministic. Vectors lying on the z axis
    /// map to `(1, 1, 0)`; everything else maps to `(-y, x, 0)`. The result is
    /// not normalized and is zero only for the zero vector.
    fn perpendicular(self) -> Self;

    /// Mirror `self` about `normal` (which must be unit length).
    ///
    /// Returns `self - 2 (self . normal) normal`.
    fn reflect_about(self, normal: Self) -> Self;

    /// Of `a` and `b`, the one closer to `self` by Euclidean distance.
    ///
    /// Ties go to `a`.
    fn closer_of(self, a: Self, b: Self) -> Self;
}

impl VectorExt for Vec3 {
    fn perpendicular(self) -> Self {
        if self.x == 0.0 && self.y == 0.0 {
            if self.z == 0.0 {
                return Vec3::ZERO;
            }
            return Vec3::new(1.0, 1.0, 0.0);
        }
        Vec3::new(-self.y, self.x, 0.0)
    }

    #[inline]
    fn reflect_about(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    #[inline]
    fn closer_of(self, a: Self, b: Self) -> Self {
        if self.distance_squared(b) < self.distance_squared(a) {
            b
        } else {
            a
        }
    }
}
