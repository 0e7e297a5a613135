//! Camera for primary ray generation.
//!
//! The camera keeps a right-handed orthonormal basis: `right = forward x up`.
//! Screen coordinates are ratios in [-0.5, 0.5]; positive x is image-right
//! and positive y is image-up.

use crate::Ray;
use whitted_core::CameraSettings;
use whitted_math::{Vec3, VectorExt};

/// Pinhole camera with an optional fisheye remapping.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,

    screen_distance: f32,
    screen_width: f32,
    screen_height: f32,

    fisheye: bool,
    fisheye_param: f32,
}

impl Camera {
    /// Build a camera from scene settings.
    ///
    /// `aspect_ratio` is image height over image width; the screen height is
    /// `screen_width * aspect_ratio`.
    pub fn new(settings: &CameraSettings, aspect_ratio: f32) -> Self {
        let forward = (settings.look_at - settings.position).normalize_or(Vec3::Z);
        let (right, up) = fix_up_vector(forward, settings.up);

        Self {
            position: settings.position,
            forward,
            up,
            right,
            screen_distance: settings.screen_distance,
            screen_width: settings.screen_width,
            screen_height: settings.screen_width * aspect_ratio,
            fisheye: settings.fisheye,
            fisheye_param: settings.fisheye_param,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    /// Primary ray through the screen point at (`x_ratio`, `y_ratio`).
    ///
    /// Returns `None` when fisheye is enabled and the point falls outside the
    /// projection disc; the pixel then shows the background.
    pub fn pixel_ray(&self, x_ratio: f32, y_ratio: f32) -> Option<Ray> {
        let (x_ratio, y_ratio) = if self.fisheye {
            self.undistort(x_ratio, y_ratio)?
        } else {
            (x_ratio, y_ratio)
        };

        let center = self.position + self.forward * self.screen_distance;
        let target = center
            + self.up * (y_ratio * self.screen_height)
            + self.right * (x_ratio * self.screen_width);

        Ray::towards(self.position, target)
    }

    /// Angle of incidence recovered from a distorted screen radius.
    fn fisheye_angle(&self, radius: f32) -> f32 {
        let k = self.fisheye_param;
        let d = self.screen_distance;
        if k > 0.0 {
            (radius * k / d).atan() / k
        } else if k == 0.0 {
            radius / d
        } else {
            (radius * k / d).asin() / k
        }
    }

    /// Map fisheye screen coordinates to pinhole screen coordinates.
    fn undistort(&self, x_ratio: f32, y_ratio: f32) -> Option<(f32, f32)> {
        let radius = (x_ratio * x_ratio + y_ratio * y_ratio).sqrt();
        if radius == 0.0 {
            return Some((x_ratio, y_ratio));
        }

        let theta = self.fisheye_angle(radius);
        let pinhole_radius = self.screen_distance * theta.tan();
        let scale = pinhole_radius / radius;

        // NaN (asin out of range) fails this comparison too
        if scale >= 1.0 && scale.is_finite() {
            Some((x_ratio * scale, y_ratio * scale))
        } else {
            None
        }
    }
}

/// Compute (right, up) orthonormal to `forward`, with up as close as possible
/// to `hint`.
fn fix_up_vector(forward: Vec3, hint: Vec3) -> (Vec3, Vec3) {
    let hint = match hint.try_normalize() {
        Some(hint) if forward.cross(hint).length_squared() > 1e-12 => hint,
        // Hint parallel to the view direction: any perpendicular will do
        _ => forward.perpendicular().normalize_or(Vec3::Y),
    };

    let right = forward.cross(hint).normalize();
    let up = right.cross(forward).normalize();
    let up = hint.closer_of(up, -up);

    (forward.cross(up).normalize(), up)
}
