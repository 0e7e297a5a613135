//! Direct lighting: soft shadows and the Lambert/Phong light terms.

use crate::{gen_f32, Color, Light, Ray, Scene, Surface};
use rand::RngCore;
use whitted_math::{Vec3, VectorExt};

/// Distance tolerance against self-intersection.
///
/// A shadow sample counts as lit when its nearest hit is no more than this
/// much closer than the shaded point. Reflected rays start this far off the
/// surface along the normal.
pub const SHADOW_EPSILON: f32 = 1e-3;

/// Fraction of `light` reaching `point`, in [0, 1].
///
/// The light is sampled as an N x N grid (N = `scene.shadow_rays`) of
/// jittered points over a square of side `light.radius`, perpendicular to the
/// light-to-point direction. Each sample casts a ray at `point`; the result is
/// `(1 - shadow) + shadow * lit / N^2`.
pub fn light_intensity(point: Vec3, light: &Light, scene: &Scene, rng: &mut dyn RngCore) -> f32 {
    let shadow = light.shadow_intensity.clamp(0.0, 1.0);
    if shadow == 0.0 {
        return 1.0;
    }

    let Some(direction) = (point - light.position).try_normalize() else {
        // The point sits on the light itself
        return 1.0;
    };

    // Basis of the sampling square
    let u = direction.perpendicular().normalize();
    let v = direction.cross(u).normalize();

    let n = scene.shadow_rays.max(1);
    let cell = light.radius / n as f32;
    let half = light.radius / 2.0;

    let mut lit = 0u32;
    for i in 0..n {
        for j in 0..n {
            let s = (i as f32 + gen_f32(rng)) * cell - half;
            let t = (j as f32 + gen_f32(rng)) * cell - half;
            let sample = light.position + u * s + v * t;

            if reaches(scene, sample, point) {
                lit += 1;
            }
        }
    }

    let fraction = lit as f32 / (n * n) as f32;
    ((1.0 - shadow) + shadow * fraction).clamp(0.0, 1.0)
}

/// Whether a ray from `sample` gets to `point` unobstructed.
fn reaches(scene: &Scene, sample: Vec3, point: Vec3) -> bool {
    let Some(ray) = Ray::towards(sample, point) else {
        return true;
    };

    match scene.closest_collision(&ray) {
        None => true,
        Some(collision) => collision.distance >= sample.distance(point) - SHADOW_EPSILON,
    }
}

/// Sum of every light's contribution at `point`.
///
/// With `specular == false` each light adds `color * intensity * max(0, N.L)`.
/// With `specular == true` it adds
/// `color * intensity * specular_intensity * max(0, R.V)^phong`, where `R` is
/// `L` mirrored about the normal and `V` points at the camera.
pub fn light_at_point(
    scene: &Scene,
    surface: &dyn Surface,
    point: Vec3,
    normal: Vec3,
    specular: bool,
    rng: &mut dyn RngCore,
) -> Color {
    let phong = surface.material().phong;
    let view = (scene.camera.position() - point).normalize_or_zero();

    let mut total = Color::ZERO;
    for light in &scene.lights {
        let Some(to_light) = (light.position - point).try_normalize() else {
            continue;
        };

        let brightness = if specular {
            // normal * 2(L.N) - L
            let reflected = -to_light.reflect_about(normal);
            reflected.dot(view).max(0.0).powf(phong) * light.specular_intensity
        } else {
            normal.dot(to_light).max(0.0)
        };

        // Skip the shadow rays when the light adds nothing anyway
        if brightness <= 0.0 {
            continue;
        }

        total += light.color * (light_intensity(point, light, scene, rng) * brightness);
    }

    total
}
