//! Recursive Whitted-style tracing.
//!
//! Each hit is shaded with direct light, blended with the background by the
//! material's transparency, and then a mirror ray is traced for the
//! reflected contribution while the bounce budget lasts.

use crate::{light_at_point, Collision, Color, Ray, Scene, SHADOW_EPSILON};
use rand::RngCore;
use whitted_math::{Interval, VectorExt};

/// Color seen along `ray`, each channel clamped to [0, 1].
///
/// With `max_recursion == 0` the hit gets its direct lighting only and no
/// reflected term at all.
pub fn trace(ray: &Ray, scene: &Scene, rng: &mut dyn RngCore) -> Color {
    let color = if scene.max_recursion == 0 {
        match scene.closest_collision(ray) {
            Some(collision) => base_color(scene, &collision, rng),
            None => scene.background,
        }
    } else {
        trace_recursive(ray, scene, 0, rng)
    };

    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Unclamped color seen along `ray` at recursion `depth`.
///
/// Once `depth` reaches `scene.max_recursion` the ray sees the background,
/// so the last reflective hit in a chain adds `reflection * background`.
/// Misses return the background too.
pub fn trace_recursive(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth >= scene.max_recursion {
        return scene.background;
    }

    let Some(collision) = scene.closest_collision(ray) else {
        return scene.background;
    };

    let base = base_color(scene, &collision, rng);

    let material = collision.surface.material();
    if !material.is_reflective() {
        return base;
    }

    let reflected = trace_recursive(&mirror_ray(ray, &collision), scene, depth + 1, rng);
    base + material.reflection * reflected
}

/// The incident ray mirrored about the hit normal.
///
/// The origin is pushed off the surface toward the side the ray came from so
/// the bounce can't re-hit its own surface.
fn mirror_ray(ray: &Ray, collision: &Collision<'_>) -> Ray {
    let facing = if collision.normal.dot(ray.direction()) > 0.0 {
        -collision.normal
    } else {
        collision.normal
    };

    Ray::new(
        collision.point + facing * SHADOW_EPSILON,
        ray.direction().reflect_about(facing),
    )
}

/// Direct lighting at a hit, before reflections.
///
/// `diffuse * lambert + specular * phong`, blended toward the background by
/// the material's transparency.
pub fn base_color(scene: &Scene, collision: &Collision<'_>, rng: &mut dyn RngCore) -> Color {
    let surface = collision.surface;
    let material = surface.material();

    let diffuse = light_at_point(
        scene,
        surface,
        collision.point,
        collision.normal,
        false,
        rng,
    );
    let specular = light_at_point(
        scene,
        surface,
        collision.point,
        collision.normal,
        true,
        rng,
    );

    let lit = material.diffuse * diffuse + material.specular * specular;
    lit * (1.0 - material.transparency) + scene.background * material.transparency
}
