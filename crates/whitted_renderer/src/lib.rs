//! Whitted Renderer - recursive CPU ray tracing
//!
//! Casts one primary ray per pixel, shades the closest hit with Lambert and
//! Phong terms under soft-shadowed area lights, and follows mirror
//! reflections up to the scene's recursion depth.

mod axis_box;
mod bucket;
mod camera;
mod lighting;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod surface;
mod tracer;

pub use axis_box::AxisBox;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use lighting::{light_at_point, light_intensity, SHADOW_EPSILON};
pub use plane::Plane;
pub use renderer::{
    color_to_rgb, pixel_ratios, render, render_pixel, ImageBuffer, RenderConfig, RenderError,
    RenderResult,
};
pub use scene::{Collision, Scene};
pub use sphere::Sphere;
pub use surface::{Surface, SurfaceHit};
pub use tracer::{base_color, trace, trace_recursive};

/// Re-export scene data from whitted_core and math types from whitted_math
pub use whitted_core::{Color, Light, Material};
pub use whitted_math::{Interval, Ray, Vec3, VectorExt};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1) from a type-erased generator.
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}
