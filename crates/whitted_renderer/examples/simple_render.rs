//! Simple ray tracer example.
//!
//! Builds a small scene in code and saves it as a PNG.

use std::sync::Arc;

use whitted_core::CameraSettings;
use whitted_renderer::{
    render, AxisBox, Camera, Color, Light, Material, Plane, RenderConfig, Scene, Sphere, Vec3,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Whitted Ray Tracer - Simple Example");
    println!("===================================");

    let config = RenderConfig::default().with_resolution(800, 450).with_seed(7);

    // Build the scene
    let start = std::time::Instant::now();
    let scene = build_scene(config.aspect_ratio());
    println!("Scene built in {:?}", start.elapsed());

    println!(
        "Rendering {}x{} with {}x{} shadow rays...",
        config.width, config.height, scene.shadow_rays, scene.shadow_rays
    );

    let start = std::time::Instant::now();
    let image = match render(&scene, &config) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Render failed: {err}");
            std::process::exit(1);
        }
    };
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    if let Err(err) = image.save_png(filename) {
        eprintln!("Failed to save image: {err}");
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}

fn build_scene(aspect_ratio: f32) -> Scene {
    let camera = Camera::new(
        &CameraSettings::new(
            Vec3::new(0.0, 2.0, -8.0), // position
            Vec3::new(0.0, 0.5, 0.0),  // look_at
            Vec3::new(0.0, 1.0, 0.0),  // up
        )
        .with_screen(1.0, 1.2),
        aspect_ratio,
    );

    let mut scene = Scene::new(Color::new(0.5, 0.7, 1.0), 4, 4, camera);

    let floor = Arc::new(
        Material::diffuse(Color::new(0.5, 0.5, 0.5)).with_reflection(Color::splat(0.25)),
    );
    let red = Arc::new(
        Material::diffuse(Color::new(0.8, 0.1, 0.1)).with_specular(Color::ONE, 40.0),
    );
    let mirror = Arc::new(
        Material::diffuse(Color::splat(0.1))
            .with_specular(Color::ONE, 200.0)
            .with_reflection(Color::splat(0.9)),
    );
    let ghost = Arc::new(Material::diffuse(Color::new(0.2, 0.9, 0.4)).with_transparency(0.6));

    // Ground
    scene.add_surface(Box::new(Plane::new(Vec3::Y, -1.0, floor)));

    // Three main objects
    scene.add_surface(Box::new(Sphere::new(Vec3::new(-2.2, 0.0, 0.0), 1.0, red)));
    scene.add_surface(Box::new(Sphere::new(Vec3::new(0.0, 0.5, 1.5), 1.5, mirror)));
    scene.add_surface(Box::new(AxisBox::new(Vec3::new(2.2, -0.2, -0.5), 1.6, ghost)));

    scene.add_light(
        Light::new(Vec3::new(-5.0, 8.0, -5.0), Color::splat(0.9))
            .with_shadow(0.9)
            .with_radius(1.5),
    );
    scene.add_light(
        Light::new(Vec3::new(6.0, 4.0, -3.0), Color::new(0.4, 0.4, 0.5))
            .with_specular_intensity(0.5)
            .with_shadow(0.6)
            .with_radius(0.5),
    );

    println!("Created {} surfaces", scene.surfaces().len());
    scene
}
