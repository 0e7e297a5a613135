//! Scene text in, pixels out.

use whitted_core::parse_scene;
use whitted_renderer::{render, Color, RenderConfig, Scene};

const SCENE: &str = "
# One red sphere over a grey floor
cam   0 0 -5   0 0 0   0 1 0   1 1
set   0.1 0.2 0.3   2   2

mtl   0.9 0.1 0.1   1 1 1   0 0 0         20  0
mtl   0.5 0.5 0.5   0 0 0   0.3 0.3 0.3   1   0

sph   0 0 0   1   0
pln   0 1 0  -1   1

lgt   -3 5 -4   1 1 1   1   0.8   0.5
";

const BACKGROUND: Color = Color::new(0.1, 0.2, 0.3);

fn scene(width: u32, height: u32) -> Scene {
    let _ = env_logger::builder().is_test(true).try_init();

    let description = parse_scene(SCENE).unwrap();
    Scene::from_description(&description, height as f32 / width as f32)
}

#[test]
fn test_render_scene_file() {
    let config = RenderConfig::default().with_resolution(32, 24).with_seed(3);
    let scene = scene(config.width, config.height);
    assert_eq!(scene.surfaces().len(), 2);
    assert_eq!(scene.lights.len(), 1);

    let image = render(&scene, &config).unwrap();
    assert_eq!(image.pixels.len(), 32 * 24);

    // Upper corners look over the floor into the background
    assert_eq!(image.get(0, 0), BACKGROUND);
    assert_eq!(image.get(31, 0), BACKGROUND);

    // The middle of the frame is the sphere, mostly red
    let center = image.get(16, 12);
    assert_ne!(center, BACKGROUND);
    assert!(center.x > center.y && center.x > center.z, "center = {center}");

    // The bottom rows see the floor
    assert_ne!(image.get(0, 23), BACKGROUND);

    for color in &image.pixels {
        assert!(color.min_element() >= 0.0 && color.max_element() <= 1.0);
    }
}

#[test]
fn test_render_is_deterministic_per_seed() {
    let config = RenderConfig::default().with_resolution(20, 20).with_seed(99);
    let scene = scene(config.width, config.height);

    let first = render(&scene, &config).unwrap();
    let second = render(&scene, &config).unwrap();
    assert_eq!(first.to_rgb_bytes(), second.to_rgb_bytes());
}
