//! The renderable scene and the closest-hit query.

use std::sync::Arc;

use crate::{AxisBox, Camera, Color, Light, Plane, Ray, Sphere, Surface};
use whitted_core::{SceneDescription, SurfaceDesc};
use whitted_math::Vec3;

/// The nearest surface a ray meets.
#[derive(Clone, Copy)]
pub struct Collision<'a> {
    pub surface: &'a dyn Surface,
    pub point: Vec3,
    pub normal: Vec3,
    /// Distance from the ray origin to `point`
    pub distance: f32,
}

impl std::fmt::Debug for Collision<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collision")
            .field("point", &self.point)
            .field("normal", &self.normal)
            .field("distance", &self.distance)
            .finish_non_exhaustive()
    }
}

/// Everything needed to trace rays. Read-only once rendering starts.
pub struct Scene {
    pub background: Color,
    /// Shadow rays per axis of the light's sampling grid
    pub shadow_rays: u32,
    /// Recursion depth at which rays stop and see the background
    pub max_recursion: u32,
    pub camera: Camera,
    pub lights: Vec<Light>,
    surfaces: Vec<Box<dyn Surface>>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(background: Color, shadow_rays: u32, max_recursion: u32, camera: Camera) -> Self {
        Self {
            background,
            shadow_rays: shadow_rays.max(1),
            max_recursion,
            camera,
            lights: Vec::new(),
            surfaces: Vec::new(),
        }
    }

    /// Build the renderable scene for an image of the given aspect ratio
    /// (height / width).
    pub fn from_description(description: &SceneDescription, aspect_ratio: f32) -> Self {
        let settings = &description.settings;
        let camera = Camera::new(&description.camera, aspect_ratio);

        let mut scene = Self::new(
            settings.background,
            settings.shadow_rays,
            settings.max_recursion,
            camera,
        );

        for surface in &description.surfaces {
            log::debug!("Adding {} surface", surface.kind());
            scene.add_surface(build_surface(surface));
        }
        for light in &description.lights {
            scene.add_light(light.clone());
        }

        scene
    }

    /// Add a surface. Surfaces are queried in insertion order.
    pub fn add_surface(&mut self, surface: Box<dyn Surface>) {
        self.surfaces.push(surface);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn surfaces(&self) -> &[Box<dyn Surface>] {
        &self.surfaces
    }

    /// The nearest intersection of `ray` with any surface.
    ///
    /// Equally distant hits go to the surface added first.
    pub fn closest_collision(&self, ray: &Ray) -> Option<Collision<'_>> {
        let mut closest: Option<Collision<'_>> = None;

        for surface in &self.surfaces {
            let Some(hit) = surface.intersection(ray) else {
                continue;
            };

            let distance = ray.origin().distance(hit.point);
            if closest.map_or(true, |best| distance < best.distance) {
                closest = Some(Collision {
                    surface: surface.as_ref(),
                    point: hit.point,
                    normal: hit.normal,
                    distance,
                });
            }
        }

        closest
    }
}

fn build_surface(surface: &SurfaceDesc) -> Box<dyn Surface> {
    match surface {
        SurfaceDesc::Sphere {
            center,
            radius,
            material,
        } => Box::new(Sphere::new(*center, *radius, Arc::clone(material))),
        SurfaceDesc::Plane {
            normal,
            offset,
            material,
        } => Box::new(Plane::new(*normal, *offset, Arc::clone(material))),
        SurfaceDesc::Box {
            center,
            side_length,
            material,
        } => Box::new(AxisBox::new(*center, *side_length, Arc::clone(material))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Material;
    use whitted_core::{CameraSettings, RenderSettings};

    fn empty_scene() -> Scene {
        let camera = Camera::new(&CameraSettings::new(Vec3::ZERO, Vec3::Z, Vec3::Y), 1.0);
        Scene::new(Color::ZERO, 1, 1, camera)
    }

    fn material(r: f32) -> Arc<Material> {
        Arc::new(Material::diffuse(Color::new(r, 0.0, 0.0)))
    }

    #[test]
    fn test_no_surfaces_no_collision() {
        let scene = empty_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(scene.closest_collision(&ray).is_none());
    }

    #[test]
    fn test_overlapping_spheres_nearer_wins() {
        let mut scene = empty_scene();
        // Far sphere first so insertion order can't explain the result
        scene.add_surface(Box::new(Sphere::new(Vec3::new(0.0, 0.0, 7.0), 2.0, material(0.2))));
        scene.add_surface(Box::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.5, material(0.8))));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let collision = scene.closest_collision(&ray).unwrap();

        assert!((collision.distance - 3.5).abs() < 1e-5);
        assert_eq!(collision.surface.material().diffuse.x, 0.8);
    }

    #[test]
    fn test_equal_distance_first_surface_wins() {
        let mut scene = empty_scene();
        scene.add_surface(Box::new(Plane::new(-Vec3::Z, -4.0, material(0.1))));
        scene.add_surface(Box::new(AxisBox::new(Vec3::new(0.0, 0.0, 5.0), 2.0, material(0.9))));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let collision = scene.closest_collision(&ray).unwrap();

        assert!((collision.distance - 4.0).abs() < 1e-5);
        assert_eq!(collision.surface.material().diffuse.x, 0.1);
    }

    #[test]
    fn test_mixed_surfaces() {
        let mut scene = empty_scene();
        scene.add_surface(Box::new(Plane::new(Vec3::Z, 10.0, material(0.1))));
        scene.add_surface(Box::new(AxisBox::new(Vec3::new(0.0, 0.0, 6.0), 1.0, material(0.5))));
        scene.add_surface(Box::new(Sphere::new(Vec3::new(3.0, 0.0, 3.0), 1.0, material(0.7))));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let collision = scene.closest_collision(&ray).unwrap();
        assert_eq!(collision.surface.material().diffuse.x, 0.5);
        assert!((collision.point - Vec3::new(0.0, 0.0, 5.5)).length() < 1e-5);
        assert_eq!(collision.normal, -Vec3::Z);
    }

    #[test]
    fn test_from_description() {
        let shared = Arc::new(Material::default());
        let mut description = SceneDescription::new(
            RenderSettings {
                background: Color::new(0.1, 0.2, 0.3),
                shadow_rays: 3,
                max_recursion: 4,
            },
            CameraSettings::new(Vec3::ZERO, Vec3::Z, Vec3::Y).with_screen(1.0, 2.0),
        );
        description.add_surface(SurfaceDesc::Sphere {
            center: Vec3::new(0.0, 0.0, 5.0),
            radius: 1.0,
            material: shared.clone(),
        });
        description.add_surface(SurfaceDesc::Box {
            center: Vec3::new(0.0, 3.0, 5.0),
            side_length: 1.0,
            material: shared.clone(),
        });
        description.add_light(Light::new(Vec3::Y * 5.0, Color::ONE));

        let scene = Scene::from_description(&description, 0.75);

        assert_eq!(scene.surfaces().len(), 2);
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.shadow_rays, 3);
        assert_eq!(scene.max_recursion, 4);
        assert_eq!(scene.background, Color::new(0.1, 0.2, 0.3));
        assert_eq!(scene.camera.screen_height(), 1.5);

        // Surfaces share the one material instance
        assert_eq!(Arc::strong_count(&shared), 5);
    }
}
