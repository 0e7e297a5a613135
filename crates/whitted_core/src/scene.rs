//! Scene description types.
//!
//! A `SceneDescription` is what a scene file says, with material references
//! already resolved. It carries no intersection or shading logic.

use std::sync::Arc;

use whitted_math::Vec3;

use crate::light::Light;
use crate::material::{Color, Material};

/// Fisheye parameter used when a scene enables fisheye without giving one.
pub const DEFAULT_FISHEYE_PARAM: f32 = 0.5;

/// Camera placement and screen geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Up hint; re-orthogonalized against the view direction by the camera
    pub up: Vec3,
    pub screen_distance: f32,
    pub screen_width: f32,
    pub fisheye: bool,
    /// Fisheye projection parameter; >0, =0 and <0 select different formulas
    pub fisheye_param: f32,
}

impl CameraSettings {
    /// Create a pinhole camera at `position` looking at `look_at`.
    pub fn new(position: Vec3, look_at: Vec3, up: Vec3) -> Self {
        Self {
            position,
            look_at,
            up,
            screen_distance: 1.0,
            screen_width: 1.0,
            fisheye: false,
            fisheye_param: DEFAULT_FISHEYE_PARAM,
        }
    }

    /// Set screen distance and width.
    pub fn with_screen(mut self, screen_distance: f32, screen_width: f32) -> Self {
        self.screen_distance = screen_distance;
        self.screen_width = screen_width;
        self
    }

    /// Enable the fisheye projection.
    pub fn with_fisheye(mut self, fisheye_param: f32) -> Self {
        self.fisheye = true;
        self.fisheye_param = fisheye_param;
        self
    }
}

/// Scene-wide render parameters from the `set` directive.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Color returned for rays that hit nothing
    pub background: Color,
    /// Shadow rays per axis; each shading point casts N x N of them per light
    pub shadow_rays: u32,
    /// Recursion depth at which rays stop and see the background
    pub max_recursion: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Color::ZERO,
            shadow_rays: 1,
            max_recursion: 3,
        }
    }
}

/// One geometric primitive from the scene file.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceDesc {
    Sphere {
        center: Vec3,
        radius: f32,
        material: Arc<Material>,
    },
    /// Points `p` with `normal . p == offset`
    Plane {
        normal: Vec3,
        offset: f32,
        material: Arc<Material>,
    },
    /// Axis-aligned cube
    Box {
        center: Vec3,
        side_length: f32,
        material: Arc<Material>,
    },
}

impl SurfaceDesc {
    /// The material of this surface.
    pub fn material(&self) -> &Arc<Material> {
        match self {
            SurfaceDesc::Sphere { material, .. }
            | SurfaceDesc::Plane { material, .. }
            | SurfaceDesc::Box { material, .. } => material,
        }
    }

    /// Short name of the primitive kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            SurfaceDesc::Sphere { .. } => "sphere",
            SurfaceDesc::Plane { .. } => "plane",
            SurfaceDesc::Box { .. } => "box",
        }
    }
}

/// A complete, validated scene.
#[derive(Clone, Debug)]
pub struct SceneDescription {
    pub settings: RenderSettings,
    pub camera: CameraSettings,
    pub materials: Vec<Arc<Material>>,
    /// Surfaces in declaration order; ties between equally near hits go to
    /// the earlier surface
    pub surfaces: Vec<SurfaceDesc>,
    pub lights: Vec<Light>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new(settings: RenderSettings, camera: CameraSettings) -> Self {
        Self {
            settings,
            camera,
            materials: Vec::new(),
            surfaces: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Add a surface.
    pub fn add_surface(&mut self, surface: SurfaceDesc) {
        self.surfaces.push(surface);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Count surfaces of each kind as (spheres, planes, boxes).
    pub fn surface_counts(&self) -> (usize, usize, usize) {
        self.surfaces
            .iter()
            .fold((0, 0, 0), |(s, p, b), surface| match surface {
                SurfaceDesc::Sphere { .. } => (s + 1, p, b),
                SurfaceDesc::Plane { .. } => (s, p + 1, b),
                SurfaceDesc::Box { .. } => (s, p, b + 1),
            })
    }
}
