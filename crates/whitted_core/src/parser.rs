//! Scene file parser.
//!
//! Scene files are line oriented. Blank lines and lines starting with `#` are
//! skipped; every other line starts with a three letter directive followed by
//! whitespace-separated parameters.
//!
//! # Supported Directives
//!
//! - `cam px py pz  lx ly lz  ux uy uz  dist width [fisheye [param]]`
//! - `set bg_r bg_g bg_b  shadow_rays  max_recursion`
//! - `mtl dr dg db  sr sg sb  rr rg rb  phong  transparency`
//! - `sph cx cy cz  radius  material`
//! - `pln nx ny nz  offset  material`
//! - `box cx cy cz  side  material`
//! - `lgt px py pz  r g b  specular  shadow  radius`
//!
//! Material indices are 0-based in `mtl` declaration order and are resolved
//! once the whole file has been read, so directives may appear in any order.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use whitted_math::Vec3;

use crate::light::Light;
use crate::material::Material;
use crate::scene::{
    CameraSettings, RenderSettings, SceneDescription, SurfaceDesc, DEFAULT_FISHEYE_PARAM,
};

/// Errors that can occur while reading a scene file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid number '{value}' at line {line}")]
    InvalidNumber { line: usize, value: String },

    #[error("Unknown material index {index} at line {line}")]
    UnknownMaterial { line: usize, index: usize },

    #[error("Degenerate geometry at line {line}: {message}")]
    Degenerate { line: usize, message: String },

    #[error("Scene has no camera ('cam') directive")]
    MissingCamera,

    #[error("Scene has no settings ('set') directive")]
    MissingSettings,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse a scene file from disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> ParseResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Started parsing scene file {}", path.display());

    let content = std::fs::read_to_string(path)?;
    let scene = parse_scene(&content)?;

    log::info!("Finished parsing scene file {}", path.display());
    Ok(scene)
}

/// Parse a scene from its text.
pub fn parse_scene(content: &str) -> ParseResult<SceneDescription> {
    SceneParser::new().parse(content)
}

/// Kind of a surface waiting for its material to be resolved.
#[derive(Debug, Clone, Copy)]
enum PendingKind {
    Sphere { center: Vec3, radius: f32 },
    Plane { normal: Vec3, offset: f32 },
    Box { center: Vec3, side_length: f32 },
}

#[derive(Debug, Clone, Copy)]
struct PendingSurface {
    line: usize,
    kind: PendingKind,
    material: usize,
}

/// Accumulates directives until the whole file is read.
struct SceneParser {
    camera: Option<CameraSettings>,
    settings: Option<RenderSettings>,
    materials: Vec<Arc<Material>>,
    surfaces: Vec<PendingSurface>,
    lights: Vec<Light>,
}

impl SceneParser {
    fn new() -> Self {
        Self {
            camera: None,
            settings: None,
            materials: Vec::new(),
            surfaces: Vec::new(),
            lights: Vec::new(),
        }
    }

    fn parse(mut self, content: &str) -> ParseResult<SceneDescription> {
        for (index, raw) in content.lines().enumerate() {
            let line_num = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let code = tokens.next().unwrap_or_default().to_ascii_lowercase();
            let params = Params::new(line_num, tokens.collect());

            match code.as_str() {
                "cam" => self.parse_camera(&params)?,
                "set" => self.parse_settings(&params)?,
                "mtl" => self.parse_material(&params)?,
                "sph" => self.parse_sphere(&params)?,
                "pln" => self.parse_plane(&params)?,
                "box" => self.parse_box(&params)?,
                "lgt" => self.parse_light(&params)?,
                other => {
                    log::warn!("Did not recognize directive '{}' (line {})", other, line_num);
                }
            }
        }

        self.finish()
    }

    fn parse_camera(&mut self, params: &Params) -> ParseResult<()> {
        params.expect_at_least(11, "cam")?;

        let position = params.vec3(0)?;
        let look_at = params.vec3(3)?;
        let up = params.vec3(6)?;
        let screen_distance = params.float(9)?;
        let screen_width = params.float(10)?;
        let fisheye = if params.len() > 11 {
            params.boolean(11)?
        } else {
            false
        };
        let fisheye_param = if params.len() > 12 {
            params.float(12)?
        } else {
            DEFAULT_FISHEYE_PARAM
        };

        if position.distance_squared(look_at) == 0.0 {
            return Err(params.degenerate("camera position equals its look-at point"));
        }
        if up.length_squared() == 0.0 {
            return Err(params.degenerate("camera up vector is zero"));
        }
        if screen_distance <= 0.0 || screen_width <= 0.0 {
            return Err(params.degenerate("screen distance and width must be positive"));
        }

        self.camera = Some(CameraSettings {
            position,
            look_at,
            up,
            screen_distance,
            screen_width,
            fisheye,
            fisheye_param,
        });
        log::debug!("Parsed camera parameters (line {})", params.line);
        Ok(())
    }

    fn parse_settings(&mut self, params: &Params) -> ParseResult<()> {
        params.expect_at_least(5, "set")?;

        let background = params.vec3(0)?;
        let shadow_rays = params.unsigned(3)?;
        let max_recursion = params.unsigned(4)?;

        if shadow_rays == 0 {
            return Err(params.error("shadow ray count must be at least 1"));
        }

        self.settings = Some(RenderSettings {
            background,
            shadow_rays,
            max_recursion,
        });
        log::debug!("Parsed general settings (line {})", params.line);
        Ok(())
    }

    fn parse_material(&mut self, params: &Params) -> ParseResult<()> {
        params.expect_at_least(11, "mtl")?;

        let phong = params.float(9)?;
        if phong < 0.0 {
            return Err(params.error("phong exponent must not be negative"));
        }

        let material = Material {
            diffuse: params.vec3(0)?,
            specular: params.vec3(3)?,
            reflection: params.vec3(6)?,
            phong,
            transparency: params.float(10)?.clamp(0.0, 1.0),
        };

        self.materials.push(Arc::new(material));
        log::debug!(
            "Parsed material {} (line {})",
            self.materials.len() - 1,
            params.line
        );
        Ok(())
    }

    fn parse_sphere(&mut self, params: &Params) -> ParseResult<()> {
        params.expect_at_least(5, "sph")?;

        let center = params.vec3(0)?;
        let radius = params.float(3)?;
        if radius <= 0.0 {
            return Err(params.degenerate("sphere radius must be positive"));
        }

        self.push_surface(params, PendingKind::Sphere { center, radius }, 4)
    }

    fn parse_plane(&mut self, params: &Params) -> ParseResult<()> {
        params.expect_at_least(5, "pln")?;

        let normal = params.vec3(0)?;
        let offset = params.float(3)?;
        if normal.length_squared() == 0.0 {
            return Err(params.degenerate("plane normal is zero"));
        }

        self.push_surface(params, PendingKind::Plane { normal, offset }, 4)
    }

    fn parse_box(&mut self, params: &Params) -> ParseResult<()> {
        params.expect_at_least(5, "box")?;

        let center = params.vec3(0)?;
        let side_length = params.float(3)?;
        if side_length <= 0.0 {
            return Err(params.degenerate("box side length must be positive"));
        }

        self.push_surface(params, PendingKind::Box { center, side_length }, 4)
    }

    fn push_surface(
        &mut self,
        params: &Params,
        kind: PendingKind,
        material_index: usize,
    ) -> ParseResult<()> {
        let material = params.unsigned(material_index)? as usize;
        self.surfaces.push(PendingSurface {
            line: params.line,
            kind,
            material,
        });
        log::debug!("Parsed {:?} (line {})", kind, params.line);
        Ok(())
    }

    fn parse_light(&mut self, params: &Params) -> ParseResult<()> {
        params.expect_at_least(9, "lgt")?;

        let light = Light::new(params.vec3(0)?, params.vec3(3)?)
            .with_specular_intensity(params.float(6)?)
            .with_shadow(params.float(7)?)
            .with_radius(params.float(8)?);

        self.lights.push(light);
        log::debug!("Parsed light (line {})", params.line);
        Ok(())
    }

    /// Resolve material references and assemble the scene.
    fn finish(self) -> ParseResult<SceneDescription> {
        let camera = self.camera.ok_or(ParseError::MissingCamera)?;
        let settings = self.settings.ok_or(ParseError::MissingSettings)?;

        let mut scene = SceneDescription::new(settings, camera);

        for pending in &self.surfaces {
            let material = self
                .materials
                .get(pending.material)
                .cloned()
                .ok_or(ParseError::UnknownMaterial {
                    line: pending.line,
                    index: pending.material,
                })?;

            let surface = match pending.kind {
                PendingKind::Sphere { center, radius } => SurfaceDesc::Sphere {
                    center,
                    radius,
                    material,
                },
                PendingKind::Plane { normal, offset } => SurfaceDesc::Plane {
                    normal,
                    offset,
                    material,
                },
                PendingKind::Box {
                    center,
                    side_length,
                } => SurfaceDesc::Box {
                    center,
                    side_length,
                    material,
                },
            };
            scene.add_surface(surface);
        }

        scene.materials = self.materials;
        scene.lights = self.lights;

        let (spheres, planes, boxes) = scene.surface_counts();
        log::info!(
            "Scene: {} materials, {} spheres, {} planes, {} boxes, {} lights",
            scene.materials.len(),
            spheres,
            planes,
            boxes,
            scene.lights.len()
        );

        Ok(scene)
    }
}

/// The parameters of one directive line.
struct Params<'a> {
    line: usize,
    values: Vec<&'a str>,
}

impl<'a> Params<'a> {
    fn new(line: usize, values: Vec<&'a str>) -> Self {
        Self { line, values }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn expect_at_least(&self, count: usize, directive: &str) -> ParseResult<()> {
        if self.values.len() < count {
            return Err(self.error(format!(
                "'{}' expects at least {} parameters, found {}",
                directive,
                count,
                self.values.len()
            )));
        }
        Ok(())
    }

    fn raw(&self, index: usize) -> ParseResult<&'a str> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| self.error(format!("missing parameter {}", index)))
    }

    fn float(&self, index: usize) -> ParseResult<f32> {
        let raw = self.raw(index)?;
        raw.parse::<f32>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber {
                line: self.line,
                value: raw.to_string(),
            })
    }

    fn unsigned(&self, index: usize) -> ParseResult<u32> {
        let raw = self.raw(index)?;
        raw.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            value: raw.to_string(),
        })
    }

    fn vec3(&self, index: usize) -> ParseResult<Vec3> {
        Ok(Vec3::new(
            self.float(index)?,
            self.float(index + 1)?,
            self.float(index + 2)?,
        ))
    }

    fn boolean(&self, index: usize) -> ParseResult<bool> {
        let raw = self.raw(index)?;
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(self.error(format!("expected true or false, found '{}'", raw))),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn degenerate(&self, message: impl Into<String>) -> ParseError {
        ParseError::Degenerate {
            line: self.line,
            message: message.into(),
        }
    }
}
