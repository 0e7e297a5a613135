//! Whitted Core - scene description for the whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `Material`, `Light`, `CameraSettings`,
//!   `RenderSettings`, `SurfaceDesc`, `SceneDescription`
//! - **Scene files**: parsing of the line-oriented `.txt` scene format
//!
//! Nothing here knows how to intersect or shade; the renderer turns a
//! `SceneDescription` into its own surfaces.
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::load_scene;
//!
//! let description = load_scene("scenes/pool.txt")?;
//! println!("Loaded {} surfaces, {} lights",
//!     description.surfaces.len(),
//!     description.lights.len());
//! ```

pub mod light;
pub mod material;
pub mod parser;
pub mod scene;

// Re-export commonly used types
pub use light::Light;
pub use material::{Color, Material};
pub use parser::{load_scene, parse_scene, ParseError, ParseResult};
pub use scene::{CameraSettings, RenderSettings, SceneDescription, SurfaceDesc};
