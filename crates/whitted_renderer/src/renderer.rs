//! Image rendering.
//!
//! Maps pixels to screen ratios, traces one primary ray per pixel, and
//! renders buckets of the image in parallel with rayon.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{trace, Color, Scene};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Seed for the soft-shadow jitter
    pub seed: u64,
    /// Side of the square render tiles
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Image height over width, as the camera expects it.
    pub fn aspect_ratio(&self) -> f32 {
        self.height as f32 / self.width.max(1) as f32
    }
}

/// Convert a color to 8-bit RGB. Channels are clamped to [0, 1].
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * color.x.clamp(0.0, 1.0)) as u8;
    let g = (255.0 * color.y.clamp(0.0, 1.0)) as u8;
    let b = (255.0 * color.z.clamp(0.0, 1.0)) as u8;
    [r, g, b]
}

/// Screen ratios of pixel (`x`, `y`) in a `width` x `height` image.
///
/// Row 0 is the top of the image, so `y_ratio` grows upward.
pub fn pixel_ratios(x: u32, y: u32, width: u32, height: u32) -> (f32, f32) {
    let w = width as f32;
    let h = height as f32;
    ((x as f32 - w / 2.0) / w, (h / 2.0 - y as f32) / h)
}

/// Render a single pixel.
pub fn render_pixel(
    scene: &Scene,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let (x_ratio, y_ratio) = pixel_ratios(x, y, width, height);
    match scene.camera.pixel_ray(x_ratio, y_ratio) {
        Some(ray) => trace(&ray, scene, rng),
        // Outside the fisheye disc
        None => scene.background,
    }
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        for ((x, y), color) in result.bucket.pixels().zip(&result.pixels) {
            self.set(x, y, *color);
        }
    }

    /// Convert to packed RGB bytes, top row first.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Write the image as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);

        PngEncoder::new(writer).write_image(
            &self.to_rgb_bytes(),
            self.width,
            self.height,
            ColorType::Rgb8,
        )?;

        log::info!("Saved {}x{} image to {:?}", self.width, self.height, path);
        Ok(())
    }
}

/// Render the scene into a new image buffer.
///
/// Buckets are rendered in parallel, each with its own generator seeded from
/// `config.seed` and the bucket index, so the output only depends on the
/// scene and the config.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    let (width, height) = (config.width, config.height);
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidResolution { width, height });
    }

    let buckets = generate_buckets(width, height, config.bucket_size);
    log::info!(
        "Rendering {}x{} in {} buckets ({} shadow rays, {} bounces)",
        width,
        height,
        buckets.len(),
        scene.shadow_rays,
        scene.max_recursion
    );

    let start = Instant::now();
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(bucket.index as u64));
            let pixels = render_bucket(bucket, scene, width, height, &mut rng);
            log::debug!("Bucket {} done", bucket.index);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}
