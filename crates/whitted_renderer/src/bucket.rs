//! Square image tiles, the unit of parallel work in [`render`](crate::render).

use crate::renderer::render_pixel;
use crate::{Color, Scene};
use rand::RngCore;

/// Default bucket side in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangle of pixels. Buckets on the right and bottom edges are clipped
/// to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Position in render order; also seeds the bucket's generator
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Image coordinates of every pixel in the bucket, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let Bucket {
            x,
            y,
            width,
            height,
            ..
        } = *self;
        (y..y + height).flat_map(move |row| (x..x + width).map(move |column| (column, row)))
    }

    /// Squared distance between the bucket center and the image center, in
    /// half pixels so it stays an exact integer.
    fn center_distance(&self, image_width: u32, image_height: u32) -> u64 {
        let dx = (2 * self.x + self.width).abs_diff(image_width) as u64;
        let dy = (2 * self.y + self.height).abs_diff(image_height) as u64;
        dx * dx + dy * dy
    }
}

/// Tile a `width` x `height` image, nearest-to-center buckets first.
///
/// Equally distant buckets stay in row-major order. A `bucket_size` of 0 is
/// treated as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(|y| {
            (0..width).step_by(size as usize).map(move |x| Bucket {
                index: 0,
                x,
                y,
                width: size.min(width - x),
                height: size.min(height - y),
            })
        })
        .collect();

    buckets.sort_by_key(|bucket| bucket.center_distance(width, height));
    for (index, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = index;
    }

    buckets
}

/// Trace every pixel of `bucket` in an image `width` x `height`.
///
/// Colors come back in the order of [`Bucket::pixels`].
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    width: u32,
    height: u32,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());
    for (x, y) in bucket.pixels() {
        pixels.push(render_pixel(scene, x, y, width, height, rng));
    }
    pixels
}

/// A rendered bucket, ready to be copied into the image.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(width: u32, height: u32, size: u32) -> Vec<u32> {
        let mut hits = vec![0; (width * height) as usize];
        for bucket in generate_buckets(width, height, size) {
            for (x, y) in bucket.pixels() {
                hits[(y * width + x) as usize] += 1;
            }
        }
        hits
    }

    #[test]
    fn test_every_pixel_covered_once() {
        for (width, height, size) in [(128, 128, 64), (100, 70, 32), (7, 5, 3), (1, 9, 4)] {
            let hits = coverage(width, height, size);
            assert!(hits.iter().all(|&n| n == 1), "{width}x{height} / {size}");
        }
    }

    #[test]
    fn test_edge_buckets_are_clipped() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);

        let corner = buckets.iter().find(|b| b.x == 64 && b.y == 64).unwrap();
        assert_eq!((corner.width, corner.height), (36, 6));
        assert_eq!(corner.pixel_count(), 216);
    }

    #[test]
    fn test_center_bucket_first() {
        let buckets = generate_buckets(96, 96, 32);
        assert_eq!(buckets.len(), 9);
        assert_eq!((buckets[0].x, buckets[0].y), (32, 32));

        // The four corners come last
        for bucket in &buckets[5..] {
            assert!(bucket.x != 32 && bucket.y != 32, "{bucket:?}");
        }
    }

    #[test]
    fn test_order_moves_outward() {
        let buckets = generate_buckets(300, 200, 32);
        let distances: Vec<_> = buckets.iter().map(|b| b.center_distance(300, 200)).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));

        let indices: Vec<_> = buckets.iter().map(|b| b.index).collect();
        assert_eq!(indices, (0..buckets.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_pixels_row_major() {
        let bucket = Bucket {
            index: 0,
            x: 4,
            y: 10,
            width: 2,
            height: 2,
        };
        let pixels: Vec<_> = bucket.pixels().collect();
        assert_eq!(pixels, vec![(4, 10), (5, 10), (4, 11), (5, 11)]);
    }

    #[test]
    fn test_zero_bucket_size() {
        assert_eq!(generate_buckets(3, 2, 0).len(), 6);
        assert!(generate_buckets(0, 10, 8).is_empty());
    }
}
