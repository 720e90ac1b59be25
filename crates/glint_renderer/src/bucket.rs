//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each pixel draws from its own
//! seeded generator, so the result does not depend on thread scheduling.

use std::time::Instant;

use glint_core::RenderSettings;
use glint_math::Color;
use rayon::prelude::*;

use crate::accumulation::AccumulationImage;
use crate::camera::ImagePlane;
use crate::integrator::Tracer;
use crate::sampler::{pixel_rng, shade_pixel};
use crate::scene::Scene;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of bucket's first column
    pub x: u32,
    /// Y coordinate of bucket's first row
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets covering the image, centre buckets first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Copy the bucket's pixels into `image`.
    pub fn write_to(&self, image: &mut AccumulationImage) {
        let width = self.bucket.width.max(1);
        for (i, colour) in self.pixels.iter().enumerate() {
            let local_x = i as u32 % width;
            let local_y = i as u32 / width;
            image.set(self.bucket.x + local_x, self.bucket.y + local_y, *colour);
        }
    }
}

/// Render a single bucket.
pub fn render_bucket(bucket: &Bucket, tracer: &Tracer<'_>, plane: &ImagePlane) -> BucketResult {
    let seed = tracer.settings().seed;
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let y = bucket.y + local_y;
            let mut rng = pixel_rng(seed, x, y);
            pixels.push(shade_pixel(tracer, plane, x, y, &mut rng));
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}

/// Render the whole image across the rayon thread pool.
pub fn render_parallel(scene: &Scene, settings: &RenderSettings, bucket_size: u32) -> AccumulationImage {
    let (width, height) = settings.image_size();
    let plane = ImagePlane::new(scene.eye(), width, height);
    let tracer = Tracer::new(scene, settings);
    let buckets = generate_buckets(width, height, bucket_size);

    log::info!(
        "Rendering {}x{} in {} buckets on {} threads",
        width,
        height,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, &tracer, &plane))
        .collect();

    let mut image = AccumulationImage::new(width, height);
    for result in &results {
        result.write_to(&mut image);
    }

    log::info!("Render complete in {:.2?}", start.elapsed());
    image
}
