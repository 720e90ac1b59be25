//! Antialiased pixel sampling.

use glint_math::Color;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::camera::ImagePlane;
use crate::integrator::Tracer;
use crate::sampling::gen_f32;

/// Colour of pixel (x, y): the mean radiance over an n × n grid of
/// sub-pixel samples, where n is the pixel sample count.
///
/// Without jitter each sample sits at the centre of its stratum. With
/// jitter it is pushed forward by up to one stratum in each axis, so the
/// samples of the last row and column can land in the neighbouring pixel.
pub fn shade_pixel(tracer: &Tracer<'_>, plane: &ImagePlane, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
    let settings = tracer.settings();
    let n = settings.pixel_samples.max(1);
    let step = 1.0 / n as f32;

    let mut total = Color::ZERO;
    for row in 0..n {
        for col in 0..n {
            let (jx, jy) = if settings.jitter {
                (gen_f32(rng), gen_f32(rng))
            } else {
                (0.0, 0.0)
            };
            let px = x as f32 + (col as f32 + 0.5 + jx) * step;
            let py = y as f32 + (row as f32 + 0.5 + jy) * step;

            total += tracer.trace(&plane.ray(px, py), 0, None, rng);
        }
    }

    total / (n * n) as f32
}

/// Deterministic generator for one pixel, independent of render order.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let pixel = ((y as u64) << 32) | x as u64;
    StdRng::seed_from_u64(seed ^ pixel.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
