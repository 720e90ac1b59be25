//! Random sampling helpers.
//!
//! Everything takes `&mut dyn RngCore` so one generator can be threaded
//! through the recursive tracer.

use glint_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform value in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform point (a, b) inside the unit disk, by rejection from [-1, 1]².
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> (f32, f32) {
    loop {
        let a = rng.gen_range(-1.0..1.0_f32);
        let b = rng.gen_range(-1.0..1.0_f32);
        if a * a + b * b <= 1.0 {
            return (a, b);
        }
    }
}

/// Uniform point on a triangle.
///
/// Barycentric rejection: draw alpha and beta in [0, 1) until their sum is at
/// most 1, then gamma = 1 - alpha - beta.
pub fn sample_triangle(vertices: &[Vec3; 3], rng: &mut dyn RngCore) -> Vec3 {
    let (alpha, beta) = loop {
        let alpha = gen_f32(rng);
        let beta = gen_f32(rng);
        if alpha + beta <= 1.0 {
            break (alpha, beta);
        }
    };
    let gamma = 1.0 - alpha - beta;

    gamma * vertices[0] + alpha * vertices[1] + beta * vertices[2]
}
