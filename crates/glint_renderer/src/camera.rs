//! Image plane for primary ray generation.

use glint_core::Eye;
use glint_math::{Ray, Vec3};

/// Precomputed image plane basis for one eye and resolution.
///
/// Pixel coordinates are continuous: pixel (x, y) covers
/// `[x, x+1) × [y, y+1)`, with row 0 at the bottom of the image.
#[derive(Debug, Clone, Copy)]
pub struct ImagePlane {
    pub width: u32,
    pub height: u32,

    origin: Vec3,
    // Bottom-left corner of the plane
    corner: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl ImagePlane {
    /// Place the plane at the eye's focus distance, sized by its field of view.
    pub fn new(eye: &Eye, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let focus_dist = eye.focus_distance().max(f32::EPSILON);
        let h = (eye.fov_y.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * focus_dist;
        let viewport_width = viewport_height * (width as f32 / height as f32);

        let w = eye.forward();
        let u = eye.right();
        let v = eye.true_up();

        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * v;

        let corner = eye.position + focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;

        Self {
            width,
            height,
            origin: eye.position,
            corner,
            pixel_delta_u: viewport_u / width as f32,
            pixel_delta_v: viewport_v / height as f32,
        }
    }

    /// Ray from the eye through continuous pixel position (px, py).
    pub fn ray(&self, px: f32, py: f32) -> Ray {
        let target = self.corner + px * self.pixel_delta_u + py * self.pixel_delta_v;
        Ray::new(self.origin, target - self.origin)
    }
}
