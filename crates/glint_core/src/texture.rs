//! Image textures for material colour lookup.
//!
//! Textures are stored as linear float RGBA so the tracer can modulate
//! diffuse coefficients without per-sample conversions.

use std::path::Path;

use glint_math::{Color, Vec2};
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data in RGBA format (linear, 0-1 range)
    /// Stored as [R, G, B, A] per pixel, row-major order, top row first
    pub pixels: Vec<[f32; 4]>,

    /// Source file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![[color.x, color.y, color.z, 1.0]], "<solid>")
    }

    /// Load a texture from an image file, converting sRGB to linear.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path.display().to_string()));
        }

        let pixels: Vec<[f32; 4]> = rgba
            .pixels()
            .map(|p| {
                [
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                    p[3] as f32 / 255.0, // Alpha is linear
                ]
            })
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Ok(Self::new(width, height, pixels, path.to_string_lossy()))
    }

    /// Sample colour and alpha at texture coordinates (bilinear filtering).
    ///
    /// Coordinates wrap, with (0, 0) at the bottom-left of the image.
    pub fn sample(&self, uv: Vec2) -> (Color, f32) {
        let u = uv.x.rem_euclid(1.0);
        let v = uv.y.rem_euclid(1.0);

        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image coordinates

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let lerp = |a: [f32; 4], b: [f32; 4], t: f32| -> [f32; 4] {
            [
                a[0] * (1.0 - t) + b[0] * t,
                a[1] * (1.0 - t) + b[1] * t,
                a[2] * (1.0 - t) + b[2] * t,
                a[3] * (1.0 - t) + b[3] * t,
            ]
        };

        let top = lerp(self.get_pixel(x0, y0), self.get_pixel(x1, y0), fx);
        let bottom = lerp(self.get_pixel(x0, y1), self.get_pixel(x1, y1), fx);
        let p = lerp(top, bottom, fy);

        (Color::new(p[0], p[1], p[2]), p[3])
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let idx = (y * self.width + x) as usize;
        self.pixels
            .get(idx)
            .copied()
            .unwrap_or([0.0, 0.0, 0.0, 1.0])
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
