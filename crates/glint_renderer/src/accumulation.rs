//! Accumulation image written by the render drivers.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glint_math::Color;
use image::{ImageResult, Rgba as PngPixel, RgbaImage};

/// One radiance sample. Alpha 0 marks a pixel that has not been computed.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// A computed pixel.
    pub fn opaque(color: Color) -> Self {
        Self {
            r: color.x,
            g: color.y,
            b: color.z,
            a: 1.0,
        }
    }

    pub fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b)
    }
}

/// Width × height radiance buffer, row 0 at the bottom.
#[derive(Debug, Clone)]
pub struct AccumulationImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl AccumulationImage {
    /// Create a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::zeroed(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Mark every pixel as not yet computed.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::zeroed());
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    /// Store the computed colour of (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = Rgba::opaque(color);
    }

    pub fn is_rendered(&self, x: u32, y: u32) -> bool {
        self.get(x, y).a > 0.0
    }

    /// Number of computed pixels.
    pub fn rendered_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0.0).count()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw float RGBA bytes, ready for upload to a display texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// 8-bit copy with row 0 at the top, radiance clamped to [0, 1].
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.get(x, self.height - 1 - y);
            PngPixel([to_byte(p.r), to_byte(p.g), to_byte(p.b), to_byte(p.a)])
        })
    }

    /// Save as PNG, enlarging each pixel to a `block` × `block` square.
    pub fn save_png(&self, path: impl AsRef<Path>, block: u32) -> ImageResult<()> {
        let image = self.to_rgba8();
        let block = block.max(1);
        if block == 1 {
            return image.save(path);
        }

        image::imageops::resize(
            &image,
            self.width * block,
            self.height * block,
            image::imageops::FilterType::Nearest,
        )
        .save(path)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }
}

#[inline]
fn to_byte(value: f32) -> u8 {
    (255.0 * value.clamp(0.0, 1.0)).round() as u8
}
