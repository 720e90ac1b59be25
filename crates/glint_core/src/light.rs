//! Point light sources.
//!
//! Area lights are not listed here: any triangle whose material emits is
//! discovered as a light by the renderer while scanning scene geometry.

use glint_math::{Color, Vec3};

/// An isotropic point light with no falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub colour: Color,
}

impl PointLight {
    pub fn new(position: Vec3, colour: Color) -> Self {
        Self { position, colour }
    }

    /// A white light of the given intensity.
    pub fn white(position: Vec3, intensity: f32) -> Self {
        Self::new(position, Color::splat(intensity))
    }
}
