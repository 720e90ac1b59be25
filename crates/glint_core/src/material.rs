//! Phong surface materials.

use std::sync::Arc;

use glint_math::Color;
use thiserror::Error;

use crate::texture::Texture;

/// Errors that make a material unusable for rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    #[error("material '{name}' has glossiness {glossiness}, outside the range [0,1]")]
    GlossinessOutOfRange { name: String, glossiness: f32 },

    #[error("material '{name}' has negative shininess {shininess}")]
    NegativeShininess { name: String, shininess: f32 },
}

/// A Phong material.
///
/// Materials are owned by the scene and shared by reference between every
/// surface that uses them. They are never modified during a render pass.
#[derive(Clone, Debug)]
pub struct Material {
    /// Material name (for diagnostics)
    pub name: String,

    /// Emitted radiance (Ie); nonzero makes a triangle an area light
    pub emission: Color,

    /// Ambient coefficient (ka)
    pub ambient: Color,

    /// Diffuse coefficient (kd), modulated by the texture colour
    pub diffuse: Color,

    /// Specular coefficient (ks)
    pub specular: Color,

    /// Phong specular exponent (n)
    pub shininess: f32,

    /// Glossiness in [0,1]: 1 = mirror, 0 = no reflection
    pub glossiness: f32,

    /// Optional diffuse texture
    pub texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            emission: Color::ZERO,
            ambient: Color::ZERO,
            diffuse: Color::splat(0.5), // Grey default
            specular: Color::ZERO,
            shininess: 1.0,
            glossiness: 0.0,
            texture: None,
        }
    }
}

impl Material {
    /// Create a purely diffuse material.
    pub fn diffuse(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// Create a material that only emits light.
    pub fn emitter(name: impl Into<String>, emission: Color) -> Self {
        Self {
            name: name.into(),
            emission,
            diffuse: Color::ZERO,
            ..Default::default()
        }
    }

    /// Set the ambient coefficient.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the specular coefficient and exponent.
    pub fn with_specular(mut self, specular: Color, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Set the glossiness.
    pub fn with_glossiness(mut self, glossiness: f32) -> Self {
        self.glossiness = glossiness;
        self
    }

    /// Attach a diffuse texture.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.length_squared() > 0.0
    }

    /// Reject materials the tracer cannot shade.
    pub fn validate(&self) -> Result<(), MaterialError> {
        if !(0.0..=1.0).contains(&self.glossiness) {
            return Err(MaterialError::GlossinessOutOfRange {
                name: self.name.clone(),
                glossiness: self.glossiness,
            });
        }
        if self.shininess < 0.0 {
            return Err(MaterialError::NegativeShininess {
                name: self.name.clone(),
                shininess: self.shininess,
            });
        }
        Ok(())
    }

    /// Glossiness after applying the interactive glossiness factor.
    ///
    /// `g' = 1 - (1 - g) / factor`, so factors above 1 tighten the
    /// reflection cone and factors below 1 widen it. Clamped to [0,1].
    pub fn effective_glossiness(&self, factor: f32) -> f32 {
        (1.0 - (1.0 - self.glossiness) / factor).clamp(0.0, 1.0)
    }
}
