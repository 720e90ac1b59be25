//! Glint Core - renderer-agnostic scene data for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Surface description**: `Material` (Phong coefficients, glossiness,
//!   optional texture), `Texture`, `Mesh`
//! - **Lighting and viewing**: `PointLight`, `Eye`
//! - **Render parameters**: `RenderSettings`, loadable from JSON
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Material, RenderSettings};
//!
//! let settings = RenderSettings::load_json("render.json")?;
//! let red = Material::diffuse("red", Color::new(1.0, 0.0, 0.0));
//! red.validate()?;
//! ```

pub mod eye;
pub mod light;
pub mod material;
pub mod mesh;
pub mod settings;
pub mod texture;

// Re-export commonly used types
pub use eye::Eye;
pub use light::PointLight;
pub use material::{Material, MaterialError};
pub use mesh::{Mesh, MeshError};
pub use settings::{RenderSettings, SettingsError};
pub use texture::{Texture, TextureError};
