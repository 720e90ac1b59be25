// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod frame;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use frame::{orthonormal_basis, reflect_about};
pub use interval::Interval;
pub use ray::Ray;

/// Color type alias (linear RGB radiance, one channel per component)
pub type Color = Vec3;
