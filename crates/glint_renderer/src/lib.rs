//! Glint Renderer - recursive stochastic ray tracing.
//!
//! Traces rays through a small scene of spheres, triangles and meshes,
//! shading hits with the Phong model. Glossy reflections and soft shadows
//! from emissive triangles are estimated with Monte Carlo sampling.
//!
//! Rendering is progressive: a [`RenderSession`] computes one pixel per
//! [`RenderSession::step`] so a host event loop stays responsive, and tells
//! the host when a display refresh is due. [`render_parallel`] renders a
//! whole frame at once across threads.

mod accumulation;
mod bucket;
mod camera;
mod geometry;
mod integrator;
mod mesh;
mod progressive;
mod ray_log;
mod sampler;
mod sampling;
mod scene;
mod session;
mod shading;
mod sphere;
mod triangle;

pub use accumulation::{AccumulationImage, Rgba};
pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::ImagePlane;
pub use geometry::{AreaLight, Geometry, HitRecord};
pub use integrator::Tracer;
pub use mesh::MeshObject;
pub use progressive::ProgressiveRenderer;
pub use ray_log::{NoopObserver, RayKind, RayLog, RayObserver, RaySegment};
pub use sampler::{pixel_rng, shade_pixel};
pub use sampling::{gen_f32, random_in_unit_disk, sample_triangle};
pub use scene::{Intersection, Query, Scene, SceneBuilder, SceneError, SurfaceId};
pub use session::{Cursor, RenderSession, StepOutcome};
pub use shading::{shade, Phong};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export math and scene data types
pub use glint_core::{Eye, Material, PointLight, RenderSettings};
pub use glint_math::{Color, Ray, Vec2, Vec3};

#[cfg(test)]
pub(crate) mod test_scenes;
