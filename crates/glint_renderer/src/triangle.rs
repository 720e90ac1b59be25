//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.
//! A triangle whose material emits light doubles as an area light.

use std::sync::Arc;

use crate::geometry::{face_normal, material_texture_colour, AreaLight, Geometry, HitRecord};
use glint_core::Material;
use glint_math::{Aabb, Color, Interval, Ray, Vec2, Vec3};

/// Möller-Trumbore intersection.
///
/// Returns `(t, u, v)` where `u` and `v` are the barycentric weights of
/// `v1` and `v2`. Parallel rays and zero-area triangles miss.
pub(crate) fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3, ray_t: Interval) -> Option<(f32, f32, f32)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);

    // Check if intersection is outside triangle (u parameter)
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);

    // Check if intersection is outside triangle (v parameter)
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !ray_t.surrounds(t) {
        return None;
    }

    Some((t, u, v))
}

/// A triangle primitive.
pub struct Triangle {
    /// Vertices
    vertices: [Vec3; 3],
    /// Per-vertex texture coordinates
    uvs: [Vec2; 3],
    /// Pre-computed face normal (unit length, zero if degenerate)
    normal: Vec3,
    /// Material
    material: Arc<Material>,
    /// Bounding box
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        let bbox = Aabb::from_point_cloud(&[v0, v1, v2]);

        Self {
            vertices: [v0, v1, v2],
            uvs: [Vec2::ZERO, Vec2::X, Vec2::Y],
            normal,
            material,
            bbox,
        }
    }

    /// Set per-vertex texture coordinates.
    pub fn with_uvs(mut self, uvs: [Vec2; 3]) -> Self {
        self.uvs = uvs;
        self
    }

    /// Get the triangle's vertices.
    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }
}

impl Geometry for Triangle {
    fn intersect<'a>(&'a self, ray: &Ray, _excluded_part: Option<usize>, ray_t: Interval) -> Option<HitRecord<'a>> {
        let [v0, v1, v2] = self.vertices;
        let (t, u, v) = intersect_triangle(ray, v0, v1, v2, ray_t)?;
        let w = 1.0 - u - v;

        Some(HitRecord {
            p: ray.at(t),
            normal: face_normal(ray, self.normal),
            texcoords: w * self.uvs[0] + u * self.uvs[1] + v * self.uvs[2],
            t,
            part: 0,
            material: &self.material,
        })
    }

    fn texture_colour(&self, _point: Vec3, _part: usize, texcoords: Vec2) -> (Color, f32) {
        material_texture_colour(&self.material, texcoords)
    }

    fn area_light(&self) -> Option<AreaLight> {
        self.material.is_emissive().then(|| AreaLight {
            vertices: self.vertices,
            emission: self.material.emission,
        })
    }

    fn materials(&self) -> Vec<&Material> {
        vec![self.material.as_ref()]
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
