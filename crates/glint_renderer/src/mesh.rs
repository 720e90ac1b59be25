//! Triangle mesh geometry.
//!
//! Meshes are the one geometry type a ray may legitimately re-hit after
//! leaving it, so the dispatcher only excludes the originating triangle.

use std::sync::Arc;

use crate::geometry::{material_texture_colour, Geometry, HitRecord};
use crate::triangle::intersect_triangle;
use glint_core::{Material, Mesh};
use glint_math::{Aabb, Color, Interval, Ray, Vec2, Vec3};

/// A triangle mesh with one material.
pub struct MeshObject {
    mesh: Arc<Mesh>,
    material: Arc<Material>,
}

impl MeshObject {
    /// Wrap mesh data for rendering.
    pub fn new(mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        log::debug!(
            "Created mesh object: {} triangles, material '{}'",
            mesh.triangle_count(),
            material.name
        );
        Self { mesh, material }
    }

    /// Get the underlying mesh data.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Shading normal at barycentric weights (w, u, v) of a triangle.
    fn shading_normal(&self, [i0, i1, i2]: [usize; 3], w: f32, u: f32, v: f32, face: Vec3) -> Vec3 {
        match &self.mesh.normals {
            Some(normals) if normals.len() == self.mesh.positions.len() => {
                (w * normals[i0] + u * normals[i1] + v * normals[i2])
                    .try_normalize()
                    .unwrap_or(face)
            }
            _ => face,
        }
    }
}

impl Geometry for MeshObject {
    fn intersect<'a>(&'a self, ray: &Ray, excluded_part: Option<usize>, ray_t: Interval) -> Option<HitRecord<'a>> {
        let positions = &self.mesh.positions;
        let mut closest_so_far = ray_t.max;
        let mut best: Option<(usize, [usize; 3], f32, f32, f32)> = None;

        for part in 0..self.mesh.triangle_count() {
            if excluded_part == Some(part) {
                continue;
            }
            let Some(tri) = self.mesh.triangle(part) else {
                continue;
            };
            let [i0, i1, i2] = tri;
            let interval = Interval::new(ray_t.min, closest_so_far);

            if let Some((t, u, v)) = intersect_triangle(ray, positions[i0], positions[i1], positions[i2], interval) {
                closest_so_far = t;
                best = Some((part, tri, t, u, v));
            }
        }

        let (part, tri, t, u, v) = best?;
        let [i0, i1, i2] = tri;
        let w = 1.0 - u - v;

        let face = (positions[i1] - positions[i0])
            .cross(positions[i2] - positions[i0])
            .normalize();
        let normal = self.shading_normal(tri, w, u, v, face);
        // Interpolated normals may lean away from the ray even when the face does not
        let normal = if normal.dot(ray.direction()) > 0.0 { -normal } else { normal };

        let texcoords = match &self.mesh.uvs {
            Some(uvs) if uvs.len() == positions.len() => w * uvs[i0] + u * uvs[i1] + v * uvs[i2],
            _ => Vec2::new(u, v),
        };

        Some(HitRecord {
            p: ray.at(t),
            normal,
            texcoords,
            t,
            part,
            material: &self.material,
        })
    }

    fn texture_colour(&self, _point: Vec3, _part: usize, texcoords: Vec2) -> (Color, f32) {
        material_texture_colour(&self.material, texcoords)
    }

    fn supports_part_exclusion(&self) -> bool {
        true
    }

    fn materials(&self) -> Vec<&Material> {
        vec![self.material.as_ref()]
    }

    fn bounding_box(&self) -> Aabb {
        self.mesh.bounds
    }
}
