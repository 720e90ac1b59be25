//! Triangle mesh geometry data.
//!
//! This module provides a renderer-agnostic mesh representation that can be
//! built in code or loaded from Wavefront OBJ files. The renderer wraps it
//! in a geometry object that supports excluding individual triangles from
//! self-intersection tests.

use std::path::Path;

use glint_math::{Aabb, Vec2, Vec3};
use thiserror::Error;

/// Errors that can occur while loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No models found in OBJ file {0}")]
    NoModels(String),

    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// A mesh consisting of vertex positions, optional normals and UVs, and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (optional - flat face normals are used if absent)
    pub normals: Option<Vec<Vec3>>,

    /// UV coordinates (optional - one per vertex)
    pub uvs: Option<Vec<Vec2>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    ///
    /// Fails if any index does not name a vertex.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Result<Self, MeshError> {
        Self::new_with_uvs(positions, indices, normals, None)
    }

    /// Create a new mesh with UV coordinates.
    pub fn new_with_uvs(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vec3>>,
        uvs: Option<Vec<Vec2>>,
    ) -> Result<Self, MeshError> {
        if let Some((i, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= positions.len())
        {
            return Err(MeshError::IndexOutOfRange {
                triangle: i / 3,
                index,
                vertex_count: positions.len(),
            });
        }

        let bounds = Aabb::from_point_cloud(&positions);
        let mut indices = indices;
        indices.truncate(indices.len() - indices.len() % 3);

        Ok(Self {
            positions,
            normals,
            uvs: uvs.filter(|uvs| !uvs.is_empty()),
            indices,
            bounds,
        })
    }

    /// Load the first model of a Wavefront OBJ file.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )?;

        let model = models
            .first()
            .ok_or_else(|| MeshError::NoModels(path.display().to_string()))?;
        let mesh = &model.mesh;

        let positions: Vec<Vec3> = mesh.positions.chunks_exact(3).map(Vec3::from_slice).collect();

        let normals = if mesh.normals.is_empty() {
            None
        } else {
            Some(mesh.normals.chunks_exact(3).map(Vec3::from_slice).collect())
        };

        let uvs = if mesh.texcoords.is_empty() {
            None
        } else {
            Some(mesh.texcoords.chunks_exact(2).map(Vec2::from_slice).collect())
        };

        let mut result = Self::new_with_uvs(positions, mesh.indices.clone(), normals, uvs)?;
        result.ensure_normals();

        log::info!(
            "Loaded mesh {}: {} vertices, {} triangles",
            path.display(),
            result.vertex_count(),
            result.triangle_count()
        );

        Ok(result)
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Each vertex normal is the normalized sum of the (area-weighted) normals
    /// of the counter-clockwise faces sharing that vertex.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for face in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];

            let edge1 = self.positions[i1] - self.positions[i0];
            let edge2 = self.positions[i2] - self.positions[i0];
            let face_normal = edge1.cross(edge2);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Y); // Default up normal for degenerate cases
        }

        self.normals = Some(normals);
    }

    /// Ensure the mesh has one normal per vertex, computing them if necessary.
    pub fn ensure_normals(&mut self) {
        let should_compute = match &self.normals {
            None => true,
            Some(normals) => normals.len() != self.positions.len(),
        };

        if should_compute {
            if let Some(normals) = &self.normals {
                log::debug!(
                    "Normals array length ({}) doesn't match vertex count ({}), computing smooth normals",
                    normals.len(),
                    self.positions.len()
                );
            }
            self.compute_normals();
        }
    }

    /// Check if the mesh has normals.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Get the vertex indices of triangle `i`.
    pub fn triangle(&self, i: usize) -> Option<[usize; 3]> {
        let face = self.indices.get(i * 3..i * 3 + 3)?;
        Some([face[0] as usize, face[1] as usize, face[2] as usize])
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
