//! Geometry capability and the per-surface hit record.

use glint_core::Material;
use glint_math::{Aabb, Color, Interval, Ray, Vec2, Vec3};

/// Record of a ray-surface intersection reported by one geometry object.
#[derive(Clone, Debug)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Texture coordinates
    pub texcoords: Vec2,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Sub-part that was hit (triangle index for meshes, 0 otherwise)
    pub part: usize,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Orient `outward_normal` so it points against the ray direction.
#[inline]
pub(crate) fn face_normal(ray: &Ray, outward_normal: Vec3) -> Vec3 {
    if ray.direction().dot(outward_normal) < 0.0 {
        outward_normal
    } else {
        -outward_normal
    }
}

/// An emissive triangle that acts as an area light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaLight {
    pub vertices: [Vec3; 3],
    pub emission: Color,
}

/// A scene object that rays can hit.
pub trait Geometry: Send + Sync {
    /// Find the nearest hit with `t` strictly inside `ray_t`.
    ///
    /// `excluded_part` names a sub-part that must not be reported, used
    /// when the ray leaves that part. Degenerate configurations (parallel
    /// rays, zero-area faces) report no hit.
    fn intersect<'a>(&'a self, ray: &Ray, excluded_part: Option<usize>, ray_t: Interval) -> Option<HitRecord<'a>>;

    /// Colour and alpha of the surface texture at a hit.
    fn texture_colour(&self, point: Vec3, part: usize, texcoords: Vec2) -> (Color, f32);

    /// Whether rays leaving this object may hit its other parts.
    ///
    /// Convex primitives return false and are skipped entirely when they
    /// originate a ray; composite surfaces only exclude the originating part.
    fn supports_part_exclusion(&self) -> bool {
        false
    }

    /// The area light this object represents, if it is an emissive triangle.
    fn area_light(&self) -> Option<AreaLight> {
        None
    }

    /// Every material used by the object.
    fn materials(&self) -> Vec<&Material>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// Texture lookup shared by the single-material geometry types.
pub(crate) fn material_texture_colour(material: &Material, texcoords: Vec2) -> (Color, f32) {
    match &material.texture {
        Some(texture) => texture.sample(texcoords),
        None => (Color::ONE, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Texture;
    use std::sync::Arc;

    #[test]
    fn test_face_normal_points_against_ray() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        assert_eq!(face_normal(&ray, Vec3::Z), Vec3::Z);
        assert_eq!(face_normal(&ray, Vec3::NEG_Z), Vec3::Z);
    }

    #[test]
    fn test_untextured_material_is_white() {
        let material = Material::diffuse("plain", Color::new(0.2, 0.4, 0.6));
        assert_eq!(material_texture_colour(&material, Vec2::ZERO), (Color::ONE, 1.0));

        let textured = material.with_texture(Arc::new(Texture::solid_color(Color::new(0.5, 0.0, 1.0))));
        let (colour, alpha) = material_texture_colour(&textured, Vec2::new(0.3, 0.7));
        assert!((colour - Color::new(0.5, 0.0, 1.0)).length() < 1e-6);
        assert_eq!(alpha, 1.0);
    }
}
