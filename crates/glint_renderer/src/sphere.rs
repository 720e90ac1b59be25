//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::geometry::{face_normal, material_texture_colour, Geometry, HitRecord};
use glint_core::Material;
use glint_math::{Aabb, Color, Interval, Ray, Vec2, Vec3};

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> Vec2 {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        Vec2::new(phi / (2.0 * PI), theta / PI)
    }
}

impl Geometry for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray, _excluded_part: Option<usize>, ray_t: Interval) -> Option<HitRecord<'a>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if a == 0.0 || self.radius == 0.0 {
            return None;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;

        Some(HitRecord {
            p,
            normal: face_normal(ray, outward_normal),
            texcoords: Self::get_sphere_uv(outward_normal),
            t: root,
            part: 0,
            material: &self.material,
        })
    }

    fn texture_colour(&self, _point: Vec3, _part: usize, texcoords: Vec2) -> (Color, f32) {
        material_texture_colour(&self.material, texcoords)
    }

    fn materials(&self) -> Vec<&Material> {
        vec![self.material.as_ref()]
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Arc::new(Material::diffuse("grey", Color::splat(0.5))))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.intersect(&ray, None, Interval::AHEAD).unwrap();
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
        assert_eq!(rec.part, 0);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersect(&ray, None, Interval::AHEAD).is_none());
    }

    #[test]
    fn test_sphere_respects_max_t() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -10.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(sphere.intersect(&ray, None, Interval::new(0.0, 5.0)).is_none());
        assert!(sphere.intersect(&ray, None, Interval::new(0.0, 9.5)).is_some());
    }

    #[test]
    fn test_ray_from_inside_hits_far_side() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.intersect(&ray, None, Interval::AHEAD).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-6);
        // Normal flipped to face the ray
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_direction_misses() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);

        assert!(sphere.intersect(&ray, None, Interval::AHEAD).is_none());
    }
}
