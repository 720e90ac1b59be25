//! Recursive radiance integrator.
//!
//! Whitted-style tracing with Phong shading, extended with Monte Carlo
//! estimates for glossy reflection and soft shadows from emissive triangles.

use glint_core::{Material, RenderSettings};
use glint_math::{orthonormal_basis, reflect_about, Color, Interval, Ray, Vec3};
use rand::RngCore;

use crate::ray_log::{NoopObserver, RayObserver};
use crate::sampling::{random_in_unit_disk, sample_triangle};
use crate::scene::{Query, Scene, SurfaceId, TARGET_TOLERANCE};
use crate::shading::{shade, Phong};

/// Shading context for one surface hit.
struct SurfacePoint {
    p: Vec3,
    n: Vec3,
    /// Unit direction back along the incoming ray
    e: Vec3,
    /// Mirror reflection of `e` about `n`
    r: Vec3,
    surface: SurfaceId,
    phong: Phong,
}

/// Computes the radiance carried by rays through a scene.
///
/// Tracing only reads the scene and settings; the observer is the only
/// thing a trace writes to.
pub struct Tracer<'s> {
    scene: &'s Scene,
    settings: &'s RenderSettings,
    observer: &'s dyn RayObserver,
}

impl<'s> Tracer<'s> {
    pub fn new(scene: &'s Scene, settings: &'s RenderSettings) -> Self {
        Self {
            scene,
            settings,
            observer: &NoopObserver,
        }
    }

    /// Report every tested ray to `observer`.
    pub fn with_observer(mut self, observer: &'s dyn RayObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    pub fn settings(&self) -> &'s RenderSettings {
        self.settings
    }

    /// Radiance arriving back along `ray`.
    ///
    /// `depth` is the depth of the caller: 0 for primary rays. `origin` is
    /// the surface the ray leaves from, if any. Rays deeper than
    /// `max_depth` carry nothing; primary rays that miss see the
    /// background, other misses are black.
    pub fn trace(&self, ray: &Ray, depth: u32, origin: Option<SurfaceId>, rng: &mut dyn RngCore) -> Color {
        let depth = depth + 1;
        if depth > self.settings.max_depth {
            return Color::ZERO;
        }

        let Some(hit) = self.scene.find_first_hit(ray, origin, Query::View, self.observer) else {
            return if depth == 1 {
                self.settings.background_colour()
            } else {
                Color::ZERO
            };
        };

        let record = &hit.record;
        let material = record.material;
        let object = &self.scene.objects()[hit.object];
        let (texture, _alpha) = object.texture_colour(record.p, record.part, record.texcoords);

        let n = record.normal;
        let e = (-ray.direction()).normalize_or_zero();
        let point = SurfacePoint {
            p: record.p,
            n,
            e,
            r: reflect_about(e, n),
            surface: hit.surface(),
            phong: Phong::from_material(material, texture),
        };

        let mut radiance = material.emission + material.ambient * self.settings.ambient_light();
        radiance += self.reflection(&point, material, depth, rng);
        radiance += self.point_lights(&point);
        radiance += self.area_lights(&point, rng);
        radiance
    }

    /// Mirror or glossy reflection, chosen by the material's glossiness.
    fn reflection(&self, point: &SurfacePoint, material: &Material, depth: u32, rng: &mut dyn RngCore) -> Color {
        let samples = self.settings.ray_samples;

        // A single ray sample always takes the mirror path, even for matte surfaces
        if material.glossiness >= 1.0 || samples <= 1 {
            return self.mirror(point, depth, rng);
        }
        if material.glossiness <= 0.0 {
            return Color::ZERO;
        }

        let glossiness = material.effective_glossiness(self.settings.glossiness_factor);
        if glossiness >= 1.0 {
            return self.mirror(point, depth, rng);
        }

        // Sample a cone around R with half-angle acos(g')
        let distance = 1.0 / glossiness.acos().tan();
        let (u, v) = orthonormal_basis(point.r);

        let mut total = Color::ZERO;
        for _ in 0..samples {
            let (a, b) = random_in_unit_disk(rng);
            let direction = (distance * point.r + a * u + b * v).normalize_or_zero();
            let incoming = self.trace(&Ray::new(point.p, direction), depth, Some(point.surface), rng);
            total += shade(point.n, direction, point.e, point.r, &point.phong, incoming);
        }
        total / samples as f32
    }

    /// One reflection ray along R.
    fn mirror(&self, point: &SurfacePoint, depth: u32, rng: &mut dyn RngCore) -> Color {
        let reflected = Ray::new(point.p, point.r);
        let incoming = self.trace(&reflected, depth, Some(point.surface), rng);
        shade(point.n, point.r, point.e, point.e, &point.phong, incoming)
    }

    /// Direct light from unoccluded point lights.
    fn point_lights(&self, point: &SurfacePoint) -> Color {
        let mut total = Color::ZERO;

        for light in self.scene.point_lights(self.settings.max_point_lights) {
            let to_light = light.position - point.p;
            let distance = to_light.length();
            if distance <= 0.0 {
                continue;
            }
            let l = to_light / distance;
            if point.n.dot(l) <= 0.0 {
                continue;
            }

            let shadow_ray = Ray::new(point.p, l);
            let query = Query::Shadow {
                target: light.position,
            };
            let occluded = self
                .scene
                .find_first_hit(&shadow_ray, Some(point.surface), query, self.observer)
                .is_some_and(|blocker| blocker.record.t <= distance);
            if occluded {
                continue;
            }

            total += shade(point.n, l, point.e, reflect_about(l, point.n), &point.phong, light.colour);
        }

        total
    }

    /// Soft shadows from every emissive triangle other than the hit object.
    fn area_lights(&self, point: &SurfacePoint, rng: &mut dyn RngCore) -> Color {
        let samples = self.settings.ray_samples;
        if samples == 0 {
            return Color::ZERO;
        }

        let mut total = Color::ZERO;

        for (index, object) in self.scene.objects().iter().enumerate() {
            if index == point.surface.object {
                continue;
            }
            let Some(light) = object.area_light() else {
                continue;
            };

            let mut sum = Color::ZERO;
            for _ in 0..samples {
                let target = sample_triangle(&light.vertices, rng);
                let to_target = target - point.p;
                let distance = to_target.length();
                if distance <= 0.0 {
                    continue;
                }
                let l = to_target / distance;

                // Only rays whose nearest hit is the sampled point reach the light
                let shadow_ray = Ray::new(point.p, l);
                let arrival = Interval::new(distance - TARGET_TOLERANCE, distance + TARGET_TOLERANCE);
                let reached = self
                    .scene
                    .find_first_hit(&shadow_ray, Some(point.surface), Query::Shadow { target }, self.observer)
                    .is_some_and(|hit| arrival.contains(hit.record.t));
                if !reached {
                    continue;
                }

                sum += shade(point.n, l, point.e, reflect_about(l, point.n), &point.phong, light.emission);
            }

            // Average over the samples that reached the light, scaled by the
            // fraction that did: sum / hits * hits / samples
            total += sum / samples as f32;
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray_log::RayLog;
    use crate::test_scenes::{self, Cover};
    use crate::{Sphere, Triangle};
    use glint_core::{Eye, PointLight};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_depth_cutoff_is_strict() {
        let scene = test_scenes::red_sphere();
        let settings = RenderSettings {
            background: [0.2, 0.3, 0.4],
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, &settings);
        let mut rng = rng();

        let rays = [
            Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z),
            Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z),
            Ray::new(Vec3::new(0.0, 3.0, 5.0), Vec3::new(0.0, -0.5, -1.0)),
        ];
        for ray in &rays {
            assert_eq!(tracer.trace(ray, settings.max_depth, None, &mut rng), Color::ZERO);
            assert_eq!(tracer.trace(ray, settings.max_depth + 3, None, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_primary_miss_sees_background() {
        let scene = test_scenes::red_sphere();
        let settings = RenderSettings {
            background: [0.2, 0.3, 0.4],
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, &settings);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);

        assert_eq!(tracer.trace(&ray, 0, None, &mut rng()), Color::new(0.2, 0.3, 0.4));
        // A secondary ray that escapes is black
        assert_eq!(tracer.trace(&ray, 1, None, &mut rng()), Color::ZERO);
    }

    #[test]
    fn test_diffuse_point_light_exact() {
        let material = Arc::new(Material {
            emission: Color::new(0.01, 0.02, 0.03),
            ..Material::diffuse("matte", Color::new(0.9, 0.5, 0.1)).with_ambient(Color::splat(0.5))
        });
        let light = PointLight::new(Vec3::new(0.0, 5.0, 5.0), Color::new(1.0, 0.8, 0.6));
        let scene = Scene::builder(Eye::default())
            .object(Sphere::new(Vec3::ZERO, 1.0, material.clone()))
            .light(light)
            .build()
            .unwrap();
        let settings = RenderSettings {
            ambient: [0.1, 0.2, 0.3],
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, &settings);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let c = tracer.trace(&ray, 0, None, &mut rng());

        let p = Vec3::new(0.0, 0.0, 1.0);
        let l = (light.position - p).normalize();
        let expected = material.emission
            + material.ambient * Color::new(0.1, 0.2, 0.3)
            + Vec3::Z.dot(l) * material.diffuse * light.colour;
        assert!((c - expected).length() < 1e-5, "{c} != {expected}");
    }

    #[test]
    fn test_occluder_blocks_point_light() {
        let light = PointLight::white(Vec3::new(0.0, 0.0, 10.0), 1.0);
        let red = Arc::new(Material::diffuse("red", Color::new(1.0, 0.0, 0.0)));
        let eye = Eye::new(Vec3::new(3.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(eye.position, (Vec3::new(0.0, 0.0, 1.0) - eye.position).normalize());
        let settings = RenderSettings::default();

        let open = Scene::builder(eye)
            .object(Sphere::new(Vec3::ZERO, 1.0, red.clone()))
            .light(light)
            .build()
            .unwrap();
        let lit = Tracer::new(&open, &settings).trace(&ray, 0, None, &mut rng());
        assert!(lit.x > 0.0);

        let blocked = Scene::builder(eye)
            .object(Sphere::new(Vec3::ZERO, 1.0, red.clone()))
            .object(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 0.5, red.clone()))
            .light(light)
            .build()
            .unwrap();
        let shadowed = Tracer::new(&blocked, &settings).trace(&ray, 0, None, &mut rng());
        assert_eq!(shadowed, Color::ZERO);
    }

    #[test]
    fn test_mirror_recurses_along_reflection() {
        let mirror = Arc::new(
            Material::diffuse("mirror", Color::ZERO)
                .with_specular(Color::ONE, 1.0)
                .with_glossiness(1.0),
        );
        let scene = Scene::builder(Eye::default())
            .object(Sphere::new(Vec3::ZERO, 1.0, mirror))
            .light(PointLight::white(Vec3::new(0.0, 5.0, 5.0), 1.0))
            .build()
            .unwrap();
        let settings = RenderSettings::default();
        let log = RayLog::new();
        let tracer = Tracer::new(&scene, &settings).with_observer(&log);

        let direction = Vec3::new(0.1, 0.05, -1.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), direction);
        tracer.trace(&ray, 0, None, &mut rng());

        let view_rays: Vec<_> = log.take().into_iter().filter(|s| !s.kind.is_shadow()).collect();
        assert_eq!(view_rays.len(), 2, "a mirror spawns exactly one reflection ray");

        let hit_point = view_rays[0].end;
        let normal = hit_point.normalize();
        let expected = direction - 2.0 * direction.dot(normal) * normal;
        assert!((view_rays[1].start - hit_point).length() < 1e-5);
        assert!((view_rays[1].direction() - expected).length() < 1e-4);
    }

    #[test]
    fn test_glossy_spawns_ray_samples() {
        let glossy = Arc::new(
            Material::diffuse("glossy", Color::splat(0.2))
                .with_specular(Color::splat(0.5), 10.0)
                .with_glossiness(0.9),
        );
        let scene = Scene::builder(Eye::default())
            .object(Sphere::new(Vec3::ZERO, 1.0, glossy))
            .light(PointLight::white(Vec3::new(0.0, 5.0, 5.0), 1.0))
            .build()
            .unwrap();
        let settings = RenderSettings {
            ray_samples: 8,
            ..Default::default()
        };
        let log = RayLog::new();
        let tracer = Tracer::new(&scene, &settings).with_observer(&log);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        tracer.trace(&ray, 0, None, &mut rng());

        let view_rays: Vec<_> = log.take().into_iter().filter(|s| !s.kind.is_shadow()).collect();
        assert_eq!(view_rays.len(), 1 + 8);

        // Every sample stays inside the cone around the mirror direction
        let cos_half = 0.9_f32;
        for sample in &view_rays[1..] {
            assert!(sample.direction().dot(Vec3::Z) >= cos_half - 1e-4);
        }
    }

    #[test]
    fn test_zero_glossiness_has_no_reflection() {
        let matte = Arc::new(Material::diffuse("matte", Color::ONE).with_specular(Color::ONE, 5.0));
        let scene = Scene::builder(Eye::default())
            .object(Sphere::new(Vec3::ZERO, 1.0, matte))
            .light(PointLight::white(Vec3::new(0.0, 5.0, 5.0), 1.0))
            .build()
            .unwrap();
        let settings = RenderSettings {
            ray_samples: 2,
            ..Default::default()
        };
        let log = RayLog::new();
        let tracer = Tracer::new(&scene, &settings).with_observer(&log);

        tracer.trace(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z), 0, None, &mut rng());

        let view_rays = log.take().into_iter().filter(|s| !s.kind.is_shadow()).count();
        assert_eq!(view_rays, 1);
    }

    #[test]
    fn test_single_sample_mirrors_matte_surface() {
        let matte = Arc::new(Material::diffuse("matte", Color::new(1.0, 0.0, 0.0)));
        let glow = Arc::new(Material::emitter("glow", Color::splat(2.0)));
        let scene = Scene::builder(Eye::default())
            .object(Sphere::new(Vec3::ZERO, 1.0, matte))
            .object(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, glow))
            .light(PointLight::white(Vec3::new(0.0, 0.0, -10.0), 1.0))
            .build()
            .unwrap();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        let single = RenderSettings {
            ray_samples: 1,
            ..Default::default()
        };
        let c = Tracer::new(&scene, &single).trace(&ray, 0, None, &mut rng());
        assert!((c - Color::new(2.0, 0.0, 0.0)).length() < 1e-5, "{c}");

        let several = RenderSettings {
            ray_samples: 4,
            ..Default::default()
        };
        let c = Tracer::new(&scene, &several).trace(&ray, 0, None, &mut rng());
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_area_light_visibility() {
        let settings = RenderSettings {
            ray_samples: 64,
            ..Default::default()
        };
        let ray = Ray::new(Vec3::new(0.0, 0.5, 3.0), Vec3::new(0.0, -0.5, -3.0).normalize());

        let open = test_scenes::floor_under_lamp(Cover::None);
        let half = test_scenes::floor_under_lamp(Cover::Half);
        let full = test_scenes::floor_under_lamp(Cover::Full);

        let c_open = Tracer::new(&open, &settings).trace(&ray, 0, None, &mut rng());
        let c_half = Tracer::new(&half, &settings).trace(&ray, 0, None, &mut rng());
        let c_full = Tracer::new(&full, &settings).trace(&ray, 0, None, &mut rng());

        assert!(c_open.x > 0.0);
        assert!(c_half.x > 0.0);
        assert!(c_half.x < c_open.x);
        assert_eq!(c_full, Color::ZERO);
    }

    #[test]
    fn test_area_light_needs_shadow_rays_to_reach_lamp() {
        let settings = RenderSettings {
            ray_samples: 64,
            ..Default::default()
        };
        let ray = Ray::new(Vec3::new(0.0, 0.5, 3.0), Vec3::new(0.0, -0.5, -3.0).normalize());

        // Shadow rays lie in the lamp's plane and never hit it
        let edge_on = test_scenes::edge_on_lamp();
        let c = Tracer::new(&edge_on, &settings).trace(&ray, 0, None, &mut rng());
        assert_eq!(c, Color::ZERO);

        // A blocker just short of the lamp is hit outside the arrival tolerance
        let snug = test_scenes::floor_under_lamp(Cover::Snug);
        let c = Tracer::new(&snug, &settings).trace(&ray, 0, None, &mut rng());
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_emissive_triangle_seen_directly() {
        let lamp = Arc::new(Material::emitter("lamp", Color::new(4.0, 3.0, 2.0)));
        let scene = Scene::builder(Eye::default())
            .object(Triangle::new(
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                lamp,
            ))
            .build()
            .unwrap();
        let settings = RenderSettings::default();

        let c = Tracer::new(&scene, &settings).trace(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z), 0, None, &mut rng());
        assert_eq!(c, Color::new(4.0, 3.0, 2.0));
    }

    #[test]
    fn test_point_light_cap_ignores_extra_lights() {
        let red = Arc::new(Material::diffuse("red", Color::new(1.0, 0.0, 0.0)));
        let mut builder = Scene::builder(Eye::default()).object(Sphere::new(Vec3::ZERO, 1.0, red));
        for _ in 0..3 {
            builder = builder.light(PointLight::white(Vec3::new(0.0, 0.0, 5.0), 1.0));
        }
        let scene = builder.build().unwrap();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        let one = RenderSettings {
            max_point_lights: 1,
            ..Default::default()
        };
        let all = RenderSettings::default();

        let c_one = Tracer::new(&scene, &one).trace(&ray, 0, None, &mut rng());
        let c_all = Tracer::new(&scene, &all).trace(&ray, 0, None, &mut rng());
        assert!((c_one.x - 1.0).abs() < 1e-5);
        assert!((c_all.x - 3.0).abs() < 1e-5);
    }
}
