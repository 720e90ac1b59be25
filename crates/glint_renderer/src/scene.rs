//! Scene container and the nearest-hit dispatcher.

use glint_core::{Eye, MaterialError, PointLight};
use glint_math::{Interval, Ray, Vec3};
use thiserror::Error;

use crate::geometry::{Geometry, HitRecord};
use crate::ray_log::{RayKind, RayObserver, RaySegment};

/// Distance within which a shadow ray counts as reaching its target.
pub(crate) const TARGET_TOLERANCE: f32 = 1.0e-4;

/// Errors that make a scene unusable for rendering.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error("No lights were provided, so the scene would be black")]
    NoLights,
}

/// Identifies one part of one scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceId {
    /// Index into the scene's object list
    pub object: usize,
    /// Sub-part of the object (triangle index for meshes)
    pub part: usize,
}

/// Why a ray is being cast. Only used to label recorded rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Query {
    /// Primary or reflection ray
    View,
    /// Shadow ray aimed at a point on a light
    Shadow { target: Vec3 },
}

/// The nearest hit of a ray against the whole scene.
#[derive(Clone, Debug)]
pub struct Intersection<'a> {
    pub record: HitRecord<'a>,
    /// Index of the object that was hit
    pub object: usize,
}

impl Intersection<'_> {
    pub fn surface(&self) -> SurfaceId {
        SurfaceId {
            object: self.object,
            part: self.record.part,
        }
    }
}

/// Geometry, point lights and the eye.
///
/// Object order is the order the dispatcher scans them in. Emissive
/// triangles among the objects are the scene's area lights.
pub struct Scene {
    objects: Vec<Box<dyn Geometry>>,
    lights: Vec<PointLight>,
    eye: Eye,
    scale: f32,
}

impl Scene {
    /// Start building a scene viewed from `eye`.
    pub fn builder(eye: Eye) -> SceneBuilder {
        SceneBuilder {
            eye,
            objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn objects(&self) -> &[Box<dyn Geometry>] {
        &self.objects
    }

    /// Every point light, ignoring the render cap.
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// The first `cap` point lights.
    pub fn point_lights(&self, cap: usize) -> &[PointLight] {
        &self.lights[..cap.min(self.lights.len())]
    }

    pub fn eye(&self) -> &Eye {
        &self.eye
    }

    /// Move the eye. Any render in progress must be restarted.
    pub fn set_eye(&mut self, eye: Eye) {
        self.eye = eye;
    }

    /// Rough size of the scene, used to draw rays that leave it.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Number of emissive triangles.
    pub fn area_light_count(&self) -> usize {
        self.objects.iter().filter(|o| o.area_light().is_some()).count()
    }

    /// Glossiness after `factor` of the first material that samples a cone,
    /// or `None` when every material is matte or a mirror.
    pub fn effective_glossiness(&self, factor: f32) -> Option<f32> {
        self.objects
            .iter()
            .flat_map(|o| o.materials())
            .find(|m| m.glossiness > 0.0 && m.glossiness < 1.0)
            .map(|m| m.effective_glossiness(factor))
    }

    /// Find the nearest object hit by `ray`.
    ///
    /// Objects are scanned in order against a shrinking parameter bound, so
    /// each accepted hit is strictly closer than every earlier one. When
    /// `origin` names the object the ray leaves from, that object is skipped
    /// entirely unless it supports part exclusion, in which case only the
    /// originating part is skipped.
    pub fn find_first_hit(
        &self,
        ray: &Ray,
        origin: Option<SurfaceId>,
        query: Query,
        observer: &dyn RayObserver,
    ) -> Option<Intersection<'_>> {
        let mut closest_so_far = f32::INFINITY;
        let mut nearest = None;

        for (i, object) in self.objects.iter().enumerate() {
            let excluded_part = match origin {
                Some(origin) if origin.object == i => {
                    if !object.supports_part_exclusion() {
                        continue;
                    }
                    Some(origin.part)
                }
                _ => None,
            };

            if let Some(record) = object.intersect(ray, excluded_part, Interval::new(0.0, closest_so_far)) {
                closest_so_far = record.t;
                nearest = Some(Intersection { record, object: i });
            }
        }

        if observer.enabled() {
            observer.observe(self.segment(ray, query, nearest.as_ref()));
        }
        nearest
    }

    /// Describe a tested ray for the observer.
    fn segment(&self, ray: &Ray, query: Query, nearest: Option<&Intersection<'_>>) -> RaySegment {
        let start = ray.origin();
        let (end, kind) = match (query, nearest) {
            (Query::View, Some(hit)) => (hit.record.p, RayKind::Hit),
            (Query::View, None) => (
                start + self.scale * 2.0 * ray.direction().normalize_or_zero(),
                RayKind::Miss,
            ),
            (Query::Shadow { target }, Some(hit))
                if hit.record.p.distance(start) < target.distance(start) - TARGET_TOLERANCE =>
            {
                (hit.record.p, RayKind::ShadowBlocked)
            }
            (Query::Shadow { target }, _) => (target, RayKind::ShadowClear),
        };
        RaySegment { start, end, kind }
    }
}

/// Collects objects and lights, then validates them into a [`Scene`].
pub struct SceneBuilder {
    eye: Eye,
    objects: Vec<Box<dyn Geometry>>,
    lights: Vec<PointLight>,
}

impl SceneBuilder {
    /// Append an object; it is tested after all earlier objects.
    pub fn object(mut self, object: impl Geometry + 'static) -> Self {
        self.objects.push(Box::new(object));
        self
    }

    /// Append an already boxed object.
    pub fn boxed_object(mut self, object: Box<dyn Geometry>) -> Self {
        self.objects.push(object);
        self
    }

    pub fn light(mut self, light: PointLight) -> Self {
        self.lights.push(light);
        self
    }

    /// Validate materials and lighting.
    ///
    /// Fails if any material is unusable, or if there is neither a point
    /// light nor an emissive triangle.
    pub fn build(self) -> Result<Scene, SceneError> {
        for object in &self.objects {
            for material in object.materials() {
                material.validate()?;
            }
        }

        let area_lights = self.objects.iter().filter(|o| o.area_light().is_some()).count();
        if self.lights.is_empty() && area_lights == 0 {
            return Err(SceneError::NoLights);
        }

        let scale = self
            .objects
            .iter()
            .map(|o| o.bounding_box().diagonal() / 2.0)
            .fold(1.0_f32, f32::max);

        log::info!(
            "Built scene: {} objects, {} point lights, {} area lights",
            self.objects.len(),
            self.lights.len(),
            area_lights
        );

        Ok(Scene {
            objects: self.objects,
            lights: self.lights,
            eye: self.eye,
            scale,
        })
    }
}
