//! Small scenes shared by the unit tests.

use std::sync::Arc;

use glint_core::{Eye, Material, PointLight};
use glint_math::{Color, Vec3};

use crate::{Scene, Sphere, Triangle};

/// Unit red sphere at the origin lit from (0, 5, 5), seen from (0, 0, 5).
pub(crate) fn red_sphere() -> Scene {
    let red = Arc::new(Material::diffuse("red", Color::new(1.0, 0.0, 0.0)));

    Scene::builder(Eye::default())
        .object(Sphere::new(Vec3::ZERO, 1.0, red))
        .light(PointLight::white(Vec3::new(0.0, 5.0, 5.0), 1.0))
        .build()
        .unwrap()
}

/// How much of the lamp in [`floor_under_lamp`] is hidden from the origin.
#[derive(Clone, Copy)]
pub(crate) enum Cover {
    None,
    /// Blocks the half of the lamp with x < 0
    Half,
    Full,
    /// Covers the whole lamp from 0.01 below it
    Snug,
}

/// A floor at y = 0 under an emissive triangle at y = 2, with an optional
/// opaque triangle at y = 1 between them.
pub(crate) fn floor_under_lamp(cover: Cover) -> Scene {
    let grey = Arc::new(Material::diffuse("floor", Color::splat(0.8)));
    let lamp = Arc::new(Material::emitter("lamp", Color::splat(5.0)));

    let mut builder = Scene::builder(Eye::new(Vec3::new(0.0, 0.5, 3.0), Vec3::ZERO, Vec3::Y))
        .object(Triangle::new(
            Vec3::new(-10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -10.0),
            grey.clone(),
        ))
        .object(Triangle::new(
            Vec3::new(-1.0, 2.0, -1.0),
            Vec3::new(1.0, 2.0, -1.0),
            Vec3::new(0.0, 2.0, 1.0),
            lamp,
        ));

    let blocker = match cover {
        Cover::None => None,
        Cover::Half => Some([
            Vec3::new(0.0, 1.0, -20.0),
            Vec3::new(0.0, 1.0, 20.0),
            Vec3::new(-20.0, 1.0, 0.0),
        ]),
        Cover::Full => Some([
            Vec3::new(-20.0, 1.0, -20.0),
            Vec3::new(20.0, 1.0, -20.0),
            Vec3::new(0.0, 1.0, 20.0),
        ]),
        Cover::Snug => Some([
            Vec3::new(-20.0, 1.99, -20.0),
            Vec3::new(20.0, 1.99, -20.0),
            Vec3::new(0.0, 1.99, 20.0),
        ]),
    };
    if let Some([a, b, c]) = blocker {
        builder = builder.object(Triangle::new(a, b, c, grey));
    }

    builder.build().unwrap()
}

/// A floor at y = 0 under an emissive triangle standing in the plane x = 0.
///
/// Shadow rays from floor points on x = 0 are coplanar with the lamp.
pub(crate) fn edge_on_lamp() -> Scene {
    let grey = Arc::new(Material::diffuse("floor", Color::splat(0.8)));
    let lamp = Arc::new(Material::emitter("lamp", Color::splat(5.0)));

    Scene::builder(Eye::new(Vec3::new(0.0, 0.5, 3.0), Vec3::ZERO, Vec3::Y))
        .object(Triangle::new(
            Vec3::new(-10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -10.0),
            grey,
        ))
        .object(Triangle::new(
            Vec3::new(0.0, 1.0, -1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.0, 2.0, 0.0),
            lamp,
        ))
        .build()
        .unwrap()
}
