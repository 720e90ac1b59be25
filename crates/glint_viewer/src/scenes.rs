//! Built-in demo scenes.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use glint_core::{Eye, Material, Mesh, PointLight, Texture};
use glint_math::{Color, Vec2, Vec3};
use glint_renderer::{MeshObject, Scene, SceneBuilder, Sphere, Triangle};

/// Unit red sphere at the origin, lit from above the eye.
pub fn red_sphere() -> Result<Scene> {
    let red = Arc::new(Material::diffuse("red", Color::new(1.0, 0.0, 0.0)));

    let scene = Scene::builder(Eye::default())
        .object(Sphere::new(Vec3::ZERO, 1.0, red))
        .light(PointLight::white(Vec3::new(0.0, 5.0, 5.0), 1.0))
        .build()?;
    Ok(scene)
}

/// Two triangles covering the quad a-b-c-d, with texture coordinates
/// running from (0, 0) at `a` to (1, 1) at `c`.
fn quad(builder: SceneBuilder, [a, b, c, d]: [Vec3; 4], material: &Arc<Material>) -> SceneBuilder {
    let uv = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];

    builder
        .object(Triangle::new(a, b, c, material.clone()).with_uvs([uv[0], uv[1], uv[2]]))
        .object(Triangle::new(a, c, d, material.clone()).with_uvs([uv[0], uv[2], uv[3]]))
}

/// An open-fronted room lit by a ceiling lamp, holding a glossy sphere, a
/// mirror sphere and optionally a mesh.
pub fn room(mesh_path: Option<&Path>, texture_path: Option<&Path>) -> Result<Scene> {
    let white = Arc::new(Material::diffuse("white", Color::splat(0.7)).with_ambient(Color::splat(0.7)));
    let red = Arc::new(Material::diffuse("red", Color::new(0.7, 0.1, 0.1)).with_ambient(Color::new(0.7, 0.1, 0.1)));
    let green = Arc::new(Material::diffuse("green", Color::new(0.1, 0.6, 0.1)).with_ambient(Color::new(0.1, 0.6, 0.1)));
    let lamp = Arc::new(Material::emitter("lamp", Color::splat(4.0)));
    let glossy = Arc::new(
        Material::diffuse("glossy", Color::new(0.2, 0.3, 0.6))
            .with_specular(Color::splat(0.5), 40.0)
            .with_glossiness(0.85),
    );
    let mirror = Arc::new(
        Material::diffuse("mirror", Color::splat(0.05))
            .with_specular(Color::splat(0.9), 100.0)
            .with_glossiness(1.0),
    );

    let floor = match texture_path {
        Some(path) => {
            let texture = Texture::load(path)?;
            log::info!("Loaded floor texture {}x{} from {}", texture.width, texture.height, path.display());
            Arc::new(Material::diffuse("floor", Color::ONE).with_texture(Arc::new(texture)))
        }
        None => white.clone(),
    };

    let eye = Eye::new(Vec3::new(0.0, 2.0, 7.5), Vec3::new(0.0, 2.0, 0.0), Vec3::Y).with_fov(50.0);
    let (x0, x1, y0, y1, z0, z1) = (-2.0, 2.0, 0.0, 4.0, -2.0, 2.0);

    let mut builder = Scene::builder(eye);
    // Floor, ceiling, back wall, left and right walls
    builder = quad(
        builder,
        [Vec3::new(x0, y0, z1), Vec3::new(x1, y0, z1), Vec3::new(x1, y0, z0), Vec3::new(x0, y0, z0)],
        &floor,
    );
    builder = quad(
        builder,
        [Vec3::new(x0, y1, z0), Vec3::new(x1, y1, z0), Vec3::new(x1, y1, z1), Vec3::new(x0, y1, z1)],
        &white,
    );
    builder = quad(
        builder,
        [Vec3::new(x0, y0, z0), Vec3::new(x1, y0, z0), Vec3::new(x1, y1, z0), Vec3::new(x0, y1, z0)],
        &white,
    );
    builder = quad(
        builder,
        [Vec3::new(x0, y0, z1), Vec3::new(x0, y0, z0), Vec3::new(x0, y1, z0), Vec3::new(x0, y1, z1)],
        &red,
    );
    builder = quad(
        builder,
        [Vec3::new(x1, y0, z0), Vec3::new(x1, y0, z1), Vec3::new(x1, y1, z1), Vec3::new(x1, y1, z0)],
        &green,
    );

    builder = builder
        .object(Triangle::new(
            Vec3::new(-0.6, 3.95, -0.5),
            Vec3::new(0.6, 3.95, -0.5),
            Vec3::new(0.0, 3.95, 0.6),
            lamp,
        ))
        .object(Sphere::new(Vec3::new(-0.9, 0.8, -0.6), 0.8, glossy))
        .object(Sphere::new(Vec3::new(1.0, 0.6, 0.6), 0.6, mirror))
        .light(PointLight::white(Vec3::new(0.0, 3.5, 4.0), 0.3));

    if let Some(path) = mesh_path {
        let mut mesh = Mesh::load_obj(path)?;
        mesh.ensure_normals();
        log::info!(
            "Loaded {} ({} triangles, centred at {}, size {:.2})",
            path.display(),
            mesh.triangle_count(),
            mesh.bounds.centroid(),
            mesh.bounds.diagonal()
        );
        let plastic = Arc::new(
            Material::diffuse("mesh", Color::new(0.8, 0.6, 0.2))
                .with_ambient(Color::splat(0.2))
                .with_specular(Color::splat(0.3), 20.0),
        );
        builder = builder.object(MeshObject::new(Arc::new(mesh), plastic));
    }

    Ok(builder.build()?)
}
