//! Phong reflectance.

use glint_core::Material;
use glint_math::{Color, Vec3};

/// Reflectance coefficients at one surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phong {
    /// Diffuse coefficient, already modulated by the texture
    pub kd: Color,
    /// Specular coefficient
    pub ks: Color,
    /// Specular exponent
    pub shininess: f32,
}

impl Phong {
    /// Coefficients of `material` with its diffuse term tinted by `texture`.
    pub fn from_material(material: &Material, texture: Color) -> Self {
        Self {
            kd: texture * material.diffuse,
            ks: material.specular,
            shininess: material.shininess,
        }
    }
}

/// Radiance leaving along `e` due to `incoming` radiance arriving along `l`.
///
/// `n` is the surface normal and `r` the ideal reflection direction used for
/// the specular lobe. Light from behind the surface contributes nothing.
#[inline]
pub fn shade(n: Vec3, l: Vec3, e: Vec3, r: Vec3, phong: &Phong, incoming: Color) -> Color {
    let n_dot_l = n.dot(l);
    if n_dot_l <= 0.0 {
        return Color::ZERO;
    }

    let diffuse = n_dot_l * incoming * phong.kd;

    let r_dot_e = r.dot(e);
    let specular = if r_dot_e > 0.0 {
        r_dot_e.powf(phong.shininess) * incoming * phong.ks
    } else {
        Color::ZERO
    };

    diffuse + specular
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn phong() -> Phong {
        Phong {
            kd: Color::new(0.8, 0.4, 0.2),
            ks: Color::splat(0.5),
            shininess: 20.0,
        }
    }

    fn random_unit(rng: &mut StdRng) -> Vec3 {
        loop {
            let v = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            if v.length_squared() > 1e-4 {
                return v.normalize();
            }
        }
    }

    #[test]
    fn test_back_facing_light_is_black() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let n = random_unit(&mut rng);
            let mut l = random_unit(&mut rng);
            if n.dot(l) > 0.0 {
                l = -l;
            }
            let e = random_unit(&mut rng);
            let r = random_unit(&mut rng);

            assert_eq!(shade(n, l, e, r, &phong(), Color::splat(10.0)), Color::ZERO);
        }
    }

    #[test]
    fn test_grazing_light_is_black() {
        let c = shade(Vec3::Y, Vec3::X, Vec3::Y, Vec3::Y, &phong(), Color::ONE);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_diffuse_only() {
        let matte = Phong {
            kd: Color::new(1.0, 0.0, 0.0),
            ks: Color::ZERO,
            shininess: 1.0,
        };
        let l = Vec3::new(0.0, 1.0, 1.0).normalize();

        let c = shade(Vec3::Z, l, Vec3::Z, Vec3::Z, &matte, Color::splat(2.0));
        assert!((c - Color::new(2.0 * l.z, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_specular_lobe() {
        // Reflection direction lines up with the eye: full specular
        let c = shade(Vec3::Z, Vec3::Z, Vec3::Z, Vec3::Z, &phong(), Color::ONE);
        assert!((c - (phong().kd + phong().ks)).length() < 1e-6);

        // Reflection pointing away from the eye: diffuse only
        let c = shade(Vec3::Z, Vec3::Z, Vec3::X, Vec3::NEG_X, &phong(), Color::ONE);
        assert!((c - phong().kd).length() < 1e-6);
    }

    #[test]
    fn test_texture_tints_diffuse() {
        let material = Material::diffuse("m", Color::new(0.5, 1.0, 1.0)).with_specular(Color::ONE, 8.0);
        let p = Phong::from_material(&material, Color::new(1.0, 0.5, 0.0));

        assert_eq!(p.kd, Color::new(0.5, 0.5, 0.0));
        assert_eq!(p.ks, Color::ONE);
        assert_eq!(p.shininess, 8.0);
    }
}
