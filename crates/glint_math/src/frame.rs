//! Local frames and reflection helpers used by the shading code.

use crate::Vec3;

/// Mirror `v` about the normal `n`: `2(v·n)n - v`.
///
/// Both vectors point away from the surface; `n` must be unit length.
#[inline]
pub fn reflect_about(v: Vec3, n: Vec3) -> Vec3 {
    2.0 * v.dot(n) * n - v
}

/// Two unit vectors perpendicular to `axis` and to each other.
///
/// `axis` need not be normalized. A zero axis yields the X and Y axes.
pub fn orthonormal_basis(axis: Vec3) -> (Vec3, Vec3) {
    let w = axis.normalize_or_zero();
    if w == Vec3::ZERO {
        return (Vec3::X, Vec3::Y);
    }

    // Cross with the coordinate axis least aligned with w
    let helper = if w.x.abs() < 0.6 {
        Vec3::X
    } else if w.y.abs() < 0.6 {
        Vec3::Y
    } else {
        Vec3::Z
    };

    let u = w.cross(helper).normalize();
    let v = w.cross(u);
    (u, v)
}
