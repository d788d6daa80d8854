//! Linear algebra primitives: vectors, 4x4 matrices, and the transforms
//! built from them.
//!
//! Grounded on `examples/novacrazy-rust-softrender/src/interpolate.rs` (nalgebra
//! as the vector/matrix backing store) and
//! `examples/original_source/source/my_math.h` (exact transform semantics:
//! row-major matrices, right-handed axis rotations, the dual-purpose
//! "camera width" in the orthographic/perspective constructors).

use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2-component vector.
pub type V2 = Vector2<f32>;
/// 3-component vector.
pub type V3 = Vector3<f32>;
/// Homogeneous 4-component vector.
pub type V4 = Vector4<f32>;
/// Row-major 4x4 matrix.
pub type M4 = Matrix4<f32>;

/// Standard planar rotation of a 2D vector by `theta` radians.
#[inline]
pub fn rotate2(v: V2, theta: f32) -> V2 {
    let (s, c) = theta.sin_cos();
    V2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Right-handed cross product.
#[inline]
pub fn cross(a: V3, b: V3) -> V3 {
    V3::new(a.y * b.z - a.z * b.y, a.z * b.x - a.x * b.z, a.x * b.y - a.y * b.x)
}

/// Unit vector in the direction of `v`. Undefined (NaN) for the zero vector;
/// callers must check `v.norm() > 0.0` themselves.
#[inline]
pub fn unit<V>(v: V) -> V
where
    V: std::ops::Div<f32, Output = V> + Norm,
{
    let len = v.norm();
    v / len
}

/// Magnitude, implemented for the vector types used by this crate.
pub trait Norm {
    fn norm(&self) -> f32;
}

impl Norm for V2 {
    #[inline]
    fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }
}

impl Norm for V3 {
    #[inline]
    fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }
}

impl Norm for V4 {
    #[inline]
    fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }
}

/// Homogeneous translation matrix for `t`.
#[inline]
pub fn translation(t: V3) -> M4 {
    M4::new(
        1.0, 0.0, 0.0, t.x, //
        0.0, 1.0, 0.0, t.y, //
        0.0, 0.0, 1.0, t.z, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Homogeneous (non-uniform) scale matrix.
#[inline]
pub fn scale(s: V3) -> M4 {
    M4::new(
        s.x, 0.0, 0.0, 0.0, //
        0.0, s.y, 0.0, 0.0, //
        0.0, 0.0, s.z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Right-handed rotation about the X axis.
#[inline]
pub fn rotation_x(theta: f32) -> M4 {
    let (s, c) = theta.sin_cos();
    M4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, c, -s, 0.0, //
        0.0, s, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Right-handed rotation about the Y axis.
#[inline]
pub fn rotation_y(theta: f32) -> M4 {
    let (s, c) = theta.sin_cos();
    M4::new(
        c, 0.0, s, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        -s, 0.0, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Right-handed rotation about the Z axis.
#[inline]
pub fn rotation_z(theta: f32) -> M4 {
    let (s, c) = theta.sin_cos();
    M4::new(
        c, -s, 0.0, 0.0, //
        s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Applies only the rotation/scale (upper-left 3x3) part of `m` to `v`,
/// ignoring translation. Used to carry vertex normals into world space
/// without the model's position shifting their direction.
#[inline]
pub fn transform_direction(m: M4, v: V3) -> V3 {
    V3::new(
        m[(0, 0)] * v.x + m[(0, 1)] * v.y + m[(0, 2)] * v.z,
        m[(1, 0)] * v.x + m[(1, 1)] * v.y + m[(1, 2)] * v.z,
        m[(2, 0)] * v.x + m[(2, 1)] * v.y + m[(2, 2)] * v.z,
    )
}

/// Orthographic projection mapping a box of horizontal extent `width` and
/// vertical extent `width / aspect`, centered on the view origin, into
/// `[-1, 1]^3`, with Z negated (the viewer looks down -Z).
///
/// Per Design Note (`spec.md` §9), this does not map an arbitrary near/far
/// range; it shows the world-space slab `z in [-1, 1]`.
#[inline]
pub fn orthographic(width: f32, aspect: f32) -> M4 {
    M4::new(
        2.0 / width, 0.0, 0.0, 0.0, //
        0.0, (2.0 * aspect) / width, 0.0, 0.0, //
        0.0, 0.0, -1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Symmetric OpenGL-style perspective projection. `fov` is the full
/// horizontal field of view in radians; NDC Z ends up in `[-1, 1]`.
#[inline]
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> M4 {
    let inv_tan = 1.0 / (fov / 2.0).tan();
    let r = -(far + near) / (far - near);
    let s = -(2.0 * near * far) / (far - near);

    M4::new(
        inv_tan / aspect, 0.0, 0.0, 0.0, //
        0.0, inv_tan, 0.0, 0.0, //
        0.0, 0.0, r, s, //
        0.0, 0.0, -1.0, 0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::ApproxEq;

    #[test]
    fn translation_round_trip() {
        let t = V3::new(1.0, 2.0, 3.0);
        let p = V4::new(4.0, 5.0, 6.0, 1.0);
        let got = translation(t) * p;
        assert!(got.approx_eq(&V4::new(5.0, 7.0, 9.0, 1.0)));
    }

    #[test]
    fn identity_round_trip() {
        let m = translation(V3::new(1.0, 2.0, 3.0)) * rotation_z(0.3);
        let id: M4 = M4::identity();
        assert!((m * id).approx_eq(&m));
    }

    #[test]
    fn perspective_maps_near_and_far_to_ndc_bounds() {
        let near = 1.0;
        let far = 10.0;
        let p = perspective(60f32.to_radians(), 1.0, near, far);

        let clip_near = p * V4::new(0.0, 0.0, -near, 1.0);
        assert!((clip_near.z / clip_near.w + 1.0).abs() < 1e-4);

        let clip_far = p * V4::new(0.0, 0.0, -far, 1.0);
        assert!((clip_far.z / clip_far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn cross_product_is_right_handed() {
        let x = V3::new(1.0, 0.0, 0.0);
        let y = V3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(x, y), V3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn transform_direction_ignores_translation() {
        let m = translation(V3::new(5.0, 5.0, 5.0)) * rotation_z(std::f32::consts::FRAC_PI_2);
        let got = transform_direction(m, V3::new(1.0, 0.0, 0.0));
        assert!((got.x - 0.0).abs() < 1e-5);
        assert!((got.y - 1.0).abs() < 1e-5);
    }
}
