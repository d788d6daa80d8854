//! Interpolation abstraction for per-vertex attributes.
//!
//! Generalizes `examples/novacrazy-rust-softrender/src/interpolate.rs`'s
//! `Interpolate` trait. The clipper and rasterizer are written against this
//! trait rather than against a hardcoded "normal" field, per the Design Note
//! in `spec.md` §9: adding texture coordinates or vertex colors later means
//! implementing this trait for a new type, not editing the clipper.

use crate::math::V3;

/// A type that can be linearly interpolated along an edge (used by the
/// clipper) and barycentrically interpolated across a triangle (used by the
/// rasterizer).
pub trait VertexAttributes: Clone {
    /// `self + t * (other - self)`, used when the clipper splits an edge.
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// `u*a + v*b + w*c`, used by the rasterizer to interpolate across a
    /// filled triangle from its three barycentric coordinates.
    fn barycentric(u: f32, a: &Self, v: f32, b: &Self, w: f32, c: &Self) -> Self;
}

impl VertexAttributes for V3 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    #[inline]
    fn barycentric(u: f32, a: &Self, v: f32, b: &Self, w: f32, c: &Self) -> Self {
        a * u + b * v + c * w
    }
}

/// The canonical attribute set this crate renders with: a per-vertex normal.
/// `spec.md` §3 treats "position and normal" as the canonical attribute set
/// and requires any extension to follow the same linear rule, which is
/// exactly what implementing `VertexAttributes` for a new struct gives you.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attributes {
    pub normal: V3,
}

impl VertexAttributes for Attributes {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Attributes { normal: self.normal.lerp(&other.normal, t) }
    }

    #[inline]
    fn barycentric(u: f32, a: &Self, v: f32, b: &Self, w: f32, c: &Self) -> Self {
        Attributes { normal: V3::barycentric(u, &a.normal, v, &b.normal, w, &c.normal) }
    }
}
