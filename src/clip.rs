//! Sutherland-Hodgman polygon clipping in homogeneous clip space, grounded
//! on `examples/novacrazy-rust-softrender/src/geometry/clip.rs` (the tagged
//! `ClippingPlane` enum and a table over a `has_inside`/`intersect` pair
//! instead of a switch) and
//! `examples/original_source/source/software_renderer.cpp`'s `clip_polygon`
//! (the ping-pong buffer algorithm and the epsilon nudge on `t`).

use smallvec::SmallVec;

use crate::interpolate::VertexAttributes;
use crate::math::V4;

/// A clip-space vertex: homogeneous position plus interpolable attributes.
#[derive(Debug, Clone)]
pub struct ClipVertex<K> {
    pub position: V4,
    pub attributes: K,
}

/// One of the six canonical clip-space half-spaces, `n . p <= 0` defines
/// "inside". See `spec.md` §4.3 for the plane table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClippingPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

/// All six planes in the clipping order required by `spec.md` §4.3.
pub const CLIP_ORDER: [ClippingPlane; 6] = [
    ClippingPlane::Left,
    ClippingPlane::Right,
    ClippingPlane::Bottom,
    ClippingPlane::Top,
    ClippingPlane::Near,
    ClippingPlane::Far,
];

/// Epsilon nudge applied to the clip parameter `t`, biasing a newly created
/// vertex strictly to the inside of the plane it was clipped against.
const CLIP_EPSILON: f32 = 1e-3;

impl ClippingPlane {
    /// The plane normal `(a, b, c, d)` such that a point is inside when
    /// `a*x + b*y + c*z + d*w <= 0`.
    #[inline]
    fn normal(self) -> V4 {
        match self {
            ClippingPlane::Left => V4::new(-1.0, 0.0, 0.0, -1.0),
            ClippingPlane::Right => V4::new(1.0, 0.0, 0.0, -1.0),
            ClippingPlane::Bottom => V4::new(0.0, -1.0, 0.0, -1.0),
            ClippingPlane::Top => V4::new(0.0, 1.0, 0.0, -1.0),
            ClippingPlane::Near => V4::new(0.0, 0.0, -1.0, -1.0),
            ClippingPlane::Far => V4::new(0.0, 0.0, 1.0, -1.0),
        }
    }

    #[inline]
    fn eval(self, p: &V4) -> f32 {
        self.normal().dot(p)
    }

    /// Clips the convex polygon `input` against this plane, appending the
    /// surviving (and newly interpolated) vertices to `output`.
    fn clip<K: VertexAttributes>(self, input: &[ClipVertex<K>], output: &mut SmallVec<[ClipVertex<K>; 9]>) {
        let n = input.len();
        if n == 0 {
            return;
        }

        for i in 0..n {
            let current = &input[i];
            let next = &input[(i + 1) % n];

            let e1 = self.eval(&current.position);
            let e2 = self.eval(&next.position);

            if e1 <= 0.0 {
                output.push(current.clone());
            }

            // Edge crosses the plane: emit the intersection.
            if (e1 <= 0.0) != (e2 <= 0.0) {
                let mut t = e1 / (e1 - e2);
                if e1 > e2 {
                    t += CLIP_EPSILON;
                } else {
                    t -= CLIP_EPSILON;
                }

                output.push(ClipVertex {
                    position: current.position + (next.position - current.position) * t,
                    attributes: current.attributes.lerp(&next.attributes, t),
                });
            }
        }
    }
}

/// Clips one triangle against all six planes in order, fan-triangulating
/// the resulting convex polygon.
///
/// Returns an empty vector if the triangle is fully rejected, or 1-7
/// triangles (a polygon of up to 9 vertices fan-triangulates into at most 7
/// triangles) otherwise.
pub fn clip_triangle<K: VertexAttributes>(v0: ClipVertex<K>, v1: ClipVertex<K>, v2: ClipVertex<K>) -> SmallVec<[ClipVertex<K>; 9]> {
    let mut a: SmallVec<[ClipVertex<K>; 9]> = SmallVec::new();
    a.push(v0);
    a.push(v1);
    a.push(v2);

    let mut b: SmallVec<[ClipVertex<K>; 9]> = SmallVec::new();

    for (i, plane) in CLIP_ORDER.iter().enumerate() {
        let (src, dst) = if i % 2 == 0 { (&a, &mut b) } else { (&b, &mut a) };
        dst.clear();
        plane.clip(src, dst);
    }

    // CLIP_ORDER has 6 (even) entries, so the final output landed in `a`.
    a
}

/// Fan-triangulates a clipped polygon into vertex index triples
/// `(0, i, i+1)` for `i = 1..n-2`, pushing new vertices and indices into the
/// given output buffers. Returns the number of triangles emitted.
pub fn fan_triangulate<K: Clone>(polygon: &[ClipVertex<K>], out_vertices: &mut Vec<ClipVertex<K>>, out_indices: &mut Vec<u32>) -> usize {
    if polygon.len() < 3 {
        return 0;
    }

    let base = out_vertices.len() as u32;
    out_vertices.extend_from_slice(polygon);

    let mut triangles = 0;
    for i in 1..polygon.len() - 1 {
        out_indices.push(base);
        out_indices.push(base + i as u32);
        out_indices.push(base + i as u32 + 1);
        triangles += 1;
    }

    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::Attributes;
    use crate::math::V3;

    fn vtx(x: f32, y: f32, z: f32, w: f32) -> ClipVertex<Attributes> {
        ClipVertex {
            position: V4::new(x, y, z, w),
            attributes: Attributes { normal: V3::new(0.0, 0.0, 1.0) },
        }
    }

    #[test]
    fn fully_inside_triangle_survives_unclipped() {
        let out = clip_triangle(vtx(-0.5, -0.5, 0.0, 1.0), vtx(0.5, -0.5, 0.0, 1.0), vtx(0.0, 0.5, 0.0, 1.0));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn fully_outside_triangle_is_rejected() {
        // z = -100 behind the far plane, with w = 1: far eval = z - w = -101 <= 0 means *inside*
        // far per the table; push it outside all axes instead, e.g. x way beyond w.
        let out = clip_triangle(vtx(100.0, 0.0, 0.0, 1.0), vtx(101.0, 0.0, 0.0, 1.0), vtx(100.0, 1.0, 0.0, 1.0));
        assert!(out.is_empty());
    }

    #[test]
    fn straddling_near_plane_produces_quad() {
        // Near plane inside test is z >= 0 (eval = -z <= 0). One vertex behind (z<0), two in front.
        let out = clip_triangle(vtx(-1.0, -1.0, -0.5, 1.0), vtx(1.0, -1.0, -1.5, 1.0), vtx(0.0, 1.0, -0.5, 1.0));
        // The camera-space z above stands in for clip-space z in this unit test: the point
        // with z = -1.5 is the one behind (assuming w=1, near test z>=0 fails), splitting one
        // edge into two and yielding a quad.
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn post_clip_vertices_stay_within_w_bound() {
        let out = clip_triangle(vtx(-2.0, -1.0, -1.5, 1.0), vtx(2.0, -1.0, -1.5, 1.0), vtx(0.0, 1.0, 0.5, 1.0));
        for v in &out {
            let w = v.position.w.abs();
            assert!(v.position.x.abs() <= w + 1e-2);
            assert!(v.position.y.abs() <= w + 1e-2);
            assert!(v.position.z.abs() <= w + 1e-2);
        }
    }

    #[test]
    fn fan_triangulate_quad_yields_two_triangles() {
        let poly = vec![vtx(0.0, 0.0, 0.0, 1.0), vtx(1.0, 0.0, 0.0, 1.0), vtx(1.0, 1.0, 0.0, 1.0), vtx(0.0, 1.0, 0.0, 1.0)];
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let tris = fan_triangulate(&poly, &mut vertices, &mut indices);
        assert_eq!(tris, 2);
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
    }
}
