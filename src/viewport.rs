//! Perspective division and viewport mapping, grounded on
//! `examples/novacrazy-rust-softrender/src/geometry/clipvertex.rs`'s
//! `ClipVertex::normalize` (divide-then-map-to-screen as one step) and
//! `examples/original_source/source/software_renderer.cpp`'s viewport
//! transform loop (the `ndc += (1, 1, 0, 0)` then halve-by-dimension
//! formula, and the debug assertions on NDC range).

use crate::clip::ClipVertex;
use crate::interpolate::VertexAttributes;
use crate::math::{V2, V4};

/// A screen-space vertex: pixel-space XY, a `[0, 1]` depth, and the
/// attributes to interpolate across the filled triangle.
#[derive(Debug, Clone)]
pub struct ScreenVertex<K> {
    pub position: V2,
    pub depth: f32,
    /// `1 / w` from clip space, a byproduct of the perspective divide.
    pub inv_w: f32,
    /// The vertex's pre-divide clip-space position, carried through only so
    /// the rasterizer can record a triangle's three clip-space positions
    /// into the pixel-info buffer (`spec.md` §3).
    pub clip_position: V4,
    pub attributes: K,
}

/// Divides clip-space `position` by `w` and maps the resulting NDC
/// coordinates onto a `width x height` pixel viewport, per `spec.md` §4.4.
///
/// `x` and `y` map `[-1, 1] -> [0, width]` / `[0, height]` with Y flipped
/// (NDC +Y is up, screen +Y is down); `z` maps `[-1, 1] -> [0, 1]`.
pub fn to_screen<K: VertexAttributes>(v: &ClipVertex<K>, width: f32, height: f32) -> ScreenVertex<K> {
    let w = v.position.w;
    debug_assert!(w > 0.0, "perspective divide requires a positive w after clipping");

    let inv_w = 1.0 / w;
    let ndc_x = v.position.x * inv_w;
    let ndc_y = v.position.y * inv_w;
    let ndc_z = v.position.z * inv_w;

    debug_assert!((-1.0..=1.0).contains(&ndc_x), "x NDC out of range: {}", ndc_x);
    debug_assert!((-1.0..=1.0).contains(&ndc_y), "y NDC out of range: {}", ndc_y);
    debug_assert!((-1.0..=1.0).contains(&ndc_z), "z NDC out of range: {}", ndc_z);

    let sx = (ndc_x + 1.0) * width / 2.0;
    let sy = height - (ndc_y + 1.0) * height / 2.0;
    let sz = (ndc_z + 1.0) / 2.0;

    ScreenVertex {
        position: V2::new(sx, sy),
        depth: sz,
        inv_w,
        clip_position: v.position,
        attributes: v.attributes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::Attributes;
    use crate::math::V3;

    fn clip_vertex(x: f32, y: f32, z: f32, w: f32) -> ClipVertex<Attributes> {
        ClipVertex {
            position: V4::new(x, y, z, w),
            attributes: Attributes { normal: V3::new(0.0, 0.0, 1.0) },
        }
    }

    #[test]
    fn ndc_origin_maps_to_viewport_center() {
        let screen = to_screen(&clip_vertex(0.0, 0.0, 0.0, 1.0), 640.0, 480.0);
        assert!((screen.position.x - 320.0).abs() < 1e-4);
        assert!((screen.position.y - 240.0).abs() < 1e-4);
        assert!((screen.depth - 0.5).abs() < 1e-4);
    }

    #[test]
    fn ndc_corners_map_to_viewport_corners_with_y_flip() {
        let top_left_ndc = to_screen(&clip_vertex(-1.0, 1.0, -1.0, 1.0), 640.0, 480.0);
        assert!((top_left_ndc.position.x - 0.0).abs() < 1e-4);
        assert!((top_left_ndc.position.y - 0.0).abs() < 1e-4);
        assert!((top_left_ndc.depth - 0.0).abs() < 1e-4);

        let bottom_right_ndc = to_screen(&clip_vertex(1.0, -1.0, 1.0, 1.0), 640.0, 480.0);
        assert!((bottom_right_ndc.position.x - 640.0).abs() < 1e-4);
        assert!((bottom_right_ndc.position.y - 480.0).abs() < 1e-4);
        assert!((bottom_right_ndc.depth - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_divide_uses_w() {
        let screen = to_screen(&clip_vertex(0.0, 0.0, 0.0, 2.0), 640.0, 480.0);
        assert!((screen.inv_w - 0.5).abs() < 1e-5);
    }
}
