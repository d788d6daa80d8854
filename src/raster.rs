//! Triangle and line rasterization, grounded on
//! `examples/original_source/source/software_renderer.cpp`'s `render_triangle`
//! (backface culling, edge-function fill with the top-left rule, per-vertex
//! intensities barycentrically blended into a single scalar, squared
//! Lambertian shading) and `render_line_bresenham` (the vertical-line
//! special case plus the slope <= 1 / slope > 1 branches), and on
//! `examples/novacrazy-rust-softrender/src/render/pipeline.rs`'s
//! determinant-based edge functions for the rasterizer inner loop.

use crate::color::Color;
use crate::framebuffer::{Framebuffer, PixelInfo};
use crate::interpolate::Attributes;
use crate::math::V3;
use crate::viewport::ScreenVertex;

/// Light direction used for shading: a fixed unit vector pointing along +Z,
/// matching the original's single directional light.
const LIGHT_DIR: V3 = V3::new(0.0, 0.0, 1.0);

/// The signed area (twice the triangle's area) of the 2D edge function for
/// edge `(a, b)` evaluated at `p`. Positive when `p` is to the left of the
/// directed edge `a -> b` (a counter-clockwise winding).
#[inline]
fn edge_function(a: crate::math::V2, b: crate::math::V2, p: crate::math::V2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Top-left fill rule: an edge "owns" points exactly on it only if it is a
/// top edge (horizontal, going right) or a left edge (going down).
#[inline]
fn is_top_left(a: crate::math::V2, b: crate::math::V2) -> bool {
    let is_top = a.y == b.y && b.x > a.x;
    let is_left = b.y < a.y;
    is_top || is_left
}

/// Rasterizes one screen-space triangle into `fb`, backface-culling
/// clockwise-wound triangles, applying the top-left fill rule, and shading
/// each covered pixel with a single directional light.
///
/// `material_color` is the unshaded surface color. Per `spec.md` §4.5 step
/// 9, the per-*vertex* intensities `iₖ = max(0, normalₖ · light)` are
/// computed once, then the scalar intensity is barycentrically interpolated
/// and clamped to `[0, 1]`; final pixel color is `material_color * i²`.
pub fn fill_triangle(fb: &mut Framebuffer, v0: &ScreenVertex<Attributes>, v1: &ScreenVertex<Attributes>, v2: &ScreenVertex<Attributes>, material_color: Color) {
    let p0 = v0.position;
    let p1 = v1.position;
    let p2 = v2.position;

    let area = edge_function(p0, p1, p2);
    // Screen space has +Y down, so a front-facing (originally CCW in a
    // right-handed, +Y-up world) triangle projects to a negative area here.
    if area >= 0.0 {
        return;
    }

    let i0 = crate::math::unit(v0.attributes.normal).dot(&LIGHT_DIR).max(0.0);
    let i1 = crate::math::unit(v1.attributes.normal).dot(&LIGHT_DIR).max(0.0);
    let i2 = crate::math::unit(v2.attributes.normal).dot(&LIGHT_DIR).max(0.0);

    let triangle_positions = [v0.clip_position, v1.clip_position, v2.clip_position];

    let min_x = p0.x.min(p1.x).min(p2.x).floor().max(0.0) as usize;
    let max_x = (p0.x.max(p1.x).max(p2.x).ceil() as usize).min(fb.width.saturating_sub(1));
    let min_y = p0.y.min(p1.y).min(p2.y).floor().max(0.0) as usize;
    let max_y = (p0.y.max(p1.y).max(p2.y).ceil() as usize).min(fb.height.saturating_sub(1));

    if min_x > max_x || min_y > max_y {
        return;
    }

    // Inside is w <= 0 here (screen space is +Y down, so a front-facing
    // triangle's signed area is negative). A boundary point (w == 0) is
    // only covered when the edge it lies on is a top or left edge;
    // nudging non-top-left edges positive excludes their shared boundary.
    let bias0 = if is_top_left(p1, p2) { 0.0 } else { 1e-6 };
    let bias1 = if is_top_left(p2, p0) { 0.0 } else { 1e-6 };
    let bias2 = if is_top_left(p0, p1) { 0.0 } else { 1e-6 };

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = crate::math::V2::new(x as f32 + 0.5, y as f32 + 0.5);

            let w0 = edge_function(p1, p2, p) + bias0;
            let w1 = edge_function(p2, p0, p) + bias1;
            let w2 = edge_function(p0, p1, p) + bias2;

            // Culled triangles have area <= 0, so all three signed
            // sub-areas must be <= 0 too for `p` to be covered.
            if w0 > 0.0 || w1 > 0.0 || w2 > 0.0 {
                continue;
            }

            let (u, v, w) = (w0 / area, w1 / area, w2 / area);

            let depth = u * v0.depth + v * v1.depth + w * v2.depth;
            if depth >= fb.depth_at(x, y) {
                continue;
            }

            let intensity = (u * i0 + v * i1 + w * i2).max(0.0).min(1.0);
            let shaded = material_color.scale(intensity * intensity);

            fb.set_pixel(
                x,
                y,
                depth,
                shaded,
                PixelInfo {
                    triangle_positions,
                    color: shaded,
                },
            );
        }
    }
}

/// Bresenham line rasterization between two screen-space points, used for
/// wireframe rendering. Ports the vertical-line special case and the
/// slope <= 1 / slope > 1 branches from the original.
pub fn draw_line_bresenham(fb: &mut Framebuffer, p0: crate::math::V2, p1: crate::math::V2, color: Color) {
    let (x0, y0) = (p0.x.round() as i32, p0.y.round() as i32);
    let (x1, y1) = (p1.x.round() as i32, p1.y.round() as i32);

    if x0 == x1 {
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in lo..=hi {
            put_pixel(fb, x0, y, color);
        }
        return;
    }

    let dx = x1 - x0;
    let dy = y1 - y0;

    if dy.abs() <= dx.abs() {
        let (x0, y0, x1, dx, dy) = if x0 <= x1 { (x0, y0, x1, dx, dy) } else { (x1, y1, x0, -dx, -dy) };
        let y_step: i32 = if dy >= 0 { 1 } else { -1 };
        let dy = dy.abs();
        let mut err = 2 * dy - dx;
        let mut y = y0;

        for x in x0..=x1 {
            put_pixel(fb, x, y, color);
            if err > 0 {
                y += y_step;
                err -= 2 * dx;
            }
            err += 2 * dy;
        }
    } else {
        let (x0, y0, y1, dx, dy) = if y0 <= y1 { (x0, y0, y1, dx, dy) } else { (x1, y1, y0, -dx, -dy) };
        let x_step: i32 = if dx >= 0 { 1 } else { -1 };
        let dx = dx.abs();
        let mut err = 2 * dx - dy;
        let mut x = x0;

        for y in y0..=y1 {
            put_pixel(fb, x, y, color);
            if err > 0 {
                x += x_step;
                err -= 2 * dy;
            }
            err += 2 * dx;
        }
    }
}

#[inline]
fn put_pixel(fb: &mut Framebuffer, x: i32, y: i32, color: Color) {
    if fb.in_bounds(x, y) {
        fb.set_pixel_color(x as usize, y as usize, color);
    }
}
