//! The per-frame orchestrator, grounded on
//! `examples/original_source/source/software_renderer.cpp`'s `render` (the
//! clear, transform, clip, divide, viewport, rasterize, then
//! read-input-and-update-state order, all driven by one explicit state
//! struct rather than the original's `RendererData` global).

use log::info;

use crate::clip::{clip_triangle, fan_triangulate, ClipVertex};
use crate::color::Color;
use crate::config::{ProjectionKind, RendererConfig};
use crate::framebuffer::Framebuffer;
use crate::input::{apply_input, flip_mouse_y, ControlledState, InputSpeeds, InputState};
use crate::interpolate::Attributes;
use crate::math::{self, M4, V3, V4};
use crate::mesh::Model;
use crate::profiling::Profiler;
use crate::raster::{draw_line_bresenham, fill_triangle};
use crate::viewport::to_screen;

/// A fixed blue used for wireframe edges, matching the original's literal
/// wireframe color.
const WIREFRAME_COLOR: Color = Color { r: 0.2, g: 0.4, b: 1.0, a: 1.0 };

/// All mutable state one frame's render touches: the output surfaces, the
/// scene (a single mesh), the camera/projection parameters, and the
/// render-mode toggles `update_stuff` flips.
pub struct RendererState {
    pub framebuffer: Framebuffer,
    pub model: Model,
    pub config: RendererConfig,
    pub material_color: Color,
    pub clear_color: Color,
    pub wireframe: bool,
    pub orthographic: bool,
    pub input_speeds: InputSpeeds,
    pub profiler: Profiler,
}

impl RendererState {
    pub fn new(config: RendererConfig, model: Model) -> RendererState {
        let framebuffer = Framebuffer::new(config.screen_width as usize, config.screen_height as usize);
        let orthographic = config.projection == ProjectionKind::Orthographic;
        RendererState {
            framebuffer,
            model,
            config,
            material_color: Color::WHITE,
            clear_color: Color::BLACK,
            wireframe: false,
            orthographic,
            input_speeds: InputSpeeds::default(),
            profiler: Profiler::new(),
        }
    }

    /// The camera-to-view transform: a fixed right/up/forward basis offset
    /// by `-camera_position`, not a general look-at (the original never
    /// lets the camera rotate, only translate).
    fn view_matrix(&self) -> M4 {
        let right = V3::new(1.0, 0.0, 0.0);
        let up = V3::new(0.0, 1.0, 0.0);
        let forward = V3::new(0.0, 0.0, 1.0);
        let cam = self.config.camera_position_vec();

        M4::new(
            right.x, right.y, right.z, -right.dot(&cam), //
            up.x, up.y, up.z, -up.dot(&cam), //
            forward.x, forward.y, forward.z, -forward.dot(&cam), //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn projection_matrix(&self) -> M4 {
        let aspect = self.config.screen_width as f32 / self.config.screen_height as f32;
        if self.orthographic {
            math::orthographic(self.config.camera_width, aspect)
        } else {
            math::perspective(self.config.camera_width.to_radians(), aspect, self.config.near_plane, self.config.far_plane)
        }
    }

    /// Runs one full frame: clear buffers, transform and clip the mesh,
    /// rasterize it, then read `input` and update mesh pose / camera state
    /// for the next frame, in that order.
    pub fn render(&mut self, input: &InputState) {
        self.profiler.begin_block("render");

        self.framebuffer.clear(self.clear_color);

        let world = self.model.world_matrix();
        let view = self.view_matrix();
        let projection = self.projection_matrix();

        let width = self.config.screen_width as f32;
        let height = self.config.screen_height as f32;

        for tri in self.model.indices.chunks(3) {
            if tri.len() != 3 {
                continue;
            }
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);

            let clip_vertices = [i0, i1, i2].map(|i| {
                let local_position = self.model.positions[i];
                let world_position = world * V4::new(local_position.x, local_position.y, local_position.z, 1.0);
                let view_position = view * world_position;
                let clip_position = projection * view_position;

                let world_normal = math::transform_direction(world, self.model.normals[i]);

                ClipVertex {
                    position: clip_position,
                    attributes: Attributes { normal: world_normal },
                }
            });

            let [cv0, cv1, cv2] = clip_vertices;
            let polygon = clip_triangle(cv0, cv1, cv2);
            if polygon.len() < 3 {
                continue;
            }

            let mut clipped_vertices = Vec::new();
            let mut clipped_indices = Vec::new();
            fan_triangulate(&polygon, &mut clipped_vertices, &mut clipped_indices);

            for idx in clipped_indices.chunks(3) {
                let a = to_screen(&clipped_vertices[idx[0] as usize], width, height);
                let b = to_screen(&clipped_vertices[idx[1] as usize], width, height);
                let c = to_screen(&clipped_vertices[idx[2] as usize], width, height);

                if self.wireframe {
                    draw_line_bresenham(&mut self.framebuffer, a.position, b.position, WIREFRAME_COLOR);
                    draw_line_bresenham(&mut self.framebuffer, b.position, c.position, WIREFRAME_COLOR);
                    draw_line_bresenham(&mut self.framebuffer, c.position, a.position, WIREFRAME_COLOR);
                } else {
                    fill_triangle(&mut self.framebuffer, &a, &b, &c, self.material_color);
                }
            }
        }

        self.profiler.end_block("render");

        self.apply_input_and_report(input);
    }

    fn apply_input_and_report(&mut self, input: &InputState) {
        apply_input(
            input,
            &self.input_speeds,
            &mut ControlledState {
                model_position: &mut self.model.position,
                model_scale: &mut self.model.scale,
                model_rotation_z: &mut self.model.rotation_z,
                camera_width: &mut self.config.camera_width,
                wireframe: &mut self.wireframe,
                orthographic: &mut self.orthographic,
            },
        );

        if input.left_mouse_clicked {
            // The framebuffer and the window share a top-left origin, so
            // pixel lookup uses the raw window position; `flip_mouse_y`
            // exists for callers (e.g. the log line itself) that want the
            // bottom-left-up convention `print_pixel_info` reported in.
            let x = input.mouse_window_position.x.round();
            let y = input.mouse_window_position.y.round();

            if x >= 0.0 && y >= 0.0 && (x as usize) < self.framebuffer.width && (y as usize) < self.framebuffer.height {
                let info = self.framebuffer.pixel_info_at(x as usize, y as usize);
                let flipped = flip_mouse_y(input.mouse_window_position, self.config.screen_height as f32);
                let [v0, v1, v2] = info.triangle_positions;
                info!(
                    "mouse x: {}, mouse y: {}, color: {:?}, V0: ({}, {}, {}), V1: ({}, {}, {}), V2: ({}, {}, {})",
                    flipped.x, flipped.y, info.color, //
                    v0.x, v0.y, v0.z, //
                    v1.x, v1.y, v1.z, //
                    v2.x, v2.y, v2.z,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    fn quad_model() -> Model {
        Model::with_computed_normals(
            vec![V3::new(-1.0, -1.0, 0.0), V3::new(1.0, -1.0, 0.0), V3::new(1.0, 1.0, 0.0), V3::new(-1.0, 1.0, 0.0)],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn render_fills_some_pixels_for_a_facing_quad() {
        let mut config = RendererConfig::default();
        config.screen_width = 64;
        config.screen_height = 64;
        config.camera_position = [0.0, 0.0, 5.0];

        let mut state = RendererState::new(config, quad_model());
        state.render(&InputState::default());

        let covered = state.framebuffer.color_buffer().iter().filter(|&&c| c != Color::BLACK.pack()).count();
        assert!(covered > 0);
    }

    #[test]
    fn render_applies_input_after_rasterizing() {
        let mut config = RendererConfig::default();
        config.screen_width = 64;
        config.screen_height = 64;

        let mut state = RendererState::new(config, quad_model());
        let mut input = InputState::default();
        input.keys_down.insert(Key::MoveRight);

        let original_x = state.model.position.x;
        state.render(&input);
        assert!(state.model.position.x > original_x);
    }

    #[test]
    fn wireframe_mode_draws_edges_not_fill() {
        let mut config = RendererConfig::default();
        config.screen_width = 64;
        config.screen_height = 64;
        config.camera_position = [0.0, 0.0, 5.0];

        let mut state = RendererState::new(config, quad_model());
        state.wireframe = true;
        state.render(&InputState::default());

        let covered = state.framebuffer.color_buffer().iter().filter(|&&c| c != Color::BLACK.pack()).count();
        assert!(covered > 0);
    }
}
