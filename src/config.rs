//! Renderer configuration, grounded on the defaults
//! `examples/original_source/source/software_renderer.cpp`'s
//! `init_renderer` establishes (camera position, camera width, projection
//! type, near/far planes), expressed as a `serde`-derived struct the way
//! `examples/novacrazy-rust-softrender`'s dependency stack (`serde`,
//! `serde_derive`) implies configuration should be handled in this corpus.

use serde_derive::{Deserialize, Serialize};

use crate::math::V3;

/// Whether the camera uses an orthographic or perspective projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionKind {
    Orthographic,
    Perspective,
}

/// Renderer-wide configuration, loadable from a config file or built via
/// `Default`, which reproduces `init_renderer`'s literal values exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    pub camera_position: [f32; 3],
    /// Dual-purpose horizontal extent: full FOV in degrees when
    /// `projection == Perspective`, world-space width when `Orthographic`.
    pub camera_width: f32,
    pub projection: ProjectionKind,
    pub near_plane: f32,
    pub far_plane: f32,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl RendererConfig {
    pub fn camera_position_vec(&self) -> V3 {
        V3::new(self.camera_position[0], self.camera_position[1], self.camera_position[2])
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            camera_position: [0.0, 0.0, 5.0],
            camera_width: 60.0,
            projection: ProjectionKind::Perspective,
            near_plane: 1.0,
            far_plane: 10.0,
            screen_width: 800,
            screen_height: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_init_renderer_literals() {
        let config = RendererConfig::default();
        assert_eq!(config.camera_position, [0.0, 0.0, 5.0]);
        assert_eq!(config.camera_width, 60.0);
        assert_eq!(config.projection, ProjectionKind::Perspective);
        assert_eq!(config.near_plane, 1.0);
        assert_eq!(config.far_plane, 10.0);
    }
}
