//! Single-frame-to-PNG demo, grounded on
//! `examples/novacrazy-rust-softrender/src/image_compat.rs`'s
//! `copy_to_image` (unpack the framebuffer's color channels into an
//! `image::RgbaImage`). Feature-gated behind `image_compat`.

use cpu_raster::{load_obj, normalize_mesh, InputState, RendererConfig, RendererState};

fn main() {
    cpu_raster::logging::init_logging("log.txt").expect("failed to set up logging");

    let mut config = RendererConfig::default();
    config.screen_width = 800;
    config.screen_height = 600;

    let model = load_obj_or_triangle();
    let mut state = RendererState::new(config.clone(), model);

    state.render(&InputState::default());

    let image = copy_to_image(&state);
    image.save("snapshot.png").expect("failed to write snapshot.png");

    state.profiler.dump_profile_info("profile.txt").expect("failed to write profile.txt");
}

fn copy_to_image(state: &RendererState) -> image::RgbaImage {
    let colors = state.framebuffer.color_buffer();
    let mut bytes = Vec::with_capacity(colors.len() * 4);

    for &packed in colors {
        let b = (packed & 0xff) as u8;
        let g = ((packed >> 8) & 0xff) as u8;
        let r = ((packed >> 16) & 0xff) as u8;
        let a = ((packed >> 24) & 0xff) as u8;
        bytes.push(r);
        bytes.push(g);
        bytes.push(b);
        bytes.push(a);
    }

    image::RgbaImage::from_raw(state.framebuffer.width as u32, state.framebuffer.height as u32, bytes).expect("framebuffer dimensions must match byte buffer length")
}

fn load_obj_or_triangle() -> cpu_raster::Model {
    match load_obj("meshes/head.obj") {
        Ok(mut model) => {
            normalize_mesh(&mut model.positions);
            model
        }
        Err(e) => {
            log::warn!("failed to load meshes/head.obj: {}", e);
            let mut positions = vec![
                cpu_raster::math::V3::new(-1.0, -1.0, 0.0),
                cpu_raster::math::V3::new(1.0, -1.0, 0.0),
                cpu_raster::math::V3::new(0.0, 1.0, 0.0),
            ];
            normalize_mesh(&mut positions);
            cpu_raster::Model::with_computed_normals(positions, vec![0, 1, 2]).expect("fallback triangle is well-formed")
        }
    }
}
