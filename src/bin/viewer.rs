//! Realtime windowed demo, grounded on
//! `examples/novacrazy-rust-softrender/realtime_example/src/main.rs`'s
//! sdl2 event loop and texture-streaming upload. Feature-gated behind
//! `window` since it pulls in `sdl2`.

use sdl2::event::Event;
use sdl2::keyboard::Keycode as SdlKeycode;
use sdl2::pixels::PixelFormatEnum;

use cpu_raster::{load_obj, normalize_mesh, InputState, Key, RendererConfig, RendererState};

fn sdl_key_to_key(keycode: SdlKeycode) -> Option<Key> {
    match keycode {
        SdlKeycode::W => Some(Key::MoveUp),
        SdlKeycode::S => Some(Key::MoveDown),
        SdlKeycode::A => Some(Key::MoveLeft),
        SdlKeycode::D => Some(Key::MoveRight),
        SdlKeycode::I => Some(Key::ScaleDown),
        SdlKeycode::K => Some(Key::ScaleUp),
        SdlKeycode::J => Some(Key::RotateCcw),
        SdlKeycode::L => Some(Key::RotateCw),
        SdlKeycode::Z => Some(Key::NarrowCamera),
        SdlKeycode::X => Some(Key::WidenCamera),
        SdlKeycode::M => Some(Key::Wireframe),
        SdlKeycode::Space => Some(Key::Orthographic),
        _ => None,
    }
}

fn main() {
    cpu_raster::logging::init_logging("log.txt").expect("failed to set up logging");

    let mut config = RendererConfig::default();
    config.screen_width = 800;
    config.screen_height = 600;

    let model = load_obj_or_triangle();
    let mut state = RendererState::new(config.clone(), model);

    let sdl_context = sdl2::init().expect("failed to init sdl2");
    let video_subsystem = sdl_context.video().expect("failed to init sdl2 video subsystem");

    let window = video_subsystem
        .window("cpu_raster viewer", config.screen_width, config.screen_height)
        .position_centered()
        .build()
        .expect("failed to create window");

    let mut canvas = window.into_canvas().software().build().expect("failed to create canvas");
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_streaming(PixelFormatEnum::BGRA8888, config.screen_width, config.screen_height)
        .expect("failed to create texture");

    let mut event_pump = sdl_context.event_pump().expect("failed to create event pump");
    let mut input = InputState::default();

    'mainloop: loop {
        let mut left_click_edge = false;

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } | Event::KeyDown { keycode: Some(SdlKeycode::Escape), .. } => break 'mainloop,
                Event::KeyDown { keycode: Some(k), .. } => {
                    if let Some(key) = sdl_key_to_key(k) {
                        input.keys_down.insert(key);
                    }
                }
                Event::KeyUp { keycode: Some(k), .. } => {
                    if let Some(key) = sdl_key_to_key(k) {
                        input.keys_down.remove(&key);
                    }
                }
                Event::MouseButtonDown { mouse_btn: sdl2::mouse::MouseButton::Left, x, y, .. } => {
                    input.mouse_window_position = cpu_raster::math::V2::new(x as f32, y as f32);
                    left_click_edge = true;
                }
                _ => {}
            }
        }

        input.left_mouse_clicked = left_click_edge;

        state.render(&input);

        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                let colors = state.framebuffer.color_buffer();
                for y in 0..config.screen_height as usize {
                    for x in 0..config.screen_width as usize {
                        let packed = colors[y * config.screen_width as usize + x];
                        let offset = y * pitch + x * 4;
                        buffer[offset..offset + 4].copy_from_slice(&packed.to_le_bytes());
                    }
                }
            })
            .expect("failed to upload framebuffer to texture");

        canvas.copy(&texture, None, None).expect("failed to blit texture");
        canvas.present();
    }

    state.profiler.dump_profile_info("profile.txt").expect("failed to write profile.txt");
}

/// Loads `meshes/head.obj` relative to the working directory, normalizing
/// it the way the original always does after loading, falling back to a
/// single normalized triangle if the asset isn't present so the demo still
/// runs without bundled assets.
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
