use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use raycaster::{GameState, Input, consts::FPS_REPORT_INTERVAL, flags::Flags};

/// W/S move, A/D turn, arrow keys step sideways.
fn read_input(input: &WinitInputHelper) -> Input {
    Input {
        forward: input.key_held(KeyCode::KeyW),
        backward: input.key_held(KeyCode::KeyS),
        rotate_left: input.key_held(KeyCode::KeyA),
        rotate_right: input.key_held(KeyCode::KeyD),
        strafe_left: input.key_held(KeyCode::ArrowLeft),
        strafe_right: input.key_held(KeyCode::ArrowRight),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = Flags::parse();
    let config = flags.resolve().context("loading configuration")?;
    let mut game_state = GameState::from_config(&config).context("building the scene")?;

    let (width, height) = (config.screen_width as u32, config.screen_height as u32);
    let frame_time = Duration::from_secs_f64(1.0 / config.target_fps.max(1) as f64);

    let event_loop = EventLoop::new()?;
    let mut input = WinitInputHelper::new();
    let window = Arc::new({
        let size = LogicalSize::new(width as f64, height as f64);
        WindowBuilder::new()
            .with_title("Raycaster")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    });

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &*window);
        Pixels::new(width, height, surface_texture)?
    };

    let mut frame_count = 0;
    let mut compute_total = Duration::ZERO;
    let mut fps_timer = Instant::now();
    let mut frame_start = Instant::now();
    let window_clone = window.clone();

    Ok(event_loop.run(move |event, elwt| {
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = &event
        {
            let stats = game_state.render();
            game_state.frame.draw_to_buffer(pixels.frame_mut());

            if let Err(err) = pixels.render() {
                log::error!("pixels.render() failed: {}", err);
                elwt.exit();
                return;
            }

            frame_count += 1;
            compute_total += stats.elapsed;
            if fps_timer.elapsed() >= FPS_REPORT_INTERVAL {
                let avg_ms = compute_total.as_secs_f64() * 1000.0 / frame_count as f64;
                log::debug!("{} fps, {:.2} ms render", frame_count, avg_ms);
                window_clone.set_title(&format!("Raycaster - {} FPS", frame_count));
                frame_count = 0;
                compute_total = Duration::ZERO;
                fps_timer = Instant::now();
            }

            // cap the loop at the target frame rate
            let spent = frame_start.elapsed();
            if spent < frame_time {
                std::thread::sleep(frame_time - spent);
            }
            frame_start = Instant::now();
        }

        if input.update(&event) {
            if input.close_requested() || input.key_pressed(KeyCode::Escape) {
                elwt.exit();
                return;
            }
            if let Some(size) = input.window_resized() {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    log::error!("pixels.resize_surface() failed: {}", err);
                    elwt.exit();
                    return;
                }
            }

            game_state.update(&read_input(&input));
            window_clone.request_redraw();
        }
    })?)
}
