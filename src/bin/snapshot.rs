use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use raycaster::{GameState, Input, flags::Flags};

/// Renders frames without a window and writes the last one as a PNG.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: Flags,

    /// Output image
    #[arg(short, long, default_value = "frame.png")]
    out: PathBuf,

    /// Frames to simulate before saving
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Frames to hold "forward"
    #[arg(long, default_value_t = 0)]
    walk: u32,

    /// Frames to hold "rotate right" (negative turns left)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    turn: i32,
}

/// Keys held on `frame`: forward for the first `walk` frames, then a turn for
/// the first `|turn|` frames in the direction of its sign.
fn scripted_input(frame: u32, walk: u32, turn: i32) -> Input {
    let turns = turn.unsigned_abs();
    Input {
        forward: frame < walk,
        rotate_right: turn > 0 && frame < turns,
        rotate_left: turn < 0 && frame < turns,
        ..Input::default()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.common.resolve().context("loading configuration")?;
    let mut game_state = GameState::from_config(&config).context("building the scene")?;

    let mut total = Duration::ZERO;
    for frame in 0..args.frames.max(1) {
        let input = scripted_input(frame, args.walk, args.turn);
        game_state.update(&input);
        total += game_state.render().elapsed;
    }

    let frames = args.frames.max(1);
    log::info!(
        "{} frames, {:.2} ms average render, camera at ({:.2}, {:.2})",
        frames,
        total.as_secs_f64() * 1000.0 / frames as f64,
        game_state.camera.pos().x,
        game_state.camera.pos().y,
    );

    game_state
        .frame
        .to_image()
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());
    Ok(())
}
