use serde::{Deserialize, Serialize};

pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod error;
pub mod flags;
pub mod framebuffer;
pub mod gamestate;
pub mod map;
pub mod renderer;
pub mod textures;

pub use camera::Camera;
pub use config::Config;
pub use error::ConfigError;
pub use framebuffer::Framebuffer;
pub use gamestate::GameState;
pub use map::{Tile, WorldGrid};
pub use renderer::{FrameStats, RayCaster, WallSlice, cast_column};
pub use textures::{Texture, TextureBank};

/// Keyboard state sampled once per frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Input {
    pub forward: bool,
    pub backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}
