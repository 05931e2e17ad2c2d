use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::{
    CEILING_COLOR, DEFAULT_CAMERA_DIRECTION, DEFAULT_CAMERA_PLANE, DEFAULT_CAMERA_POSITION,
    DEFAULT_MOVE_STEP, DEFAULT_ROT_STEP, FLOOR_COLOR, HEIGHT, TARGET_FPS, TEXTURE_SIDE, WIDTH,
};
use crate::error::ConfigError;
use crate::textures::check_side;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f64; 2],
    pub direction: [f64; 2],
    pub plane: [f64; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            position: DEFAULT_CAMERA_POSITION,
            direction: DEFAULT_CAMERA_DIRECTION,
            plane: DEFAULT_CAMERA_PLANE,
        }
    }
}

/// Replaces one procedural texture slot with an image file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextureOverride {
    pub slot: usize,
    pub path: PathBuf,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub screen_width: usize,
    pub screen_height: usize,
    pub texture_side: usize,
    pub move_step: f64,
    pub rot_step: f64,
    pub target_fps: u32,
    pub parallel: bool,
    pub ceiling_color: u32,
    pub floor_color: u32,
    pub map_path: Option<PathBuf>,
    pub textures: Vec<TextureOverride>,
    pub camera: CameraConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            screen_width: WIDTH,
            screen_height: HEIGHT,
            texture_side: TEXTURE_SIDE,
            move_step: DEFAULT_MOVE_STEP,
            rot_step: DEFAULT_ROT_STEP,
            target_fps: TARGET_FPS,
            parallel: true,
            ceiling_color: CEILING_COLOR,
            floor_color: FLOOR_COLOR,
            map_path: None,
            textures: Vec::new(),
            camera: CameraConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Like `load`, but a missing file means defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::ZeroScreenDimension {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.screen_width.checked_mul(self.screen_height).is_none() {
            return Err(ConfigError::DimensionsTooLarge {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        check_side(self.texture_side)?;
        for (name, [x, y]) in [
            ("position", self.camera.position),
            ("direction", self.camera.direction),
            ("plane", self.camera.plane),
        ] {
            if !(x.is_finite() && y.is_finite()) {
                return Err(ConfigError::NonFiniteCamera { name, x, y });
            }
        }
        for (name, value) in [("move_step", self.move_step), ("rot_step", self.rot_step)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveStep { name, value });
            }
        }
        Ok(())
    }
}
