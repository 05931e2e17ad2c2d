use glam::DVec2;

use crate::Input;
use crate::camera::Camera;
use crate::config::Config;
use crate::error::ConfigError;
use crate::framebuffer::Framebuffer;
use crate::map::WorldGrid;
use crate::renderer::{FrameStats, RayCaster};
use crate::textures::TextureBank;

/// Everything the frame loop owns: the level, its textures, the viewer and
/// the frame being drawn.
pub struct GameState {
    pub world: WorldGrid,
    pub textures: TextureBank,
    pub camera: Camera,
    pub caster: RayCaster,
    pub frame: Framebuffer,
    pub move_step: f64,
    pub rot_step: f64,
}

impl GameState {
    pub fn new(
        config: &Config,
        world: WorldGrid,
        textures: TextureBank,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = Camera::new(
            DVec2::from(config.camera.position),
            DVec2::from(config.camera.direction),
            DVec2::from(config.camera.plane),
        );
        let pos = camera.pos();
        if pos.x < 0.0
            || pos.y < 0.0
            || pos.x >= world.width() as f64
            || pos.y >= world.height() as f64
        {
            return Err(ConfigError::CameraOutsideGrid {
                x: pos.x,
                y: pos.y,
                width: world.width(),
                height: world.height(),
            });
        }
        if !world.is_open(pos.x as i64, pos.y as i64) {
            log::warn!("camera starts inside a wall at ({:.2}, {:.2})", pos.x, pos.y);
        }

        Ok(GameState {
            world,
            textures,
            camera,
            caster: RayCaster::new(config.parallel, config.ceiling_color, config.floor_color),
            frame: Framebuffer::new(config.screen_width, config.screen_height)?,
            move_step: config.move_step,
            rot_step: config.rot_step,
        })
    }

    /// Builds the world and textures from the files the config names,
    /// falling back to the compiled-in level and procedural textures.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = match &config.map_path {
            Some(path) => WorldGrid::load(path)?,
            None => WorldGrid::legacy(),
        };
        let overrides: Vec<_> = config
            .textures
            .iter()
            .map(|t| (t.slot, t.path.as_path()))
            .collect();
        let textures = TextureBank::with_overrides(config.texture_side, &overrides)?;

        log::info!(
            "world {}x{}, {} textures of {}px, screen {}x{}, {}",
            world.width(),
            world.height(),
            textures.len(),
            textures.side(),
            config.screen_width,
            config.screen_height,
            if config.parallel { "parallel" } else { "sequential" },
        );

        Self::new(config, world, textures)
    }

    pub fn update(&mut self, input: &Input) {
        self.camera
            .apply_input(input, &self.world, self.move_step, self.rot_step);
    }

    pub fn render(&mut self) -> FrameStats {
        self.caster
            .render(&mut self.frame, &self.camera, &self.world, &self.textures)
    }
}
