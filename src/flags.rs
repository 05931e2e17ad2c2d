use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::consts::DEFAULT_CONFIG_PATH;
use crate::error::ConfigError;

/// Flags shared by the viewer and the snapshot tool.
#[derive(Parser, Debug, Clone)]
pub struct Flags {
    /// TOML config file; missing file means built-in defaults
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// TOML map file, overrides `map_path` from the config
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// Cast columns on one thread
    #[arg(long)]
    pub sequential: bool,

    /// Frame rate cap, overrides `target_fps`
    #[arg(long)]
    pub fps: Option<u32>,
}

impl Flags {
    /// Loads the config file and applies the command-line overrides.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load_or_default(&self.config)?;
        if let Some(map) = &self.map {
            config.map_path = Some(map.clone());
        }
        if self.sequential {
            config.parallel = false;
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        config.validate()?;
        Ok(config)
    }
}
