use image::{self, GenericImageView};
use std::path::Path;

use crate::color::{rgb, rgba};
use crate::consts::MAX_TEXTURE_SIDE;
use crate::error::ConfigError;

pub const CHECKER: usize = 0;
pub const BRICKS: usize = 1;
pub const BLUE_TILES: usize = 2;
pub const STRIPES: usize = 3;
pub const TEXTURE_COUNT: usize = 4;

/// Accepts power-of-two sides up to `MAX_TEXTURE_SIDE`.
pub fn check_side(side: usize) -> Result<(), ConfigError> {
    if !side.is_power_of_two() {
        return Err(ConfigError::TextureSideNotPowerOfTwo(side));
    }
    if side > MAX_TEXTURE_SIDE {
        return Err(ConfigError::TextureTooLarge {
            side,
            max: MAX_TEXTURE_SIDE,
        });
    }
    Ok(())
}

/// Square texel buffer with a power-of-two side, packed RGBA8888.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    side: usize,
    pixels: Vec<u32>,
}

impl Texture {
    /// Fills a `side`x`side` texture from `f(x, y)`.
    pub fn generate(side: usize, f: impl Fn(usize, usize) -> u32) -> Result<Self, ConfigError> {
        check_side(side)?;
        let mut pixels = Vec::with_capacity(side * side);
        for y in 0..side {
            for x in 0..side {
                pixels.push(f(x, y));
            }
        }
        Ok(Texture { side, pixels })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| ConfigError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let (width, height) = img.dimensions();
        if width != height {
            return Err(ConfigError::TextureNotSquare {
                path: path.to_path_buf(),
                width,
                height,
            });
        }

        let side = width as usize;
        check_side(side)?;

        let pixels = img
            .to_rgba8()
            .pixels()
            .map(|p| rgba(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(Texture { side, pixels })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Wrapping lookup; the side is a power of two so the wrap is a mask.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> u32 {
        let mask = self.side - 1;
        self.pixels[(y & mask) * self.side + (x & mask)]
    }
}

pub fn checker(x: usize, y: usize) -> u32 {
    if ((x / 8) ^ (y / 8)) & 1 == 1 {
        rgb(200, 200, 200)
    } else {
        rgb(100, 100, 100)
    }
}

pub fn bricks(x: usize, y: usize) -> u32 {
    let mortar: u8 = if y % 16 == 15 || x % 32 == 31 { 60 } else { 0 };
    rgb(160 + mortar, 40 + mortar / 2, 40 + mortar / 2)
}

pub fn blue_tiles(x: usize, y: usize) -> u32 {
    if ((x / 16) ^ (y / 16)) & 1 == 1 {
        rgb(60, 60, 200)
    } else {
        rgb(30, 30, 120)
    }
}

pub fn stripes(x: usize, _y: usize) -> u32 {
    if (x / 8) & 1 == 1 {
        rgb(210, 180, 80)
    } else {
        rgb(120, 90, 30)
    }
}

/// The wall textures, all sharing one side length.
#[derive(Debug, Clone)]
pub struct TextureBank {
    side: usize,
    textures: Vec<Texture>,
}

impl TextureBank {
    pub fn procedural(side: usize) -> Result<Self, ConfigError> {
        let generators: [fn(usize, usize) -> u32; TEXTURE_COUNT] =
            [checker, bricks, blue_tiles, stripes];
        let textures = generators
            .into_iter()
            .map(|f| Texture::generate(side, f))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TextureBank { side, textures })
    }

    /// Procedural bank with some slots replaced by image files.
    pub fn with_overrides<P: AsRef<Path>>(
        side: usize,
        overrides: &[(usize, P)],
    ) -> Result<Self, ConfigError> {
        let mut bank = Self::procedural(side)?;
        for (slot, path) in overrides {
            let path: &Path = path.as_ref();
            let texture = Texture::from_file(path)?;
            bank.replace(*slot, texture, path)?;
            log::info!("texture slot {} loaded from {}", slot, path.display());
        }
        Ok(bank)
    }

    fn replace(&mut self, slot: usize, texture: Texture, path: &Path) -> Result<(), ConfigError> {
        if texture.side != self.side {
            return Err(ConfigError::TextureSideMismatch {
                path: path.to_path_buf(),
                got: texture.side,
                expected: self.side,
            });
        }
        let target = self
            .textures
            .get_mut(slot)
            .ok_or(ConfigError::BadTextureSlot(slot))?;
        *target = texture;
        Ok(())
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Texture slot for a wall id: 1 bricks, 2 blue tiles, anything else checker.
    pub fn slot_for_tile(id: u8) -> usize {
        match id {
            1 => BRICKS,
            2 => BLUE_TILES,
            _ => CHECKER,
        }
    }

    pub fn for_tile(&self, id: u8) -> &Texture {
        &self.textures[Self::slot_for_tile(id)]
    }
}
