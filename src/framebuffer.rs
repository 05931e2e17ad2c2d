use crate::color::unpack;
use crate::error::ConfigError;

/// One frame of packed RGBA8888 pixels, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroScreenDimension { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(ConfigError::DimensionsTooLarge { width, height })?;
        Ok(Framebuffer {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Ceiling above the screen middle, floor from the middle down.
    pub fn clear_background(&mut self, ceiling: u32, floor: u32) {
        let split = self.height / 2 * self.width;
        self.pixels[..split].fill(ceiling);
        self.pixels[split..].fill(floor);
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: u32) {
        self.pixels[y * self.width + x] = color;
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Copies the frame into an RGBA byte surface such as `Pixels::frame_mut`.
    pub fn draw_to_buffer(&self, frame: &mut [u8]) {
        for (pixel, &color) in frame.chunks_exact_mut(4).zip(&self.pixels) {
            pixel.copy_from_slice(&unpack(color));
        }
    }

    pub fn to_image(&self) -> image::RgbaImage {
        let mut bytes = vec![0; self.pixels.len() * 4];
        self.draw_to_buffer(&mut bytes);
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, bytes)
            .unwrap_or_else(|| image::RgbaImage::new(self.width as u32, self.height as u32))
    }
}
