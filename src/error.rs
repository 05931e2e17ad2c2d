use std::path::PathBuf;

/// Startup failures. Nothing in the per-frame path produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive (got {width}x{height})")]
    ZeroGridDimension { width: usize, height: usize },

    #[error("grid row {row} has {len} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("grid of {width}x{height} needs {expected} cells, got {got}")]
    GridSizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    #[error("texture side length {0} is not a power of two")]
    TextureSideNotPowerOfTwo(usize),

    #[error("texture `{path}` is {width}x{height}, textures must be square")]
    TextureNotSquare {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("texture `{path}` has side {got}, bank side is {expected}")]
    TextureSideMismatch {
        path: PathBuf,
        got: usize,
        expected: usize,
    },

    #[error("texture side length {side} exceeds the maximum of {max}")]
    TextureTooLarge { side: usize, max: usize },

    #[error("{width}x{height} is too large to allocate")]
    DimensionsTooLarge { width: usize, height: usize },

    #[error("camera {name} must be finite (got [{x}, {y}])")]
    NonFiniteCamera { name: &'static str, x: f64, y: f64 },

    #[error("camera position ({x}, {y}) is outside the {width}x{height} grid")]
    CameraOutsideGrid {
        x: f64,
        y: f64,
        width: usize,
        height: usize,
    },

    #[error("texture slot {0} does not exist")]
    BadTextureSlot(usize),

    #[error("screen dimensions must be positive (got {width}x{height})")]
    ZeroScreenDimension { width: usize, height: usize },

    #[error("{name} must be a positive finite number (got {value})")]
    NonPositiveStep { name: &'static str, value: f64 },

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse `{path}`: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to decode texture `{path}`: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
