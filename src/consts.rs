use std::time::Duration;

pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
pub const TEXTURE_SIDE: usize = 64;
pub const TARGET_FPS: u32 = 60;
pub const MAX_TEXTURE_SIDE: usize = 4096;
pub const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(1);

pub const DEFAULT_CONFIG_PATH: &str = "raycaster.toml";

pub const DEFAULT_MOVE_STEP: f64 = 0.05;
pub const DEFAULT_ROT_STEP: f64 = 0.03;

pub const DEFAULT_CAMERA_POSITION: [f64; 2] = [3.5, 3.5];
pub const DEFAULT_CAMERA_DIRECTION: [f64; 2] = [1.0, 0.0];
// |plane| = 0.80 with |dir| = 1 gives 2 * atan(0.8), about 77 degrees of horizontal FOV
pub const DEFAULT_CAMERA_PLANE: [f64; 2] = [0.0, 0.80];

// Packed RGBA8888
pub const CEILING_COLOR: u32 = 0x3C3C_50FF;
pub const FLOOR_COLOR: u32 = 0x2828_28FF;

/// Multiplier numerator applied to R, G and B of walls hit on an X-axis crossing.
pub const SIDE_SHADE: u32 = 180;

/// Stand-in for an infinite `deltaDist` when a ray component is zero.
/// Large enough that the axis never wins the `sideDist` comparison, small
/// enough that adding to it stays finite.
pub const FAR_SENTINEL: f64 = 1e30;

/// Replaces a zero ray component when dividing for the perpendicular distance.
pub const RAY_DIR_EPSILON: f64 = 1e-9;

/// Lower bound for the perpendicular wall distance.
pub const MIN_PERP_DIST: f64 = 1e-6;
