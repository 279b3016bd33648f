//! Compile-time defaults.

use glam::Vec4;

/// Default frame width in pixels.
pub const WIDTH: u32 = 512;
/// Default frame height in pixels.
pub const HEIGHT: u32 = 512;

/// Default PNG written by the driver.
pub const OUTPUT_PATH: &str = "frame.png";

/// Clip-space `w` below which a vertex is treated as behind the eye.
pub const NEAR_CLIP_PLANE_W: f32 = 0.0001;

/// Background of driver frames.
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.1, 0.1, 0.1, 1.0);
/// Far plane in window depth.
pub const CLEAR_DEPTH: f32 = 1.0;
