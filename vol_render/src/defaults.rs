//! # Default values
//!
//! Used when an argument is left out.

use nalgebra::{point, vector, Point3, Vector2};

// Render resolution
pub const RENDER_WIDTH: u16 = 700;
pub const RENDER_HEIGHT: u16 = 700;
pub const RENDER_RESOLUTION: Vector2<u16> = vector![RENDER_WIDTH, RENDER_HEIGHT];

pub const MULTI_THREAD: bool = true;
pub const ERT: bool = true;

pub const VOLUMES_DIR: &str = "volumes";
pub const OUTPUT_FILE: &str = "frame.png";

/// How long to wait for each selected volume, in seconds
pub const LOAD_WAIT_SECS: u64 = 30;

// Camera
pub const CAM_POS: Point3<f32> = point![1.2, 0.9, 1.5];
pub const CAM_TARGET: Point3<f32> = point![0.0, 0.0, 0.0];
