use std::time::Duration;

use nalgebra::{vector, Vector3};

use crate::volumetric::{demo::DEMO_SIZE, Endianness, TextureLimits};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub texture_limits: TextureLimits,
    /// Loads running this long fail, checked between stages
    pub load_timeout: Option<Duration>,
    /// Resolution of the fallback sphere
    pub demo_size: Vector3<usize>,
    /// Byte order of the payload of fetched volumes
    pub payload_order: Endianness,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            texture_limits: TextureLimits::default(),
            load_timeout: None,
            demo_size: vector![DEMO_SIZE, DEMO_SIZE, DEMO_SIZE],
            payload_order: Endianness::Little,
        }
    }
}
