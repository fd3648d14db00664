use nalgebra::{vector, Vector3};

use crate::color::ColorMode;

/// Volume axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Per-frame compositor parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    /// Per axis cutoff in `<-1;1>`, samples with `coord < clip - 0.5` are discarded
    pub clip_planes: Vector3<f32>,
    /// Lower edge of the opacity threshold, `<0;1>`
    pub transfer_function: f32,
    pub color_mode: ColorMode,
    pub brightness: f32,
    pub contrast: f32,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            clip_planes: vector![0.0, 0.0, 0.0],
            transfer_function: 0.1,
            color_mode: ColorMode::Grayscale,
            brightness: 1.0,
            contrast: 1.0,
        }
    }
}

impl RenderParameters {
    pub fn clip_plane(&self, axis: Axis) -> f32 {
        self.clip_planes[axis.index()]
    }

    pub fn set_clip_plane(&mut self, axis: Axis, value: f32) {
        self.clip_planes[axis.index()] = value;
    }
}

/// Segmentation overlay parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskOverlayParameters {
    pub mask_opacity: f32,
    pub show_mask: bool,
}

impl Default for MaskOverlayParameters {
    fn default() -> Self {
        Self {
            mask_opacity: 0.5,
            show_mask: false,
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn defaults() {
        let params = RenderParameters::default();
        assert_eq!(params.clip_planes, vector![0.0, 0.0, 0.0]);
        assert_eq!(params.transfer_function, 0.1);
        assert_eq!(params.color_mode, ColorMode::Grayscale);
        assert_eq!(params.brightness, 1.0);
        assert_eq!(params.contrast, 1.0);

        let overlay = MaskOverlayParameters::default();
        assert_eq!(overlay.mask_opacity, 0.5);
        assert!(!overlay.show_mask);
    }

    #[test]
    fn clip_plane_per_axis() {
        let mut params = RenderParameters::default();
        params.set_clip_plane(Axis::Y, -0.4);
        assert_eq!(params.clip_plane(Axis::Y), -0.4);
        assert_eq!(params.clip_plane(Axis::X), 0.0);
        assert_eq!(params.clip_planes, vector![0.0, -0.4, 0.0]);
    }
}
