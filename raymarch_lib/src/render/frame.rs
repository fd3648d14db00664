use std::sync::Arc;

use super::{MaskOverlayParameters, RayMarcher, RenderParameters};
use crate::{
    viewer::NormalizedBounds,
    volumetric::{Volume, VolumeTexture},
};

/// Everything one frame needs, captured at a single point in time.
///
/// Textures are shared, a newer load replacing them does not affect a frame in flight.
#[derive(Debug, Clone)]
pub struct Frame {
    pub anatomy: Arc<VolumeTexture>,
    /// Present only when a mask is loaded and shown
    pub mask: Option<Arc<VolumeTexture>>,
    pub bounds: NormalizedBounds,
    pub params: RenderParameters,
    pub overlay: MaskOverlayParameters,
    /// Anatomy is the procedural demo volume
    pub is_demo: bool,
}

impl Frame {
    /// Frame of a single volume with default parameters
    pub fn from_texture(anatomy: Arc<VolumeTexture>) -> Frame {
        let bounds = NormalizedBounds::from_size(anatomy.get_size());
        Frame {
            anatomy,
            mask: None,
            bounds,
            params: RenderParameters::default(),
            overlay: MaskOverlayParameters::default(),
            is_demo: false,
        }
    }

    /// Marcher over this frame's textures
    pub fn marcher(&self) -> RayMarcher<'_, VolumeTexture> {
        let marcher = RayMarcher::new(self.anatomy.as_ref(), self.params);
        match &self.mask {
            Some(mask) => marcher.with_mask(mask.as_ref(), self.overlay),
            None => marcher,
        }
    }

    pub fn uses_mask(&self) -> bool {
        self.mask.is_some() && self.overlay.show_mask
    }
}
