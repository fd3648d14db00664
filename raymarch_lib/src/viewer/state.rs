use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::Slot;
use crate::{
    render::{MaskOverlayParameters, RenderParameters},
    volumetric::VolumeTexture,
};

/// Parameters set by the host, read once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewerControls {
    pub params: RenderParameters,
    pub overlay: MaskOverlayParameters,
}

/// Texture currently displayed in a slot
#[derive(Debug, Clone)]
pub(crate) struct ActiveTexture {
    pub id: String,
    pub texture: Arc<VolumeTexture>,
}

#[derive(Debug, Default)]
struct Request {
    /// Bumped by every request, unload and cancel
    generation: u64,
    id: Option<String>,
}

/// One slot (volume or mask).
///
/// Lock order is `request` then `active`.
#[derive(Debug, Default)]
pub(crate) struct SlotState {
    request: Mutex<Request>,
    active: RwLock<Option<ActiveTexture>>,
}

impl SlotState {
    /// Request `id`, returns generation of the new request.
    /// `None` if `id` is already requested.
    pub fn request(&self, id: &str) -> Option<u64> {
        let mut request = self.request.lock();
        if request.id.as_deref() == Some(id) {
            return None;
        }
        request.generation += 1;
        request.id = Some(id.to_string());
        Some(request.generation)
    }

    /// Drop request and displayed texture, `false` if there was nothing to drop
    pub fn unload(&self) -> bool {
        let mut request = self.request.lock();
        let mut active = self.active.write();
        if request.id.is_none() && active.is_none() {
            return false;
        }
        request.generation += 1;
        request.id = None;
        *active = None;
        true
    }

    /// Invalidate in-flight load, displayed texture stays.
    /// Returns `false` when nothing was loading.
    pub fn cancel(&self) -> bool {
        let mut request = self.request.lock();
        let active_id = self.active.read().as_ref().map(|a| a.id.clone());
        if request.id == active_id {
            return false;
        }
        request.generation += 1;
        request.id = active_id;
        true
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.request.lock().generation == generation
    }

    /// Swap in `texture` if `generation` is still the latest request.
    /// Stale textures are dropped, returns whether the swap happened.
    pub fn commit(&self, generation: u64, id: &str, texture: VolumeTexture) -> bool {
        let request = self.request.lock();
        if request.generation != generation {
            return false;
        }
        *self.active.write() = Some(ActiveTexture {
            id: id.to_string(),
            texture: Arc::new(texture),
        });
        true
    }

    /// Give up on request `generation`, the slot keeps showing its texture.
    /// Returns `false` if the request was already superseded.
    pub fn fail(&self, generation: u64) -> bool {
        let mut request = self.request.lock();
        if request.generation != generation {
            return false;
        }
        request.id = self.active.read().as_ref().map(|a| a.id.clone());
        true
    }

    pub fn requested_id(&self) -> Option<String> {
        self.request.lock().id.clone()
    }

    pub fn active_id(&self) -> Option<String> {
        self.active.read().as_ref().map(|a| a.id.clone())
    }

    pub fn active_texture(&self) -> Option<Arc<VolumeTexture>> {
        self.active.read().as_ref().map(|a| a.texture.clone())
    }

    pub fn is_loading(&self) -> bool {
        let request = self.request.lock();
        let active = self.active.read();
        request.id.as_deref() != active.as_ref().map(|a| a.id.as_str())
    }
}

/// State shared between the viewer and its loader thread
#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub volume: SlotState,
    pub mask: SlotState,
    pub controls: RwLock<ViewerControls>,
}

impl Shared {
    pub fn slot(&self, slot: Slot) -> &SlotState {
        match slot {
            Slot::Volume => &self.volume,
            Slot::Mask => &self.mask,
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;
    use crate::volumetric::{ScalarVolume, TextureProvisioner};

    fn texture() -> VolumeTexture {
        TextureProvisioner::default()
            .provision(&ScalarVolume::filled(vector![2, 2, 2], 0.5))
            .unwrap()
    }

    #[test]
    fn same_request_is_noop() {
        let slot = SlotState::default();
        assert_eq!(slot.request("a"), Some(1));
        assert_eq!(slot.request("a"), None);
        assert_eq!(slot.request("b"), Some(2));
        assert!(slot.is_loading());
    }

    #[test]
    fn stale_commit_is_rejected() {
        let slot = SlotState::default();
        let first = slot.request("a").unwrap();
        let second = slot.request("b").unwrap();

        assert!(!slot.commit(first, "a", texture()));
        assert_eq!(slot.active_id(), None);

        assert!(slot.commit(second, "b", texture()));
        assert_eq!(slot.active_id().as_deref(), Some("b"));
        assert!(!slot.is_loading());
    }

    #[test]
    fn cancel_keeps_texture() {
        let slot = SlotState::default();
        let gen = slot.request("a").unwrap();
        assert!(slot.commit(gen, "a", texture()));

        let pending = slot.request("b").unwrap();
        assert!(slot.cancel());
        assert!(!slot.is_current(pending));
        assert_eq!(slot.active_id().as_deref(), Some("a"));
        assert_eq!(slot.requested_id().as_deref(), Some("a"));
        assert!(!slot.cancel());
    }

    #[test]
    fn failed_request_falls_back_to_active() {
        let slot = SlotState::default();
        let gen = slot.request("broken").unwrap();
        assert!(slot.fail(gen));
        assert_eq!(slot.requested_id(), None);
        assert!(!slot.is_loading());

        // can be requested again
        assert!(slot.request("broken").is_some());
    }

    #[test]
    fn unload_clears() {
        let slot = SlotState::default();
        assert!(!slot.unload());

        let gen = slot.request("a").unwrap();
        assert!(slot.commit(gen, "a", texture()));
        assert!(slot.unload());
        assert!(slot.active_texture().is_none());
        assert!(!slot.is_current(gen));
    }
}
