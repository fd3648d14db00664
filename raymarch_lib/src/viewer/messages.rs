use std::time::Instant;

use nalgebra::Vector3;

use crate::error::VolumeError;

/// Texture slot of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Anatomy volume
    Volume,
    /// Segmentation overlay
    Mask,
}

/// Messages to the loader thread
pub(crate) enum LoaderMessage {
    Load(LoadRequest),
    /// Finish, thread will get ready to be joined
    ShutDown,
}

pub(crate) struct LoadRequest {
    pub slot: Slot,
    pub id: String,
    pub generation: u64,
    pub issued: Instant,
}

/// Outcome of load requests, reported by the viewer
#[derive(Debug)]
pub enum LoadEvent {
    /// Texture is now displayed
    Loaded {
        slot: Slot,
        id: String,
        size: Vector3<usize>,
    },
    /// Load failed, previous texture stays
    Failed {
        slot: Slot,
        id: String,
        error: VolumeError,
    },
    /// Superseded or cancelled before it could be displayed
    Discarded { slot: Slot, id: String },
    Unloaded { slot: Slot },
}

impl LoadEvent {
    pub fn slot(&self) -> Slot {
        match self {
            LoadEvent::Loaded { slot, .. }
            | LoadEvent::Failed { slot, .. }
            | LoadEvent::Discarded { slot, .. }
            | LoadEvent::Unloaded { slot } => *slot,
        }
    }
}
