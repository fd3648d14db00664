use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam::channel::{Receiver, Sender};

use super::{
    messages::{LoadRequest, LoaderMessage},
    state::{Shared, SlotState},
    LoadEvent,
};
use crate::{
    error::{Result, VolumeError},
    volumetric::{
        decode_with, Endianness, TextureProvisioner, Volume, VolumeSource, VolumeTexture,
    },
};

/// Background worker running fetch, decode and provision.
///
/// Requests are served one at a time in arrival order. Stale requests are
/// skipped, and checked again between stages.
pub(crate) struct Loader<S>
where
    S: VolumeSource + ?Sized,
{
    pub source: Arc<S>,
    pub shared: Arc<Shared>,
    pub provisioner: TextureProvisioner,
    pub payload_order: Endianness,
    pub timeout: Option<Duration>,
    pub events: Sender<LoadEvent>,
}

impl<S> Loader<S>
where
    S: VolumeSource + ?Sized + 'static,
{
    pub fn start(self, messages: Receiver<LoaderMessage>) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("volume-loader".into())
            .spawn(move || {
                // Ends on shut down or when the viewer is gone
                for msg in messages.iter() {
                    match msg {
                        LoaderMessage::Load(request) => self.load(request),
                        LoaderMessage::ShutDown => break,
                    }
                }
                log::debug!("Loader thread finished");
            })
    }

    fn load(&self, request: LoadRequest) {
        let slot = self.shared.slot(request.slot);
        let slot_kind = request.slot;
        let id = &request.id;
        let generation = request.generation;

        let event = match self.run_stages(slot, &request) {
            Ok(Some(texture)) => {
                let size = texture.get_size();
                if slot.commit(generation, id, texture) {
                    log::info!("Loaded {slot_kind:?} '{id}' {:?}", size.as_slice());
                    LoadEvent::Loaded {
                        slot: slot_kind,
                        id: id.clone(),
                        size,
                    }
                } else {
                    log::debug!("Discarding stale {slot_kind:?} '{id}'");
                    LoadEvent::Discarded {
                        slot: slot_kind,
                        id: id.clone(),
                    }
                }
            }
            Ok(None) => {
                log::debug!("Skipping stale {slot_kind:?} '{id}'");
                LoadEvent::Discarded {
                    slot: slot_kind,
                    id: id.clone(),
                }
            }
            Err(error) => {
                if slot.fail(generation) {
                    log::warn!("Loading {slot_kind:?} '{id}' failed: {error}");
                    LoadEvent::Failed {
                        slot: slot_kind,
                        id: id.clone(),
                        error,
                    }
                } else {
                    LoadEvent::Discarded {
                        slot: slot_kind,
                        id: id.clone(),
                    }
                }
            }
        };

        // Viewer might not listen anymore
        let _ = self.events.send(event);
    }

    // `Ok(false)` when the request got superseded
    fn checkpoint(&self, slot: &SlotState, request: &LoadRequest) -> Result<bool> {
        if !slot.is_current(request.generation) {
            return Ok(false);
        }
        if let Some(limit) = self.timeout {
            if request.issued.elapsed() >= limit {
                return Err(VolumeError::Timeout(limit));
            }
        }
        Ok(true)
    }

    fn run_stages(&self, slot: &SlotState, request: &LoadRequest) -> Result<Option<VolumeTexture>> {
        if !self.checkpoint(slot, request)? {
            return Ok(None);
        }

        let data = self.source.fetch(&request.id)?;
        if !self.checkpoint(slot, request)? {
            return Ok(None);
        }

        let volume = decode_with(data.get_slice(), self.payload_order)?;
        drop(data);
        if !self.checkpoint(slot, request)? {
            return Ok(None);
        }

        let texture = self.provisioner.provision(&volume)?;
        drop(volume);
        if !self.checkpoint(slot, request)? {
            return Ok(None);
        }

        Ok(Some(texture))
    }
}
