use std::{sync::Arc, thread::JoinHandle, time::Instant};

use crossbeam::channel::{Receiver, Sender};

use super::{
    loader::Loader,
    messages::{LoadRequest, LoaderMessage},
    state::Shared,
    LoadEvent, NormalizedBounds, Slot, ViewerConfig, ViewerControls,
};
use crate::{
    color::ColorMode,
    error::Result,
    render::{Axis, Frame},
    volumetric::{demo, TextureProvisioner, Volume, VolumeSource, VolumeTexture},
};

/// Selects the displayed volume and mask and owns their textures.
///
/// Loading runs on a background thread, the displayed texture is replaced
/// only after the new one is ready. Without a loaded volume, a procedural
/// sphere is shown.
pub struct Viewer {
    shared: Arc<Shared>,
    demo: Arc<VolumeTexture>,
    sender: Sender<LoaderMessage>,
    event_sender: Sender<LoadEvent>,
    events: Receiver<LoadEvent>,
    handle: Option<JoinHandle<()>>,
    config: ViewerConfig,
}

impl Viewer {
    /// Start viewer with its loader thread.
    ///
    /// Fails if the demo volume does not fit the texture limits or the thread cannot be spawned.
    pub fn new<S>(source: Arc<S>, config: ViewerConfig) -> Result<Viewer>
    where
        S: VolumeSource + ?Sized + 'static,
    {
        // demo is built in memory, check before allocating
        config.texture_limits.check(config.demo_size)?;
        let provisioner = TextureProvisioner::new(config.texture_limits);
        let demo = provisioner.provision(&demo::sphere_volume(config.demo_size))?;

        let shared = Arc::new(Shared::default());
        let (sender, receiver) = crossbeam::channel::unbounded();
        let (event_sender, events) = crossbeam::channel::unbounded();

        let loader = Loader {
            source,
            shared: shared.clone(),
            provisioner,
            payload_order: config.payload_order,
            timeout: config.load_timeout,
            events: event_sender.clone(),
        };
        let handle = loader.start(receiver)?;

        log::debug!("Viewer started, {config:?}");

        Ok(Viewer {
            shared,
            demo: Arc::new(demo),
            sender,
            event_sender,
            events,
            handle: Some(handle),
            config,
        })
    }

    pub fn get_config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Select anatomy volume, `None` unloads it and brings back the demo.
    ///
    /// Returns `false` if `id` is already selected.
    pub fn select_volume(&self, id: Option<&str>) -> bool {
        self.select(Slot::Volume, id)
    }

    /// Select segmentation mask, `None` unloads it.
    ///
    /// Returns `false` if `id` is already selected.
    pub fn select_mask(&self, id: Option<&str>) -> bool {
        self.select(Slot::Mask, id)
    }

    fn select(&self, slot: Slot, id: Option<&str>) -> bool {
        let state = self.shared.slot(slot);
        match id {
            Some(id) => {
                let generation = match state.request(id) {
                    Some(generation) => generation,
                    None => return false,
                };
                log::info!("Requesting {slot:?} '{id}'");
                let request = LoadRequest {
                    slot,
                    id: id.to_string(),
                    generation,
                    issued: Instant::now(),
                };
                if self.sender.send(LoaderMessage::Load(request)).is_err() {
                    log::error!("Loader thread is not running");
                }
                true
            }
            None => {
                if !state.unload() {
                    return false;
                }
                log::info!("Unloaded {slot:?}");
                let _ = self.event_sender.send(LoadEvent::Unloaded { slot });
                true
            }
        }
    }

    /// Abandon in-flight load of `slot`, displayed texture stays.
    pub fn cancel(&self, slot: Slot) -> bool {
        let cancelled = self.shared.slot(slot).cancel();
        if cancelled {
            log::debug!("Cancelled {slot:?} load");
        }
        cancelled
    }

    /// Load outcomes, in completion order
    pub fn events(&self) -> &Receiver<LoadEvent> {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.shared.volume.is_loading() || self.shared.mask.is_loading()
    }

    pub fn is_demo(&self) -> bool {
        self.shared.volume.active_id().is_none()
    }

    pub fn active_volume_id(&self) -> Option<String> {
        self.shared.volume.active_id()
    }

    pub fn active_mask_id(&self) -> Option<String> {
        self.shared.mask.active_id()
    }

    pub fn requested_id(&self, slot: Slot) -> Option<String> {
        self.shared.slot(slot).requested_id()
    }

    /// Render box scale of the displayed volume
    pub fn bounds(&self) -> NormalizedBounds {
        let texture = self
            .shared
            .volume
            .active_texture()
            .unwrap_or_else(|| self.demo.clone());
        NormalizedBounds::from_size(texture.get_size())
    }

    pub fn controls(&self) -> ViewerControls {
        *self.shared.controls.read()
    }

    pub fn set_clip_plane(&self, axis: Axis, value: f32) {
        self.shared.controls.write().params.set_clip_plane(axis, value);
    }

    pub fn set_transfer_function(&self, value: f32) {
        self.shared.controls.write().params.transfer_function = value;
    }

    pub fn set_color_mode(&self, mode: ColorMode) {
        self.shared.controls.write().params.color_mode = mode;
    }

    pub fn set_brightness(&self, value: f32) {
        self.shared.controls.write().params.brightness = value;
    }

    pub fn set_contrast(&self, value: f32) {
        self.shared.controls.write().params.contrast = value;
    }

    pub fn set_mask_opacity(&self, value: f32) {
        self.shared.controls.write().overlay.mask_opacity = value;
    }

    pub fn set_show_mask(&self, show: bool) {
        self.shared.controls.write().overlay.show_mask = show;
    }

    /// Consistent snapshot for rendering one frame
    pub fn frame(&self) -> Frame {
        // Controls stay locked until textures are captured
        let controls = self.shared.controls.read();

        let (anatomy, is_demo) = match self.shared.volume.active_texture() {
            Some(texture) => (texture, false),
            None => (self.demo.clone(), true),
        };

        let mask = if controls.overlay.show_mask {
            self.shared.mask.active_texture()
        } else {
            None
        };

        Frame {
            bounds: NormalizedBounds::from_size(anatomy.get_size()),
            anatomy,
            mask,
            params: controls.params,
            overlay: controls.overlay,
            is_demo,
        }
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        let _ = self.sender.send(LoaderMessage::ShutDown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Loader thread panicked");
            }
        }
    }
}
