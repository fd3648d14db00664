use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossbeam_channel::select;
use raymarch_lib::{
    render::Axis,
    viewer::{LoadEvent, Slot},
    volumetric::DirectorySource,
    PerspectiveCamera, Renderer, Viewer, ViewerConfig,
};

use crate::{config::Config, defaults, error::AppError};

/// Viewer, renderer and camera of one render
pub struct State {
    viewer: Viewer,
    renderer: Renderer,
    camera: PerspectiveCamera,
}

impl State {
    pub fn new(cfg: &Config) -> Result<State, AppError> {
        let source = Arc::new(DirectorySource::new(&cfg.volumes_dir));
        log::debug!("Volumes are read from {:?}", source.get_root());
        let viewer_config = ViewerConfig {
            load_timeout: cfg.load_timeout,
            ..Default::default()
        };
        let viewer = Viewer::new(source, viewer_config)?;

        let mut camera = PerspectiveCamera::looking_at(cfg.camera_position, defaults::CAM_TARGET);
        let resolution = cfg.render_options.resolution;
        camera.set_aspect_from_resolution(resolution.x, resolution.y);
        if let Some(fov) = cfg.fov {
            camera.set_fov(fov);
        }

        Ok(State {
            viewer,
            renderer: Renderer::new(cfg.render_options),
            camera,
        })
    }

    pub fn get_viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Select volume and mask of `cfg`, returns when both loads are resolved.
    ///
    /// Failed loads are logged, the frame then shows the demo sphere or no overlay.
    pub fn load(&self, cfg: &Config) {
        let mut pending = 0;
        if let Some(id) = &cfg.volume {
            pending += usize::from(self.viewer.select_volume(Some(id)));
        }
        if let Some(id) = &cfg.mask {
            pending += usize::from(self.viewer.select_mask(Some(id)));
        }

        let wait = cfg
            .load_timeout
            .unwrap_or(Duration::from_secs(defaults::LOAD_WAIT_SECS));
        let deadline = Instant::now() + wait;
        let events = self.viewer.events();

        while pending > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            select! {
                recv(events) -> msg => match msg {
                    Ok(event) => {
                        if Self::resolves_request(&event) {
                            pending -= 1;
                        }
                    }
                    Err(_) => return,
                },
                default(remaining) => {
                    log::warn!("Gave up waiting for volumes after {wait:?}");
                    self.viewer.cancel(Slot::Volume);
                    self.viewer.cancel(Slot::Mask);
                    return;
                }
            }
        }
    }

    fn resolves_request(event: &LoadEvent) -> bool {
        match event {
            LoadEvent::Loaded { slot, id, size } => {
                log::info!("{slot:?} '{id}' loaded, {}x{}x{}", size.x, size.y, size.z);
                true
            }
            LoadEvent::Failed { slot, id, error } => {
                log::warn!("{slot:?} '{id}' failed: {error}");
                true
            }
            LoadEvent::Discarded { .. } => true,
            LoadEvent::Unloaded { .. } => false,
        }
    }

    /// Copy render and overlay parameters of `cfg` into the viewer
    pub fn apply_parameters(&self, cfg: &Config) {
        let params = &cfg.params;
        for axis in Axis::ALL {
            self.viewer.set_clip_plane(axis, params.clip_plane(axis));
        }
        self.viewer.set_transfer_function(params.transfer_function);
        self.viewer.set_color_mode(params.color_mode);
        self.viewer.set_brightness(params.brightness);
        self.viewer.set_contrast(params.contrast);
        self.viewer.set_mask_opacity(cfg.overlay.mask_opacity);
        self.viewer.set_show_mask(cfg.overlay.show_mask);
    }

    /// Render current frame into a RGB buffer
    pub fn render(&self) -> Vec<u8> {
        let frame = self.viewer.frame();
        if frame.is_demo {
            log::info!("Rendering demo volume");
        }
        self.renderer.render(&frame, &self.camera)
    }
}
