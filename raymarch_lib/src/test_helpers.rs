//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks

use std::sync::Arc;

use nalgebra::{point, vector, Vector3};

use crate::{
    camera::PerspectiveCamera,
    render::Frame,
    volumetric::{demo, encode, MemorySource, ScalarVolume, TextureProvisioner, VolumeTexture},
};

/// Copy `volume` into a texture, panics if it does not fit default limits
pub fn texture(volume: &ScalarVolume) -> VolumeTexture {
    TextureProvisioner::default()
        .provision(volume)
        .expect("volume fits default texture limits")
}

/// Frame showing demo sphere of size `side^3`, default parameters
pub fn sphere_frame(side: usize) -> Frame {
    let volume = demo::sphere_volume(vector![side, side, side]);
    Frame::from_texture(Arc::new(texture(&volume)))
}

/// Frame showing demo sphere with its labeled mask overlaid
pub fn sphere_frame_with_mask(side: usize) -> Frame {
    let size = vector![side, side, side];
    let mut frame = sphere_frame(side);
    frame.mask = Some(Arc::new(texture(&demo::labeled_sphere_mask(size))));
    frame.overlay.show_mask = true;
    frame
}

/// Memory source holding wire-format encoded `volumes`
pub fn memory_source(volumes: &[(&str, &ScalarVolume)]) -> Arc<MemorySource> {
    let source = Arc::new(MemorySource::new());
    for (id, volume) in volumes {
        source.insert(id, encode(volume).expect("volume encodes"));
    }
    source
}

/// Camera at `distance` on the +z axis looking at the origin
pub fn front_camera(distance: f32) -> PerspectiveCamera {
    PerspectiveCamera::looking_at(point![0.0, 0.0, distance], point![0.0, 0.0, 0.0])
}

/// Camera positions around the unit render box, all looking at the origin
pub const CAMERA_POSITIONS: [Vector3<f32>; 4] = [
    vector![0.0, 0.0, 2.0],
    vector![2.0, 0.0, 0.0],
    vector![1.2, 1.2, 1.2],
    vector![-1.5, 0.5, -1.0],
];
