//! Volume raymarcher for scalar medical images with a segmentation overlay.
//!
//! Pipeline: wire bytes are decoded into a [`volumetric::ScalarVolume`], copied into a
//! [`volumetric::VolumeTexture`] and raymarched per pixel by [`render::RayMarcher`].
//! [`viewer::Viewer`] selects what is shown and loads it in the background.

pub mod camera;
pub mod color;
pub mod common;
pub mod error;
pub mod render;
pub mod test_helpers;
pub mod viewer;
pub mod volumetric;

pub use camera::{Camera, PerspectiveCamera};
pub use error::{Result, VolumeError};
pub use render::{Frame, RenderOptions, Renderer};
pub use viewer::{Viewer, ViewerConfig};
