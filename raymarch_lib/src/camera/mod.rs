use nalgebra::Point3;

use crate::common::Ray;

mod perspective_camera;

pub use perspective_camera::PerspectiveCamera;

/// Ray generator for frame rendering
pub trait Camera {
    fn get_position(&self) -> Point3<f32>;

    /// Ray through the image plane at `pixel_coord`, `<0;1>x<0;1>` with `[0,0]` in the upper left corner
    fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray;
}
