use nalgebra::{vector, Point3, Vector2, Vector3};

use super::Camera;
use crate::common::Ray;

// World up, replaced by `ALT_UP` when looking straight up or down
const WORLD_UP: Vector3<f32> = vector![0.0, 1.0, 0.0];
const ALT_UP: Vector3<f32> = vector![0.0, 0.0, 1.0];

/// Pinhole camera generating one ray per pixel
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    position: Point3<f32>,
    /// Unit looking direction
    direction: Vector3<f32>,
    /// Width / height of the image plane
    aspect: f32,
    /// Vertical field of view, in degrees
    fov_y: f32,
    img_plane_size: Vector2<f32>,
    /// Direction of the ray through the upper left corner of the image
    dir_00: Vector3<f32>,
    /// Image plane offset from left to right edge
    du: Vector3<f32>,
    /// Image plane offset from top to bottom edge, points down
    dv: Vector3<f32>,
}

impl PerspectiveCamera {
    pub const DEFAULT_FOV: f32 = 60.0;

    /// Camera at `position` looking in `direction`.
    ///
    /// Aspect ratio is 1, see [`set_aspect`](PerspectiveCamera::set_aspect).
    pub fn new(position: Point3<f32>, direction: Vector3<f32>) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera {
            position,
            direction: vector![0.0, 0.0, -1.0],
            aspect: 1.0,
            fov_y: Self::DEFAULT_FOV,
            img_plane_size: vector![1.0, 1.0],
            dir_00: vector![0.0, 0.0, -1.0],
            du: vector![1.0, 0.0, 0.0],
            dv: vector![0.0, -1.0, 0.0],
        };
        camera.recalc_plane_size();
        camera.set_direction(direction);
        camera
    }

    /// Camera at `position` looking at `target`
    pub fn looking_at(position: Point3<f32>, target: Point3<f32>) -> PerspectiveCamera {
        PerspectiveCamera::new(position, target - position)
    }

    /// Set aspect ratio to match `width x height` image
    pub fn set_aspect_from_resolution(&mut self, width: u16, height: u16) {
        if width == 0 || height == 0 {
            return;
        }
        self.set_aspect(width as f32 / height as f32);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    /// Vertical field of view in degrees, values outside `(0;180)` are ignored
    pub fn set_fov(&mut self, fov_y: f32) {
        if !(fov_y > 0.0 && fov_y < 180.0) {
            return;
        }
        self.fov_y = fov_y;
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    pub fn set_pos(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    /// Zero or non-finite directions are ignored
    pub fn set_direction(&mut self, direction: Vector3<f32>) {
        let len = direction.norm();
        if !len.is_finite() || len == 0.0 {
            return;
        }
        self.direction = direction / len;
        self.recalc_dudv();
    }

    pub fn get_dir(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn get_fov(&self) -> f32 {
        self.fov_y
    }

    fn recalc_plane_size(&mut self) {
        let height = 2.0 * f32::tan(f32::to_radians(0.5 * self.fov_y));
        self.img_plane_size = vector![height * self.aspect, height];
    }

    fn recalc_dudv(&mut self) {
        let mut right = self.direction.cross(&WORLD_UP);
        if right.norm_squared() < 1e-12 {
            right = self.direction.cross(&ALT_UP);
        }
        let right = right.normalize();
        let up = right.cross(&self.direction);

        self.du = self.img_plane_size.x * right;
        self.dv = -self.img_plane_size.y * up;
        self.dir_00 = self.direction - 0.5 * self.du - 0.5 * self.dv;
    }
}

impl Camera for PerspectiveCamera {
    fn get_position(&self) -> Point3<f32> {
        self.position
    }

    fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray {
        let dir = self.dir_00 + self.du * pixel_coord.0 + self.dv * pixel_coord.1;
        Ray::new(self.position, dir.normalize())
    }
}
