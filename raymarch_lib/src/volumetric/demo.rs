//! Procedural volumes shown when no real data is loaded

use nalgebra::{Point3, Vector3};

use super::ScalarVolume;
use crate::render::MaskLabel;

/// Default demo resolution
pub const DEMO_SIZE: usize = 64;

fn sphere_center(size: Vector3<usize>) -> Point3<f32> {
    Point3::from(size.map(|s| s as f32 / 2.0))
}

fn sphere_radius(size: Vector3<usize>) -> f32 {
    0.3 * size.x.min(size.y).min(size.z) as f32
}

// Distance from center relative to radius, `None` for degenerate sphere
fn relative_distance(
    center: Point3<f32>,
    radius: f32,
) -> impl Fn(usize, usize, usize) -> Option<f32> {
    move |x, y, z| {
        if radius <= 0.0 {
            return None;
        }
        let pos = Point3::new(x as f32, y as f32, z as f32);
        Some((pos - center).norm() / radius)
    }
}

/// Sphere with density falling off linearly from 1 in the center to 0 at `0.3 * min(size)`.
pub fn sphere_volume(size: Vector3<usize>) -> ScalarVolume {
    let distance = relative_distance(sphere_center(size), sphere_radius(size));
    ScalarVolume::from_fn(size, |x, y, z| match distance(x, y, z) {
        Some(rel) => f32::max(0.0, 1.0 - rel),
        None => 0.0,
    })
}

/// Segmentation matching [`sphere_volume`].
///
/// Necrotic core, enhancing ring and edema shell, each voxel holding its label's band center.
pub fn labeled_sphere_mask(size: Vector3<usize>) -> ScalarVolume {
    let distance = relative_distance(sphere_center(size), sphere_radius(size));
    ScalarVolume::from_fn(size, |x, y, z| {
        let label = match distance(x, y, z) {
            Some(rel) if rel < 0.3 => MaskLabel::NecroticCore,
            Some(rel) if rel < 0.6 => MaskLabel::Enhancing,
            Some(rel) if rel < 1.0 => MaskLabel::Edema,
            _ => return 0.0,
        };
        label.representative_value()
    })
}
