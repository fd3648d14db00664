use nalgebra::{vector, Vector3};

use crate::common::BoundBox;

/// Scale of the render box so the longest grid axis has length 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBounds {
    pub scale: Vector3<f32>,
}

impl NormalizedBounds {
    pub fn unit() -> NormalizedBounds {
        NormalizedBounds {
            scale: vector![1.0, 1.0, 1.0],
        }
    }

    /// Bounds of a grid with `size` voxels, unit scale for an empty grid
    pub fn from_size(size: Vector3<usize>) -> NormalizedBounds {
        let max_dim = size.x.max(size.y).max(size.z);
        if size.x == 0 || size.y == 0 || size.z == 0 {
            return NormalizedBounds::unit();
        }
        NormalizedBounds {
            scale: size.map(|s| s as f32 / max_dim as f32),
        }
    }

    /// Render box in world space, centered at origin
    pub fn world_box(&self) -> BoundBox {
        BoundBox::centered(self.scale)
    }
}

impl Default for NormalizedBounds {
    fn default() -> Self {
        Self::unit()
    }
}

#[cfg(test)]
mod test {

    use nalgebra::point;

    use super::*;

    #[test]
    fn longest_axis_is_one() {
        let bounds = NormalizedBounds::from_size(vector![240, 240, 155]);
        assert_eq!(bounds.scale.x, 1.0);
        assert_eq!(bounds.scale.y, 1.0);
        assert!((bounds.scale.z - 155.0 / 240.0).abs() < 1e-6);
    }

    #[test]
    fn cube_is_unit() {
        assert_eq!(
            NormalizedBounds::from_size(vector![64, 64, 64]),
            NormalizedBounds::unit()
        );
    }

    #[test]
    fn empty_grid_is_unit() {
        assert_eq!(
            NormalizedBounds::from_size(vector![0, 10, 10]),
            NormalizedBounds::unit()
        );
    }

    #[test]
    fn world_box_centered() {
        let bounds = NormalizedBounds::from_size(vector![100, 50, 25]);
        let world = bounds.world_box();
        assert_eq!(world.lower, point![-0.5, -0.25, -0.125]);
        assert_eq!(world.upper, point![0.5, 0.25, 0.125]);
    }
}
