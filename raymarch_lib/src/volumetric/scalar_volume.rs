use nalgebra::Vector3;

use crate::{
    common::ValueRange,
    error::{Result, VolumeError},
};

/// Number of voxels of a grid, `None` on overflow
pub fn voxel_count(size: Vector3<usize>) -> Option<usize> {
    size.x.checked_mul(size.y)?.checked_mul(size.z)
}

/// Decoded 3D scalar field.
///
/// Voxels are stored x fastest, then y, then z.
/// Values are expected in `<0;1>` but this is not enforced.
/// Immutable once constructed.
#[derive(Clone, PartialEq)]
pub struct ScalarVolume {
    size: Vector3<usize>,
    voxels: Vec<f32>,
}

impl std::fmt::Debug for ScalarVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarVolume")
            .field("size", &self.size)
            .field("voxels len", &self.voxels.len())
            .finish()
    }
}

impl ScalarVolume {
    /// Wrap voxel buffer, length must match `size`.
    pub fn new(size: Vector3<usize>, voxels: Vec<f32>) -> Result<ScalarVolume> {
        let expected = voxel_count(size).unwrap_or(usize::MAX);
        if voxels.len() != expected {
            return Err(VolumeError::DimensionMismatch {
                expected,
                actual: voxels.len(),
            });
        }
        Ok(ScalarVolume { size, voxels })
    }

    /// Build volume by evaluating `f(x, y, z)` for every voxel, in storage order.
    ///
    /// Allocates the whole grid, check [`TextureLimits`](super::TextureLimits) first
    /// for sizes coming from outside.
    pub fn from_fn<F>(size: Vector3<usize>, mut f: F) -> ScalarVolume
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let mut voxels = Vec::with_capacity(voxel_count(size).unwrap_or(0));
        for z in 0..size.z {
            for y in 0..size.y {
                for x in 0..size.x {
                    voxels.push(f(x, y, z));
                }
            }
        }
        ScalarVolume { size, voxels }
    }

    pub fn filled(size: Vector3<usize>, value: f32) -> ScalarVolume {
        ScalarVolume::from_fn(size, |_, _, _| value)
    }

    pub fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn depth(&self) -> usize {
        self.size.z
    }

    pub fn voxels(&self) -> &[f32] {
        &self.voxels
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size.x + z * self.size.x * self.size.y
    }

    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.voxels.get(self.get_3d_index(x, y, z)).copied()
    }

    /// Range of finite voxel values
    pub fn value_range(&self) -> ValueRange {
        ValueRange::from_samples(self.voxels.iter().copied())
    }

    /// Copy with values mapped to `<0;1>`.
    ///
    /// NaN and infinities become 0 first, then min-max normalization is applied.
    /// A constant volume normalizes to all zeros.
    pub fn normalized(&self) -> ScalarVolume {
        let cleaned = self
            .voxels
            .iter()
            .map(|&v| if v.is_finite() { v } else { 0.0 });
        let range = ValueRange::from_samples(cleaned.clone());
        let voxels = cleaned.map(|v| range.normalize(v)).collect();
        ScalarVolume {
            size: self.size,
            voxels,
        }
    }
}
