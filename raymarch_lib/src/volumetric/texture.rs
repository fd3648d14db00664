use nalgebra::{Point3, Vector3};

use super::{scalar_volume::voxel_count, ScalarVolume, Volume};
use crate::error::{Result, VolumeError};

/// Device limits a texture has to fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureLimits {
    /// Maximal size of one axis, in texels
    pub max_extent: usize,
    /// Maximal number of texels
    pub max_voxels: usize,
}

impl Default for TextureLimits {
    fn default() -> Self {
        Self {
            max_extent: 2048,
            max_voxels: 1 << 28,
        }
    }
}

impl TextureLimits {
    /// Check a texture of `size` fits, returns its texel count.
    ///
    /// Does not allocate, so it is safe to call before building a volume of that size.
    pub fn check(&self, size: Vector3<usize>) -> Result<usize> {
        if size.iter().any(|&s| s == 0) {
            return Err(provision_failure(size, "zero extent".into()));
        }

        if size.iter().any(|&s| s > self.max_extent) {
            return Err(provision_failure(
                size,
                format!("extent exceeds device limit {}", self.max_extent),
            ));
        }

        match voxel_count(size) {
            Some(count) if count <= self.max_voxels => Ok(count),
            _ => Err(provision_failure(
                size,
                format!("more than {} texels", self.max_voxels),
            )),
        }
    }
}

fn provision_failure(size: Vector3<usize>, reason: String) -> VolumeError {
    VolumeError::TextureProvisionFailure {
        size: [size.x, size.y, size.z],
        reason,
    }
}

/// Single channel float 3D texture.
///
/// Trilinear filtering, clamp to edge on all axes.
/// Texel `i` of an axis with `N` texels has its center at `(i + 0.5) / N`.
pub struct VolumeTexture {
    size: Vector3<usize>,
    texels: Vec<f32>,
}

impl std::fmt::Debug for VolumeTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeTexture")
            .field("size", &self.size)
            .field("texels len", &self.texels.len())
            .finish()
    }
}

// Neighbouring texel indices and weight of the upper one
fn axis_texels(t: f32, n: usize) -> (usize, usize, f32) {
    let last = n - 1;
    // NaN ends up at the lower edge
    let coord = (t * n as f32 - 0.5).max(0.0).min(last as f32);
    let lo = coord as usize;
    let hi = usize::min(lo + 1, last);
    (lo, hi, coord - lo as f32)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl VolumeTexture {
    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size.x + z * self.size.x * self.size.y
    }

    fn texel(&self, x: usize, y: usize, z: usize) -> f32 {
        self.texels[self.get_3d_index(x, y, z)]
    }

    /// Allocated texel storage, in bytes
    pub fn byte_size(&self) -> usize {
        self.texels.len() * std::mem::size_of::<f32>()
    }
}

impl Volume for VolumeTexture {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn sample_at(&self, uvw: Point3<f32>) -> f32 {
        let (x0, x1, tx) = axis_texels(uvw.x, self.size.x);
        let (y0, y1, ty) = axis_texels(uvw.y, self.size.y);
        let (z0, z1, tz) = axis_texels(uvw.z, self.size.z);

        // x lines
        let c00 = lerp(self.texel(x0, y0, z0), self.texel(x1, y0, z0), tx);
        let c10 = lerp(self.texel(x0, y1, z0), self.texel(x1, y1, z0), tx);
        let c01 = lerp(self.texel(x0, y0, z1), self.texel(x1, y0, z1), tx);
        let c11 = lerp(self.texel(x0, y1, z1), self.texel(x1, y1, z1), tx);

        // y plane
        let c0 = lerp(c00, c10, ty);
        let c1 = lerp(c01, c11, ty);

        lerp(c0, c1, tz)
    }

    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        Some(self.texel(x, y, z))
    }

    fn get_name(&self) -> &str {
        "VolumeTexture"
    }
}

/// Creates textures from decoded volumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureProvisioner {
    limits: TextureLimits,
}

impl TextureProvisioner {
    pub fn new(limits: TextureLimits) -> TextureProvisioner {
        TextureProvisioner { limits }
    }

    /// Allocate a new texture holding a copy of `volume`.
    /// Never reuses an existing texture.
    pub fn provision(&self, volume: &ScalarVolume) -> Result<VolumeTexture> {
        let size = volume.get_size();
        let count = self.limits.check(size)?;

        let mut texels = Vec::new();
        texels
            .try_reserve_exact(count)
            .map_err(|e| provision_failure(size, e.to_string()))?;
        texels.extend_from_slice(volume.voxels());

        let texture = VolumeTexture { size, texels };
        log::debug!(
            "Provisioned texture {:?}, {} bytes",
            size.as_slice(),
            texture.byte_size()
        );

        Ok(texture)
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;

    fn provision(vol: &ScalarVolume) -> VolumeTexture {
        TextureProvisioner::default().provision(vol).unwrap()
    }

    #[test]
    fn texel_centers() {
        let vol = ScalarVolume::new(vector![2, 1, 1], vec![0.0, 1.0]).unwrap();
        let tex = provision(&vol);

        assert_eq!(tex.sample_at(point![0.25, 0.5, 0.5]), 0.0);
        assert_eq!(tex.sample_at(point![0.75, 0.5, 0.5]), 1.0);
        assert!((tex.sample_at(point![0.5, 0.5, 0.5]) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn clamp_to_edge() {
        let vol = ScalarVolume::new(vector![2, 1, 1], vec![0.2, 0.8]).unwrap();
        let tex = provision(&vol);

        assert_eq!(tex.sample_at(point![-3.0, 0.5, 0.5]), 0.2);
        assert_eq!(tex.sample_at(point![0.0, 0.5, 0.5]), 0.2);
        assert_eq!(tex.sample_at(point![1.0, 0.5, 0.5]), 0.8);
        assert_eq!(tex.sample_at(point![7.0, -1.0, 2.0]), 0.8);
    }

    #[test]
    fn constant_volume_samples_exactly() {
        let vol = ScalarVolume::filled(vector![3, 4, 5], 0.011);
        let tex = provision(&vol);

        for uvw in [
            point![0.1, 0.2, 0.3],
            point![0.5, 0.5, 0.5],
            point![0.33, 0.91, 0.72],
        ] {
            assert_eq!(tex.sample_at(uvw), 0.011);
        }
    }

    #[test]
    fn trilinear_corner_mix() {
        let vol = ScalarVolume::from_fn(vector![2, 2, 2], |x, y, z| (x + y + z) as f32);
        let tex = provision(&vol);

        let center = tex.sample_at(point![0.5, 0.5, 0.5]);
        assert!((center - 1.5).abs() < 1e-6);
        assert_eq!(tex.get_data(1, 1, 1), Some(3.0));
        assert_eq!(tex.get_data(2, 0, 0), None);
    }

    #[test]
    fn provision_copies() {
        let vol = ScalarVolume::from_fn(vector![4, 3, 2], |x, y, z| (x * y * z) as f32);
        let tex = provision(&vol);

        assert_eq!(tex.get_size(), vol.get_size());
        assert_eq!(tex.byte_size(), 24 * 4);
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..4 {
                    assert_eq!(tex.get_data(x, y, z), vol.get_data(x, y, z));
                }
            }
        }
    }

    #[test]
    fn zero_extent_fails() {
        let vol = ScalarVolume::new(vector![0, 4, 4], vec![]).unwrap();
        let res = TextureProvisioner::default().provision(&vol);
        assert!(matches!(
            res,
            Err(VolumeError::TextureProvisionFailure { .. })
        ));
    }

    #[test]
    fn limits_check_without_allocating() {
        let limits = TextureLimits::default();

        assert_eq!(limits.check(vector![4, 3, 2]).unwrap(), 24);
        assert!(limits.check(vector![0, 3, 2]).is_err());
        assert!(limits.check(vector![2049, 1, 1]).is_err());
        // 2048^3 texels is over the voxel limit
        assert!(limits.check(vector![2048, 2048, 2048]).is_err());
        assert!(limits.check(vector![usize::MAX, usize::MAX, 2]).is_err());
    }

    #[test]
    fn limits_enforced() {
        let provisioner = TextureProvisioner::new(TextureLimits {
            max_extent: 4,
            max_voxels: 32,
        });

        let too_long = ScalarVolume::filled(vector![5, 1, 1], 0.0);
        assert!(provisioner.provision(&too_long).is_err());

        let too_many = ScalarVolume::filled(vector![4, 4, 4], 0.0);
        assert!(provisioner.provision(&too_many).is_err());

        let fits = ScalarVolume::filled(vector![4, 4, 2], 0.0);
        assert!(provisioner.provision(&fits).is_ok());
    }
}
