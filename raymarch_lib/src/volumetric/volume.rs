use nalgebra::{Point3, Vector3};

/// Sampler-ready volume.
///
/// Samples are addressed by texture coordinates, `<0;1>` on each axis
/// spanning the whole grid regardless of its resolution.
pub trait Volume {
    /// Data dimensions, in voxels
    fn get_size(&self) -> Vector3<usize>;

    /// Filtered sample at texture coordinates `uvw`.
    /// Coordinates outside `<0;1>` are clamped to the edge.
    fn sample_at(&self, uvw: Point3<f32>) -> f32;

    /// Raw voxel, `None` outside the grid
    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32>;

    fn get_name(&self) -> &str;
}
