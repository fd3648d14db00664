use nalgebra::Vector3;

use super::SampleGenerator;

/// Generate solid volume
/// All samples inside the padding have the same value
pub struct SolidGenerator {
    /// The sample value
    sample: f32,
    pad: usize,
    dims: Vector3<usize>,
}

impl SolidGenerator {
    pub fn new(dims: Vector3<usize>, sample: f32, pad: usize) -> SolidGenerator {
        SolidGenerator { sample, pad, dims }
    }

    fn is_inside(&self, coords: Vector3<usize>) -> bool {
        coords
            .iter()
            .zip(self.dims.iter())
            .all(|(&c, &dim)| c >= self.pad && c + self.pad < dim)
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> f32 {
        if self.is_inside(coords) {
            self.sample
        } else {
            0.0
        }
    }
}
