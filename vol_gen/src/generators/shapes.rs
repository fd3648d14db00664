use nalgebra::{vector, Vector3};

use super::SampleGenerator;

/// Generate volume with a number of randomly placed shapes
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn new(
        dims: Vector3<usize>,
        n_of_shapes: usize,
        obj_size: usize,
        sample: f32,
        sample_variance: f32,
        seed: Option<u64>,
    ) -> ShapesGenerator {
        let size = vector![obj_size, obj_size, obj_size];
        let size_variance = size / 4;
        let random_shape_gen =
            ShapeInfoGenerator::new(dims, size, size_variance, sample, sample_variance, seed);
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        log::debug!("Generated {} shapes", shapes.len());
        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> f32 {
        // First shape containing the point wins
        self.shapes
            .iter()
            .find(|shape| shape.contains(coords))
            .map(|shape| shape.render_at(coords - shape.position_low))
            .unwrap_or(0.0)
    }
}

// # of enum ShapeType variants
const N_OF_SHAPE_KINDS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// One shape in volume, bounds are inclusive
#[derive(Debug, Clone, Copy)]
pub struct ShapeInfo {
    pub position_low: Vector3<usize>,
    pub position_high: Vector3<usize>,
    pub shape_type: ShapeType,
    pub sample: f32,
}

impl ShapeInfo {
    fn contains(&self, coords: Vector3<usize>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] <= self.position_high[i])
    }

    fn render_at(&self, offset: Vector3<usize>) -> f32 {
        match self.shape_type {
            ShapeType::Cuboid => self.sample,
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    fn render_sphere(&self, offset: Vector3<usize>) -> f32 {
        let extent = (self.position_high - self.position_low).cast::<f32>();
        let center = extent / 2.0;
        let r = extent.x.min(extent.y).min(extent.z) / 2.0;

        if (offset.cast::<f32>() - center).norm() <= r {
            self.sample
        } else {
            0.0
        }
    }
}

/// Generate shapes
/// Helper type
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<usize>,
    size: Vector3<usize>,
    size_variance: Vector3<usize>,
    sample: f32,
    sample_variance: f32,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<usize>,
        size: Vector3<usize>,
        size_variance: Vector3<usize>,
        sample: f32,
        sample_variance: f32,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        match self.rng.u8(0..N_OF_SHAPE_KINDS) {
            0 => ShapeType::Cuboid,
            _ => ShapeType::Sphere,
        }
    }

    /// Random extent along one axis, never larger than the volume
    fn random_extent(&self, axis: usize) -> usize {
        let low = self.size[axis].saturating_sub(self.size_variance[axis]).max(1);
        let high = (self.size[axis] + self.size_variance[axis]).max(low);
        self.rng.usize(low..=high).min(self.vol_dims[axis])
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        let size = vector![self.random_extent(0), self.random_extent(1), self.random_extent(2)];

        // Spawn shape in positions it fits
        let position_low = vector![
            self.rng.usize(0..=(self.vol_dims.x - size.x)),
            self.rng.usize(0..=(self.vol_dims.y - size.y)),
            self.rng.usize(0..=(self.vol_dims.z - size.z))
        ];
        let position_high = position_low + size - vector![1, 1, 1];

        ShapeInfo {
            position_low,
            position_high,
            shape_type,
            sample: self.random_sample(),
        }
    }

    fn random_sample(&self) -> f32 {
        let spread = (self.rng.f32() * 2.0 - 1.0) * self.sample_variance;
        self.sample + spread
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_seed_same_volume() {
        let dims = vector![32, 32, 32];
        let a = ShapesGenerator::new(dims, 5, 8, 1.0, 0.1, Some(42));
        let b = ShapesGenerator::new(dims, 5, 8, 1.0, 0.1, Some(42));

        for z in (0..32).step_by(3) {
            for y in (0..32).step_by(3) {
                for x in (0..32).step_by(3) {
                    let coords = vector![x, y, z];
                    assert_eq!(a.sample_at(coords), b.sample_at(coords));
                }
            }
        }
    }

    #[test]
    fn shapes_fit_in_volume() {
        let dims = vector![10, 20, 5];
        let gen = ShapeInfoGenerator::new(dims, vector![8, 8, 8], vector![4, 4, 4], 1.0, 0.0, Some(1));

        for shape in gen.get_shapes(50) {
            for i in 0..3 {
                assert!(shape.position_low[i] <= shape.position_high[i]);
                assert!(shape.position_high[i] < dims[i]);
            }
            assert_eq!(shape.sample, 1.0);
        }
    }

    #[test]
    fn cuboid_fills_its_box() {
        let shape = ShapeInfo {
            position_low: vector![2, 2, 2],
            position_high: vector![4, 4, 4],
            shape_type: ShapeType::Cuboid,
            sample: 0.7,
        };
        let gen = ShapesGenerator { shapes: vec![shape] };

        assert_eq!(gen.sample_at(vector![2, 2, 2]), 0.7);
        assert_eq!(gen.sample_at(vector![4, 4, 4]), 0.7);
        assert_eq!(gen.sample_at(vector![5, 4, 4]), 0.0);
        assert_eq!(gen.sample_at(vector![1, 3, 3]), 0.0);
    }

    #[test]
    fn sphere_leaves_corners_empty() {
        let shape = ShapeInfo {
            position_low: vector![0, 0, 0],
            position_high: vector![8, 8, 8],
            shape_type: ShapeType::Sphere,
            sample: 1.0,
        };
        let gen = ShapesGenerator { shapes: vec![shape] };

        assert_eq!(gen.sample_at(vector![4, 4, 4]), 1.0);
        assert_eq!(gen.sample_at(vector![0, 0, 0]), 0.0);
    }
}
