use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::{vector, Vector3};
use rayon::prelude::*;
use raymarch_lib::{
    volumetric::{demo, ScalarVolume},
    Result,
};

use crate::config::{Config, GeneratorConfig};

mod shapes;
mod solid;

pub use shapes::ShapesGenerator;
pub use solid::SolidGenerator;

// Generates one sample at a time, at any location
pub trait SampleGenerator: Sync {
    fn sample_at(&self, coords: Vector3<usize>) -> f32;
}

/// Fill a volume slice by slice, slices are generated in parallel
pub fn sample_volume<G>(generator: &G, dims: Vector3<usize>, progress: &ProgressBar) -> Result<ScalarVolume>
where
    G: SampleGenerator + ?Sized,
{
    let slice_len = dims.x * dims.y;
    let mut voxels = vec![0.0; slice_len * dims.z];

    voxels
        .par_chunks_exact_mut(slice_len.max(1))
        .enumerate()
        .for_each(|(z, slice)| {
            for (i, voxel) in slice.iter_mut().enumerate() {
                let coords = vector![i % dims.x, i / dims.x, z];
                *voxel = generator.sample_at(coords);
            }
            progress.inc(1);
        });

    ScalarVolume::new(dims, voxels)
}

fn progress_bar(slices: usize) -> ProgressBar {
    let progress = ProgressBar::new(slices as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("{bar:40} {pos}/{len} slices ({eta})"),
    );
    progress
}

pub fn generate_vol(config: &Config) -> Result<ScalarVolume> {
    let dims = config.dims;
    log::info!("Generating {:?} volume {}x{}x{}", config.generator, dims.x, dims.y, dims.z);

    match config.generator {
        GeneratorConfig::Sphere => Ok(demo::sphere_volume(dims)),
        GeneratorConfig::Mask => Ok(demo::labeled_sphere_mask(dims)),
        GeneratorConfig::Solid { sample, padding } => {
            let progress = progress_bar(dims.z);
            let generator = SolidGenerator::new(dims, sample, padding);
            let volume = sample_volume(&generator, dims, &progress)?;
            progress.finish_and_clear();
            Ok(volume)
        }
        GeneratorConfig::Shapes {
            n_of_shapes,
            sample,
            sample_variance,
            obj_size,
            seed,
        } => {
            let generator =
                ShapesGenerator::new(dims, n_of_shapes, obj_size, sample, sample_variance, seed);
            let progress = progress_bar(dims.z);
            let volume = sample_volume(&generator, dims, &progress)?;
            progress.finish_and_clear();
            Ok(volume)
        }
    }
}
