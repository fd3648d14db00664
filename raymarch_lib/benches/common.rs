pub use criterion::{criterion_group, criterion_main, Criterion};

pub use nalgebra::{vector, Point3, Vector2};
pub use raymarch_lib::{
    camera::PerspectiveCamera,
    render::{Frame, RenderOptions, Renderer},
    test_helpers::{self, CAMERA_POSITIONS},
};

pub const WIDTH: u16 = 512;
pub const HEIGHT: u16 = 512;
pub const RESOLUTION: Vector2<u16> = vector![WIDTH, HEIGHT];

/// Side of the benchmarked demo volume
pub const VOLUME_SIDE: usize = 128;

pub struct BenchOptions {
    pub render_options: RenderOptions,
    pub bench_name: String,
    pub frame: Frame,
}

impl BenchOptions {
    pub fn new(render_options: RenderOptions, bench_name: impl Into<String>, frame: Frame) -> Self {
        Self {
            render_options,
            bench_name: bench_name.into(),
            frame,
        }
    }

    /// Renders one frame per iteration, the camera moves between iterations
    pub fn get_benchmark(self) -> impl FnOnce(&mut Criterion) {
        move |c: &mut Criterion| {
            let BenchOptions {
                render_options,
                bench_name,
                frame,
            } = self;

            let renderer = Renderer::new(render_options);
            let mut buffer = vec![0; render_options.buffer_len()];

            let mut positions = CAMERA_POSITIONS.iter().cycle();

            c.bench_function(&bench_name, |b| {
                b.iter_batched(
                    || {
                        // Setup
                        let position = Point3::from(*positions.next().unwrap());
                        let mut camera = PerspectiveCamera::looking_at(position, Point3::origin());
                        camera.set_aspect_from_resolution(WIDTH, HEIGHT);
                        camera
                    },
                    |camera| {
                        // Measured part
                        renderer.render_to_buffer(&frame, &camera, &mut buffer);
                    },
                    criterion::BatchSize::PerIteration,
                );
            });
        }
    }
}
