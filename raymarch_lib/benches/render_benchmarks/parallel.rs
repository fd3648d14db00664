use crate::common::*;

fn parallel_options() -> RenderOptions {
    RenderOptions::builder()
        .resolution(RESOLUTION)
        .early_ray_termination(true)
        .multi_thread(true)
        .build_unchecked()
}

pub fn render_parallel(c: &mut Criterion) {
    let frame = test_helpers::sphere_frame(VOLUME_SIDE);
    let bench_options = BenchOptions::new(parallel_options(), "parallel ert", frame);

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn render_parallel_mask(c: &mut Criterion) {
    let frame = test_helpers::sphere_frame_with_mask(VOLUME_SIDE);
    let bench_options = BenchOptions::new(parallel_options(), "parallel ert mask", frame);

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}
