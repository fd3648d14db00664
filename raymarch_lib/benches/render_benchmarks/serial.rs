use crate::common::*;

fn serial_options(early_ray_termination: bool) -> RenderOptions {
    RenderOptions::builder()
        .resolution(RESOLUTION)
        .early_ray_termination(early_ray_termination)
        .multi_thread(false)
        .build_unchecked()
}

pub fn render_serial(c: &mut Criterion) {
    let frame = test_helpers::sphere_frame(VOLUME_SIDE);
    let bench_options = BenchOptions::new(serial_options(false), "serial", frame);

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn render_serial_ert(c: &mut Criterion) {
    let frame = test_helpers::sphere_frame(VOLUME_SIDE);
    let bench_options = BenchOptions::new(serial_options(true), "serial ert", frame);

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn render_serial_mask(c: &mut Criterion) {
    let frame = test_helpers::sphere_frame_with_mask(VOLUME_SIDE);
    let bench_options = BenchOptions::new(serial_options(true), "serial ert mask", frame);

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}
