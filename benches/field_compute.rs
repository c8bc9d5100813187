//! Benchmarks for field computation and rendering.
//!
//! Run with: cargo bench --bench field_compute

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mandelbrot_explorer::core::actions::compute_field::compute_field::compute_field;
use mandelbrot_explorer::core::actions::compute_field::compute_field_parallel_rayon::compute_field_parallel_rayon;
use mandelbrot_explorer::core::actions::render_field::render_field::render_field;
use mandelbrot_explorer::{ColourMapKinds, ComplexPoint, ViewportParams, colour_map_factory};

/// The initial view of the explorer, scaled to `width` x `height`.
fn initial_view(width: u32, height: u32) -> ViewportParams {
    let zoom = 200.0 * f64::from(width) / 800.0;

    ViewportParams::new(width, height, zoom, ComplexPoint { re: 0.6, im: 0.0 }, 500)
        .expect("benchmark viewport is valid")
}

fn bench_compute_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_field");
    group.sample_size(10);

    for (width, height) in [(200, 150), (400, 300), (800, 600)] {
        let params = initial_view(width, height);
        group.throughput(Throughput::Elements(params.pixel_count() as u64));

        group.bench_with_input(
            BenchmarkId::new("serial", format!("{}x{}", width, height)),
            &params,
            |b, params| b.iter(|| compute_field(black_box(params))),
        );
        group.bench_with_input(
            BenchmarkId::new("rayon", format!("{}x{}", width, height)),
            &params,
            |b, params| b.iter(|| compute_field_parallel_rayon(black_box(params))),
        );
    }

    group.finish();
}

fn bench_render_field(c: &mut Criterion) {
    let params = initial_view(800, 600);
    let field = compute_field_parallel_rayon(&params);
    let mut group = c.benchmark_group("render_field");
    group.throughput(Throughput::Elements(params.pixel_count() as u64));

    for &kind in ColourMapKinds::ALL {
        let colour_map = colour_map_factory(kind, 0);
        group.bench_function(kind.id(), |b| {
            b.iter(|| render_field(black_box(&field), colour_map.as_ref()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_field, bench_render_field);
criterion_main!(benches);
