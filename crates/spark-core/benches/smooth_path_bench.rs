use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use spark_core::path::{smooth_fragment, stroke_length};

fn gen_points(n: usize) -> Vec<(f64, f64)> {
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        // simple waveform with drift
        let y = (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001);
        v.push((i as f64, y));
    }
    v
}

fn bench_smooth_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("smooth_path");
    for &n in &[1_000usize, 10_000usize, 100_000usize] {
        let pts = gen_points(n);
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &pts, |b, pts| {
            b.iter_batched(
                || pts.clone(),
                |p| {
                    let _ = black_box(smooth_fragment(&p));
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::from_parameter(format!("len_n{n}")), &pts, |b, pts| {
            b.iter(|| black_box(stroke_length(pts, true)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_smooth_path);
criterion_main!(benches);
