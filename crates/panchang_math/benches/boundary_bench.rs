use std::convert::Infallible;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use panchang_math::{SearchWindow, find_boundary, lunar_day_progress};

/// Mean daily motions in degrees.
const SUN_RATE: f64 = 0.985_647;
const MOON_RATE: f64 = 13.176_396;

fn tithi_at(hours: f64) -> f64 {
    let days = hours / 24.0;
    lunar_day_progress(280.0 + SUN_RATE * days, 283.0 + MOON_RATE * days)
}

fn boundary_bench(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    let mut group = c.benchmark_group("boundary");
    group.bench_function("tithi_end_attribute_window", |b| {
        b.to_async(&rt).iter(|| async {
            let f = |t: f64| async move { Ok::<f64, Infallible>(tithi_at(t)) };
            find_boundary(black_box(0.0), f, 1.0, 30.0, &SearchWindow::ATTRIBUTE)
                .await
                .expect("infallible")
        })
    });
    group.finish();
}

criterion_group!(benches, boundary_bench);
criterion_main!(benches);
