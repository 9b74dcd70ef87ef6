//! Benchmarks for the per-frame growth step and terrain ray casts.
// criterion's macros expand to undocumented pub items and its builder
// methods return `&mut Self`, tripping the crate-level lints.
#![allow(missing_docs, unused_results)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use floret::growth::{GrowthField, GrowthParams};
use floret::model::procedural;
use floret::scene::{Ray, SurfacePoint};
use glam::Vec3;

/// Anchors spiralling over a disc so a near-origin target keeps a small
/// fraction of the population inside the near radius.
fn scatter(count: usize) -> Vec<SurfacePoint> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count.max(1) as f32;
            let angle = t * std::f32::consts::TAU * 7.0;
            let radius = t.sqrt() * 1.5;
            SurfacePoint {
                position: Vec3::new(
                    angle.cos() * radius,
                    0.2 * (1.0 - t),
                    angle.sin() * radius,
                ),
                normal: Vec3::Y,
            }
        })
        .collect()
}

fn step_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth_step");

    for count in [10, 100, 500, 5000] {
        let points = scatter(count);
        let mut field = GrowthField::new(&points, GrowthParams::default());
        field.set_target(Vec3::new(0.05, 0.0, 0.05));

        group.bench_function(format!("{count}_instances"), |b| {
            b.iter(|| {
                field.step();
                black_box(field.transforms().len())
            })
        });
    }
    group.finish();
}

fn raycast_benchmark(c: &mut Criterion) {
    let mound = procedural::terrain_mound();
    let ray = Ray {
        origin: Vec3::new(0.3, 5.0, -0.2),
        dir: -Vec3::Y,
    };

    c.bench_function("terrain_raycast", |b| {
        b.iter(|| black_box(black_box(&ray).cast(&mound)))
    });
}

criterion_group!(benches, step_benchmark, raycast_benchmark);
criterion_main!(benches);
