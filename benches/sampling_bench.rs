use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

use scene_kit::{camera_relative_input, grab, Transform, Vec2};

fn bench_grab(c: &mut Criterion) {
    let mut group = c.benchmark_group("grab");
    for &count in &[128usize, 512, 2048] {
        let items: Vec<Option<u32>> = (0..count as u32)
            .map(|i| (i % 5 != 0).then_some(i))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| grab(black_box(&items), count / 2, &mut rng).unwrap())
        });
    }
    group.finish();
}

fn bench_camera_relative_input(c: &mut Criterion) {
    let camera = Transform::looking(1.2, -0.3);

    c.bench_function("camera_relative_input", |b| {
        b.iter(|| camera_relative_input(black_box(Some(&camera)), black_box(Vec2::new(0.7, -0.4))))
    });
}

criterion_group!(benches, bench_grab, bench_camera_relative_input);
criterion_main!(benches);
