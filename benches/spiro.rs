use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::num::NonZeroUsize;
use wgpu_primer::config::SpiroParams;
use wgpu_primer::scene::Scene;
use wgpu_primer::spiro::{simulate, PerimeterNodes, SpiroDriver};

fn bench_node_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("perimeter_nodes");

    for count in [48usize, 96, 240, 10_000].iter() {
        let n = NonZeroUsize::new(*count).unwrap_or(NonZeroUsize::MIN);
        group.bench_with_input(BenchmarkId::new("generate", count), count, |b, _| {
            b.iter(|| PerimeterNodes::generate(black_box(n), black_box(32.0)));
        });
    }

    group.finish();
}

fn bench_steady_state_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for max_segments in [100usize, 2000, 20_000].iter() {
        let params = SpiroParams::new(96, 32.0, 7, *max_segments).expect("valid params");
        let mut scene = Scene::new();
        let mut driver = SpiroDriver::new(&params);
        // Fill the buffer so every measured tick also evicts.
        for _ in 0..*max_segments {
            driver.tick(&mut scene);
        }

        group.bench_with_input(BenchmarkId::new("evicting", max_segments), max_segments, |b, _| {
            b.iter(|| black_box(driver.tick(&mut scene)));
        });
    }

    group.finish();
}

fn bench_simulation(c: &mut Criterion) {
    let params = SpiroParams::new(96, 32.0, 7, 2000).expect("valid params");
    c.bench_function("simulate_3000", |b| {
        b.iter(|| simulate(black_box(&params), 3000));
    });
}

criterion_group!(
    benches,
    bench_node_generation,
    bench_steady_state_tick,
    bench_simulation
);
criterion_main!(benches);
