use criterion::{criterion_group, criterion_main, Criterion};
use mazes::generators;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_generate_maze_32(c: &mut Criterion) {
    c.bench_function("generate_maze_32", |b| {
        b.iter(|| generators::generate_maze_with_seed(32, 32, 42))
    });
}

fn bench_generate_maze_256(c: &mut Criterion) {
    c.bench_function("generate_maze_256", |b| {
        b.iter(|| generators::generate_maze_with_seed(256, 256, 42))
    });
}

fn bench_recursive_backtracker_recarve_32(c: &mut Criterion) {
    let mut g = generators::generate_maze_with_seed(32, 32, 42).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(42);
    c.bench_function("recursive_backtracker_recarve_32", move |b| {
        b.iter(|| generators::recursive_backtracker(&mut g, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_generate_maze_32,
    bench_generate_maze_256,
    bench_recursive_backtracker_recarve_32
);
criterion_main!(benches);
