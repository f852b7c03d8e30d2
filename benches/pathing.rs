use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use mazes::cells::Coordinate;
use mazes::generators;
use mazes::pathing;

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = generators::generate_maze_with_seed(350, 350, 7).unwrap();
        let start_coord = Coordinate::new(250, 250);
        b.iter(|| pathing::Distances::new(&g, start_coord))
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let g = generators::generate_maze_with_seed(350, 350, 7).unwrap();
        let start_coord = Coordinate::new(250, 250);
        let distances = pathing::Distances::new(&g, start_coord).unwrap();
        let end_coord = Coordinate::new(0, 0);
        b.iter(|| pathing::shortest_path(&g, &distances, end_coord))
    });
}

fn bench_longest_path(c: &mut Criterion) {
    c.bench_function("longest_path", |b| {
        let g = generators::generate_maze_with_seed(100, 100, 7).unwrap();
        b.iter(|| pathing::longest_path(&g))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_shortest_path,
    bench_longest_path
);
criterion_main!(benches);
