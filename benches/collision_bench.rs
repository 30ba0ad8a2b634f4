use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nexus_shape2d::{Circle, Ellipse, Intersect, Mesh, Polygon, ShapeGrid, TriangleF, AABB};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

const QUERY_POP: usize = 20_000;
const SIZE: f32 = 500.0;

fn random_pos(rng: &mut StdRng) -> [f32; 2] {
    [rng.gen::<f32>() * SIZE, rng.gen::<f32>() * SIZE]
}

fn ellipses(rng: &mut StdRng, n: usize) -> Vec<Ellipse> {
    (0..n)
        .map(|_| {
            let c = [rng.gen::<f32>() * 20.0, rng.gen::<f32>() * 20.0];
            Ellipse::new(c, [1.0 + rng.gen::<f32>() * 5.0, 1.0 + rng.gen::<f32>() * 5.0])
        })
        .collect()
}

fn pairs(c: &mut Criterion) {
    let mut g = c.benchmark_group("Pairs");
    let mut rng = StdRng::seed_from_u64(0);

    let es = ellipses(&mut rng, 64);
    g.bench_function("ellipse ellipse", |b| {
        b.iter(|| {
            es.iter()
                .zip(es.iter().rev())
                .filter(|(a, e)| a.intersects(*e))
                .count()
        })
    });

    let circle = Circle::new([10.0, 10.0], 4.0);
    g.bench_function("ellipse circle", |b| {
        b.iter(|| es.iter().filter(|e| e.intersects(black_box(&circle))).count())
    });

    let polys: Vec<_> = (0..32)
        .map(|_| {
            let center = [rng.gen::<f32>() * 20.0, rng.gen::<f32>() * 20.0];
            Polygon::new_random(&mut rng, center, 1.0, 6.0, 16)
        })
        .collect();
    g.bench_function("polygon polygon", |b| {
        b.iter(|| {
            polys
                .iter()
                .zip(polys.iter().rev())
                .filter(|(a, p)| a.intersects(*p))
                .count()
        })
    });

    let mesh: Mesh = (0..64)
        .map(|i| {
            let o = i as f32 * 2.0;
            TriangleF::new([o, 0.0], [o + 2.0, 0.0], [o + 1.0, 3.0])
        })
        .collect();
    let aabb = AABB::new([60.0, 1.0], [64.0, 5.0]);
    g.bench_function("mesh aabb", |b| b.iter(|| mesh.intersects(black_box(&aabb))));

    g.finish()
}

fn query_setup(cell_size: i32) -> ShapeGrid<u32> {
    let mut rng = StdRng::seed_from_u64(1);
    let mut grid = ShapeGrid::new(cell_size);
    for i in 0..QUERY_POP as u32 {
        let pos = random_pos(&mut rng);
        match i % 3 {
            0 => grid.insert(Circle::new(pos, 1.0 + rng.gen::<f32>()), i),
            1 => grid.insert(Ellipse::new(pos, [2.0, 0.5]), i),
            _ => grid.insert(Polygon::new_random(&mut rng, pos, 0.5, 2.0, 6), i),
        };
    }
    grid
}

#[inline(never)]
fn query_5_shapegrid(g: &ShapeGrid<u32>, iter: u64) -> Duration {
    let mut rng = StdRng::seed_from_u64(2);
    let start = Instant::now();

    for _ in 0..iter {
        let pos = random_pos(&mut rng);
        for x in g.query_around(pos, 5.0) {
            black_box(x);
        }
    }

    start.elapsed()
}

fn query(c: &mut Criterion) {
    let mut c = c.benchmark_group("Query");
    let g5 = query_setup(5);
    let g10 = query_setup(10);
    let g20 = query_setup(20);

    c.bench_function("query shapegrid05", |b| {
        b.iter_custom(|iter| query_5_shapegrid(&g5, iter))
    });
    c.bench_function("query shapegrid10", |b| {
        b.iter_custom(|iter| query_5_shapegrid(&g10, iter))
    });
    c.bench_function("query shapegrid20", |b| {
        b.iter_custom(|iter| query_5_shapegrid(&g20, iter))
    });
    c.finish()
}

criterion_group!(benches, pairs, query);
criterion_main!(benches);
