// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use understory_bvh::{Aabb2D, Aabb3D, BoundingBox, Tree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

fn gen_random_rects(count: usize, world: f64, max_size: f64, seed: u64) -> Vec<Aabb2D<f64>> {
    let mut rng = Pcg64::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..world);
            let y = rng.random_range(0.0..world);
            let w = rng.random_range(1.0..max_size);
            let h = rng.random_range(1.0..max_size);
            Aabb2D::from_xywh(x, y, w, h)
        })
        .collect()
}

fn gen_random_boxes_i64(count: usize, world: i64, seed: u64) -> Vec<Aabb3D<i64>> {
    let mut rng = Pcg64::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let (x, y, z) = (
                rng.random_range(0..world),
                rng.random_range(0..world),
                rng.random_range(0..world),
            );
            let s = rng.random_range(1..16);
            Aabb3D::from_origin_size(x, y, z, s, s, s)
        })
        .collect()
}

/// Tree whose values are their own boxes.
fn self_tree<B: BoundingBox + PartialEq>()
-> Tree<B, B, impl Fn(&B) -> B, impl FnMut(&mut B, B) -> bool> {
    Tree::new(|b: &B| b.clone(), |b: &mut B, n| {
        *b = n;
        true
    })
}

fn bench_grid_build_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_grid_f64");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let query = Aabb2D::<f64>::from_xywh(100.0, 100.0, 200.0, 200.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("build_n{}", n), |b| {
            b.iter_batched(
                self_tree::<Aabb2D<f64>>,
                |mut tree| {
                    tree.extend(rects.iter().copied());
                    black_box(tree.height());
                },
                BatchSize::SmallInput,
            )
        });

        let mut built = self_tree::<Aabb2D<f64>>();
        built.extend(rects.iter().copied());
        group.bench_function(format!("query_n{}", n), |b| {
            b.iter(|| {
                let hits: usize = built.query(black_box(query)).count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_random_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_random_f64");
    for &count in &[1_000usize, 10_000] {
        let rects = gen_random_rects(count, 10_000.0, 50.0, 0x5eed);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_function(format!("remove_all_n{}", count), |b| {
            b.iter_batched(
                || {
                    let mut tree = self_tree::<Aabb2D<f64>>();
                    tree.extend(rects.iter().copied());
                    tree
                },
                |mut tree| {
                    for r in &rects {
                        let _ = tree.remove(r);
                    }
                    black_box(tree.is_empty());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("update_all_n{}", count), |b| {
            b.iter_batched(
                || {
                    let mut tree = self_tree::<Aabb2D<f64>>();
                    tree.extend(rects.iter().copied());
                    tree
                },
                |mut tree| {
                    for r in &rects {
                        let _ = tree.update_boundary(r, r.translated(7.5, -2.5));
                    }
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_random_3d_i64(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_random_3d_i64");
    let count = 10_000;
    let boxes = gen_random_boxes_i64(count, 4_096, 0xb0c5);
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("build_query", |b| {
        b.iter_batched(
            self_tree::<Aabb3D<i64>>,
            |mut tree| {
                tree.extend(boxes.iter().copied());
                let hits: usize = tree.query(Aabb3D::new(0, 0, 0, 512, 512, 512)).count();
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_grid_build_query,
    bench_random_churn,
    bench_random_3d_i64
);
criterion_main!(benches);
