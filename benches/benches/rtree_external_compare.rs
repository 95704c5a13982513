// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_bvh::{Aabb2D, Tree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

type Item = (u32, Aabb2D<f64>);

fn gen_grid_items(n: usize, cell: f64) -> Vec<Item> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let id = (y * n + x) as u32;
            out.push((id, Aabb2D::<f64>::from_xywh(x0, y0, cell * 0.8, cell * 0.8)));
        }
    }
    out
}

fn to_rstar_rects(v: &[Item]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|(_, r)| Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]))
        .collect()
}

fn new_tree() -> Tree<
    Item,
    Aabb2D<f64>,
    impl Fn(&Item) -> Aabb2D<f64>,
    impl FnMut(&mut Item, Aabb2D<f64>) -> bool,
> {
    Tree::new(|it: &Item| it.1, |it: &mut Item, b| {
        it.1 = b;
        true
    })
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[64usize, 128] {
        let items = gen_grid_items(n, 10.0);
        let aabb_query = Aabb2D::<f64>::from_xywh(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                new_tree,
                |mut tree| {
                    tree.extend(items.iter().copied());
                    let hits: usize = tree.query(aabb_query).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_incremental_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&items),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners(
                        [aabb_query.min_x, aabb_query.min_y],
                        [aabb_query.max_x, aabb_query.max_y],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&items),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [aabb_query.min_x, aabb_query.min_y],
                        [aabb_query.max_x, aabb_query.max_y],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        // Move every item one cell-fraction to the right.
        group.bench_function(format!("understory_move_all_n{}", n), |b| {
            b.iter_batched(
                || {
                    let mut tree = new_tree();
                    tree.extend(items.iter().copied());
                    tree
                },
                |mut tree| {
                    for it in &items {
                        let moved = it.1.translated(3.0, 0.0);
                        let _ = tree.update_boundary(it, moved);
                    }
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_move_all_n{}", n), |b| {
            b.iter_batched(
                || RTree::bulk_load(to_rstar_rects(&items)),
                |mut tree| {
                    for (_, r) in &items {
                        let old = Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]);
                        let _ = tree.remove(&old);
                        tree.insert(Rectangle::from_corners(
                            [r.min_x + 3.0, r.min_y],
                            [r.max_x + 3.0, r.max_y],
                        ));
                    }
                    black_box(tree.size());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
