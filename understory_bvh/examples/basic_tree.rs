// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory BVH: add, move, remove, and query.

use understory_bvh::{Aabb2D, Tree};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Body {
    id: u32,
    aabb: Aabb2D<i64>,
}

fn main() {
    let mut tree = Tree::new(
        |b: &Body| b.aabb,
        |b: &mut Body, aabb| {
            b.aabb = aabb;
            true
        },
    );
    let a = Body {
        id: 1,
        aabb: Aabb2D::new(0, 0, 10, 10),
    };
    let b = Body {
        id: 2,
        aabb: Aabb2D::new(5, 5, 15, 15),
    };
    tree.add(a);
    tree.add(b);

    // Move body 1
    tree.update_boundary(&a, Aabb2D::new(20, 0, 30, 10));
    println!("boundary: {:?}, height: {}", tree.tree_boundary(), tree.height());

    // Query a small region
    let hits: Vec<u32> = tree
        .query(Aabb2D::new(6, 6, 7, 7))
        .map(|body| body.id)
        .collect();
    println!("hits at (6,6): {:?}", hits);

    tree.remove(&b);
    println!("after removal: {tree:?}");
}
