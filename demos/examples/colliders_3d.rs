// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broad-phase collision pairs over integer 3D boxes.
//!
//! Run:
//! - `cargo run -p understory_bvh_demos --example colliders_3d`

use understory_bvh::{Aabb3D, Tree};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Collider {
    id: u32,
    aabb: Aabb3D<i64>,
}

fn main() {
    let mut tree = Tree::new(
        |c: &Collider| c.aabb,
        |c: &mut Collider, aabb| {
            c.aabb = aabb;
            true
        },
    );

    let mut id = 0;
    for x in 0..4 {
        for z in 0..4 {
            let aabb = Aabb3D::from_origin_size(x * 9, 0, z * 9, 10, 4, 10);
            tree.add(Collider { id, aabb });
            id += 1;
        }
    }

    // Each overlapping pair once, skipping self hits.
    let mut pairs = Vec::new();
    for c in tree.iter() {
        for other in tree.query_item(c) {
            if other.id > c.id {
                pairs.push((c.id, other.id));
            }
        }
    }
    pairs.sort_unstable();
    println!("{} colliders, {} touching pairs", tree.len(), pairs.len());
    for (a, b) in pairs.iter().take(8) {
        println!("  {a} <-> {b}");
    }
    println!("world {:?}, volume {}", tree.tree_boundary(), tree.tree_boundary().volume());
}
