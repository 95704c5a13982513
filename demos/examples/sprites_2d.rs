// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving sprites: step a small simulation and query a camera region each frame.
//!
//! Set `RUST_LOG=understory_bvh=trace` to watch splits and rotations.
//!
//! Run:
//! - `cargo run -p understory_bvh_demos --example sprites_2d`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_bvh::{Aabb2D, Tree};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sprite {
    id: u32,
    bounds: Aabb2D<f32>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = Pcg64::seed_from_u64(7);
    let mut tree = Tree::new(
        |s: &Sprite| s.bounds,
        |s: &mut Sprite, bounds| {
            s.bounds = bounds;
            true
        },
    );

    let mut sprites: Vec<(Sprite, f32, f32)> = (0..200)
        .map(|id| {
            let x = rng.random_range(0.0..1000.0);
            let y = rng.random_range(0.0..1000.0);
            let sprite = Sprite {
                id,
                bounds: Aabb2D::from_xywh(x, y, 16.0, 16.0),
            };
            let vx = rng.random_range(-5.0..5.0);
            let vy = rng.random_range(-5.0..5.0);
            (sprite, vx, vy)
        })
        .collect();
    tree.extend(sprites.iter().map(|(s, _, _)| *s));
    info!(sprites = tree.len(), height = tree.height(), "scene built");

    let camera = Aabb2D::<f32>::from_xywh(400.0, 400.0, 200.0, 150.0);
    for frame in 0..5 {
        for (sprite, vx, vy) in &mut sprites {
            let moved = sprite.bounds.translated(*vx, *vy);
            if tree.update_boundary(sprite, moved) {
                sprite.bounds = moved;
            }
        }
        let mut visible: Vec<u32> = tree.query(camera).map(|s| s.id).collect();
        visible.sort_unstable();
        println!("frame {frame}: {} visible {:?}", visible.len(), visible);
    }

    if let Err(violation) = tree.validate() {
        panic!("tree corrupted: {violation}");
    }
    println!(
        "final boundary {:?}, height {}",
        tree.tree_boundary(),
        tree.height()
    );
}
