// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Using `kurbo::Rect` directly as the bounding box type.
//!
//! Run:
//! - `cargo run -p understory_bvh_demos --example kurbo_rects`

use kurbo::Rect;
use understory_bvh::Tree;

#[derive(Clone, Debug, PartialEq)]
struct Widget {
    name: &'static str,
    frame: Rect,
}

fn main() {
    let mut tree = Tree::new(
        |w: &Widget| w.frame,
        |w: &mut Widget, frame: Rect| {
            // Widgets refuse to shrink below 1x1.
            if frame.width() < 1.0 || frame.height() < 1.0 {
                return false;
            }
            w.frame = frame;
            true
        },
    );

    let header = Widget {
        name: "header",
        frame: Rect::new(0.0, 0.0, 800.0, 60.0),
    };
    let sidebar = Widget {
        name: "sidebar",
        frame: Rect::new(0.0, 60.0, 200.0, 600.0),
    };
    let content = Widget {
        name: "content",
        frame: Rect::new(200.0, 60.0, 800.0, 600.0),
    };
    tree.extend([header.clone(), sidebar.clone(), content]);

    let hit: Vec<_> = tree
        .query(Rect::new(150.0, 30.0, 151.0, 31.0))
        .map(|w| w.name)
        .collect();
    println!("under (150, 30): {hit:?}");

    let accepted = tree.update_boundary(&sidebar, Rect::new(0.0, 60.0, 0.5, 600.0));
    println!("collapse sidebar accepted: {accepted}");
    let accepted = tree.update_boundary(&sidebar, Rect::new(0.0, 60.0, 300.0, 600.0));
    println!("widen sidebar accepted: {accepted}");

    let overlapping: Vec<_> = tree
        .query(Rect::new(250.0, 100.0, 260.0, 110.0))
        .map(|w| w.name)
        .collect();
    println!("under (250, 100): {overlapping:?}");
    println!("{tree:?}");
}
