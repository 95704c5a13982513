// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_bvh --heading-base-level=0

//! Understory BVH: a dynamic, AVL-balanced bounding volume hierarchy.
//!
//! Understory BVH answers "which stored items overlap this region?" for sets of items
//! that move every frame.
//!
//! - Add and remove items, or move one to a new box with [`Tree::update_boundary`].
//! - Query by any region of the same box type; results are produced lazily.
//! - Every stored item is its own leaf, every internal node has exactly two children,
//!   and the tree is kept height-balanced (AVL), so point operations stay logarithmic.
//!
//! The tree is generic over the bounding box through the [`BoundingBox`] trait.
//! [`Aabb2D`] and [`Aabb3D`] are provided for `f32`, `f64`, and `i64` coordinates,
//! computing area and volume in widened accumulators (f32→f64, f64→f64, i64→i128).
//! With the `kurbo` feature, `kurbo::Rect` is a [`BoundingBox`] too.
//!
//! Items are never inspected directly. The tree is built from two callbacks: one that
//! reads an item's current box, and one that writes a new box into an item.
//!
//! # Example
//!
//! ```rust
//! use understory_bvh::{Aabb2D, Tree};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! struct Sprite {
//!     id: u32,
//!     bounds: Aabb2D<f64>,
//! }
//!
//! let mut tree = Tree::new(
//!     |s: &Sprite| s.bounds,
//!     |s: &mut Sprite, bounds| {
//!         s.bounds = bounds;
//!         true
//!     },
//! );
//!
//! let a = Sprite { id: 1, bounds: Aabb2D::new(0.0, 0.0, 10.0, 10.0) };
//! let b = Sprite { id: 2, bounds: Aabb2D::new(20.0, 0.0, 30.0, 10.0) };
//! tree.add(a);
//! tree.add(b);
//!
//! // Query a region overlapping only the first sprite.
//! let hits: Vec<_> = tree.query(Aabb2D::new(5.0, 5.0, 6.0, 6.0)).collect();
//! assert_eq!(hits, [&a]);
//!
//! // Move the first sprite next to the second.
//! assert!(tree.update_boundary(&a, Aabb2D::new(25.0, 0.0, 35.0, 10.0)));
//! assert_eq!(tree.query(Aabb2D::new(26.0, 1.0, 27.0, 2.0)).count(), 2);
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! ## Placement and balance
//!
//! A new item is paired with an existing leaf: descend into the child whose bounds
//! already contain the new box, or, if neither does, into the child that would grow
//! least (by area or volume). When both children contain it, both are searched and
//! the tighter leaf wins, which can cost more than logarithmic time for deeply
//! nested boxes. The chosen leaf is split into an internal node with the old and
//! new leaf as children, and AVL rotations restore balance on the way up.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Boxes are closed:
//! boxes that only touch still intersect.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod bounds;
mod node;
pub mod query;
#[cfg(feature = "kurbo")]
mod rect;
pub mod tree;
pub mod types;
pub mod validate;

pub use bounds::BoundingBox;
pub use query::Query;
pub use tree::Tree;
pub use types::{Aabb2D, Aabb3D, Scalar};
pub use validate::Violation;
