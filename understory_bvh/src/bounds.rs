// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bounding box contract the tree is built on.

use core::fmt::Debug;

/// A closed, axis-aligned region that the [`Tree`](crate::Tree) can index.
///
/// Implementations are plain values with no identity. The tree only ever combines
/// and compares them through this trait, so 2D rectangles, 3D boxes, or any other
/// bound with the same algebra plug into the same code.
///
/// Implementations must uphold:
///
/// - `a.union(b)` contains both `a` and `b`; `union` is associative and commutative.
/// - `a.intersects(b) == b.intersects(a)`.
/// - `a.contains(b)` implies `a.union(b) == a` (up to floating point tolerance).
/// - [`empty`](Self::empty) has zero [`box_space`](Self::box_space), reports
///   [`is_empty`](Self::is_empty), is the identity of `union`, is contained by every
///   box, and intersects nothing.
/// - `box_space` is monotone non-decreasing under `union`.
/// - Intersection of non-overlapping boxes is `empty()`.
///
/// Boxes are closed: boxes sharing only an edge intersect, and a degenerate box
/// (zero width or height) is not empty.
pub trait BoundingBox: Clone + Debug {
    /// Scalar measure of extent: area in 2D, volume in 3D.
    type Space: Copy + PartialOrd + Debug;

    /// The canonical empty box.
    fn empty() -> Self;

    /// Smallest box containing both `self` and `other`.
    fn union(&self, other: &Self) -> Self;

    /// The overlapping region, or [`empty`](Self::empty) if there is none.
    fn intersection(&self, other: &Self) -> Self;

    /// Whether the two boxes share at least one point.
    fn intersects(&self, other: &Self) -> bool;

    /// Whether `other` lies entirely within `self`.
    fn contains(&self, other: &Self) -> bool;

    /// Area or volume of the box; zero for empty boxes.
    fn box_space(&self) -> Self::Space;

    /// Whether the box covers no points at all.
    fn is_empty(&self) -> bool;
}
