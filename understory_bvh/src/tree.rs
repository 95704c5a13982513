// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public [`Tree`]: insertion, removal, bound updates, and queries.

use core::fmt::Debug;

use tracing::debug;

use crate::bounds::BoundingBox;
use crate::node::{Kind, NodeIdx, Nodes};
use crate::query::{NodeQuery, Query};

/// A dynamic bounding volume hierarchy balanced as an AVL tree.
///
/// Every stored value sits in its own leaf; every internal node has exactly two
/// children and the union of their bounds. Insertion pairs the new value with the
/// leaf whose bounds it grows the least, then restores AVL balance with at most one
/// (single or double) rotation.
///
/// The tree does not read bounds from values on its own: it calls `extractor` when a
/// value is added or looked up, and `updater` to write a new box into a value during
/// [`update_boundary`](Self::update_boundary). The box seen at insertion time is the
/// one indexed; if a value's box changes without going through `update_boundary`,
/// [`contains`](Self::contains) and [`remove`](Self::remove) can no longer find it and
/// [`contains_queryless`](Self::contains_queryless) is the way to detect that.
///
/// Values equal under `PartialEq` may be added several times; each is an independent
/// leaf and removal takes one at a time.
///
/// A value whose box is empty is stored and counted, but an empty box intersects
/// nothing, so queries, [`iter`](Self::iter), [`remove`](Self::remove), and
/// [`update_boundary`](Self::update_boundary) never reach it. Only
/// [`contains_queryless`](Self::contains_queryless) sees it and only
/// [`clear`](Self::clear) drops it.
pub struct Tree<V, B, E, U> {
    pub(crate) nodes: Nodes<V, B>,
    pub(crate) root: Option<NodeIdx>,
    pub(crate) len: usize,
    extractor: E,
    updater: U,
}

impl<V, B, E, U> Tree<V, B, E, U>
where
    B: BoundingBox,
    E: Fn(&V) -> B,
    U: FnMut(&mut V, B) -> bool,
{
    /// Create an empty tree from the two value callbacks.
    ///
    /// `extractor` reads a value's current box. `updater` writes a new box into a
    /// value and reports whether it accepted it; it is only called by
    /// [`update_boundary`](Self::update_boundary).
    pub fn new(extractor: E, updater: U) -> Self {
        Self {
            nodes: Nodes::default(),
            root: None,
            len: 0,
            extractor,
            updater,
        }
    }
}

impl<V, B, E, U> Tree<V, B, E, U>
where
    B: BoundingBox,
    E: Fn(&V) -> B,
{
    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bounds of everything in the tree, or the empty box for an empty tree.
    pub fn tree_boundary(&self) -> B {
        match self.root {
            Some(root) => self.nodes[root].bounds.clone(),
            None => B::empty(),
        }
    }

    /// Number of edges on the longest root-to-leaf path; zero for zero or one value.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.nodes[idx];
            match node.kind {
                Kind::Leaf(_) => break,
                Kind::Internal { left, right } => {
                    height += 1;
                    cur = Some(if node.balance > 0 { right } else { left });
                }
            }
        }
        height
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing tree");
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Insert a value, indexed under `extractor(&value)`.
    pub fn add(&mut self, value: V) {
        let bounds = (self.extractor)(&value);
        self.len += 1;
        let Some(root) = self.root else {
            self.root = Some(self.nodes.leaf(value, bounds));
            return;
        };
        let target = self.pick_best_leaf(root, &bounds);
        let split = self.nodes.split_leaf(target, value, bounds);
        let settled = self.retrace_insert(split);
        self.refit_ancestors(settled);
        self.root = Some(self.nodes.top_from(settled));
    }

    /// Values whose bounds intersect `region`.
    pub fn query(&self, region: B) -> Query<'_, V, B> {
        Query::new(&self.nodes, self.root, region)
    }

    /// Values whose bounds intersect the box `extractor` reports for `value`.
    pub fn query_item(&self, value: &V) -> Query<'_, V, B> {
        self.query((self.extractor)(value))
    }

    /// Every stored value, found by querying the tree-wide boundary.
    ///
    /// Values indexed under an empty box intersect nothing and are not reported.
    pub fn iter(&self) -> Query<'_, V, B> {
        self.query(self.tree_boundary())
    }

    fn query_nodes(&self, region: B) -> NodeQuery<'_, V, B> {
        NodeQuery::new(&self.nodes, self.root, region)
    }

    /// Choose the leaf a new box should be paired with.
    ///
    /// Descends into the only child containing `bounds`; if neither contains it,
    /// into the child whose union with `bounds` has the smaller box space. When both
    /// children contain it, both subtrees are searched and the candidate leaf whose
    /// own union with `bounds` is smaller wins. Ties go left.
    ///
    /// The both-contain branch visits both subtrees, so deeply nested containment
    /// can make placement cost grow beyond logarithmic.
    fn pick_best_leaf(&self, idx: NodeIdx, bounds: &B) -> NodeIdx {
        let Kind::Internal { left, right } = self.nodes[idx].kind else {
            return idx;
        };
        let left_bounds = &self.nodes[left].bounds;
        let right_bounds = &self.nodes[right].bounds;
        match (left_bounds.contains(bounds), right_bounds.contains(bounds)) {
            (true, false) => self.pick_best_leaf(left, bounds),
            (false, true) => self.pick_best_leaf(right, bounds),
            (false, false) => {
                let grow_left = bounds.union(left_bounds).box_space();
                let grow_right = bounds.union(right_bounds).box_space();
                if grow_left <= grow_right {
                    self.pick_best_leaf(left, bounds)
                } else {
                    self.pick_best_leaf(right, bounds)
                }
            }
            (true, true) => {
                let left_leaf = self.pick_best_leaf(left, bounds);
                let right_leaf = self.pick_best_leaf(right, bounds);
                let grow_left = bounds.union(&self.nodes[left_leaf].bounds).box_space();
                let grow_right = bounds.union(&self.nodes[right_leaf].bounds).box_space();
                if grow_left <= grow_right {
                    left_leaf
                } else {
                    right_leaf
                }
            }
        }
    }

    /// Walk up from a subtree that just grew one level taller.
    ///
    /// Returns the highest node whose bounds are known to be current.
    fn retrace_insert(&mut self, mut child: NodeIdx) -> NodeIdx {
        while let Some(n) = self.nodes[child].parent {
            self.nodes.refit(n);
            let grew_left = self.nodes.is_left_child(n, child);
            let node = &mut self.nodes[n];
            node.balance += if grew_left { -1 } else { 1 };
            let balance = node.balance;
            match balance {
                // Height unchanged from here up.
                0 => return n,
                -1 | 1 => child = n,
                // One rotation restores the pre-insert height.
                _ => return self.nodes.rebalance(n),
            }
        }
        child
    }

    /// Walk up from a subtree that just became one level shorter.
    ///
    /// Returns the highest node whose bounds are known to be current.
    fn retrace_remove(&mut self, mut child: NodeIdx) -> NodeIdx {
        while let Some(n) = self.nodes[child].parent {
            self.nodes.refit(n);
            let shrank_left = self.nodes.is_left_child(n, child);
            let node = &mut self.nodes[n];
            node.balance += if shrank_left { 1 } else { -1 };
            let balance = node.balance;
            match balance {
                // Was balanced: the other side still holds the height.
                -1 | 1 => return n,
                0 => child = n,
                _ => {
                    let top = self.nodes.rebalance(n);
                    // A leaning result means the rotation kept the old height.
                    if self.nodes[top].balance != 0 {
                        return top;
                    }
                    child = top;
                }
            }
        }
        child
    }

    /// Recompute bounds on every strict ancestor of `idx`.
    fn refit_ancestors(&mut self, idx: NodeIdx) {
        let mut cur = self.nodes[idx].parent;
        while let Some(n) = cur {
            self.nodes.refit(n);
            cur = self.nodes[n].parent;
        }
    }
}

impl<V, B, E, U> Tree<V, B, E, U>
where
    V: PartialEq,
    B: BoundingBox,
    E: Fn(&V) -> B,
{
    /// Remove one stored value equal to `value` and hand it back.
    ///
    /// The lookup uses `extractor(value)`, so it fails if the value's box changed
    /// since it was indexed, and always fails for a value with an empty box.
    pub fn take(&mut self, value: &V) -> Option<V> {
        if self.is_empty() {
            return None;
        }
        let bounds = (self.extractor)(value);
        let leaf = self
            .query_nodes(bounds)
            .find(|&idx| self.nodes.value(idx) == Some(value))?;

        let (stored, promoted) = self.nodes.sever_leaf(leaf);
        self.len -= 1;
        match promoted {
            None => self.root = None,
            Some(sibling) => {
                let settled = self.retrace_remove(sibling);
                self.refit_ancestors(settled);
                self.root = Some(self.nodes.top_from(settled));
            }
        }
        Some(stored)
    }

    /// Remove one stored value equal to `value`. Returns `false` if none was found.
    pub fn remove(&mut self, value: &V) -> bool {
        self.take(value).is_some()
    }

    /// Whether a value equal to `value` is stored under its current box.
    pub fn contains(&self, value: &V) -> bool {
        self.query_item(value).any(|stored| stored == value)
    }

    /// Whether a value equal to `value` is stored anywhere, scanning every leaf.
    ///
    /// Linear in the number of nodes. Use it to recover when a value's box was
    /// changed without [`update_boundary`](Self::update_boundary).
    pub fn contains_queryless(&self, value: &V) -> bool {
        self.nodes.values().any(|stored| stored == value)
    }
}

impl<V, B, E, U> Tree<V, B, E, U>
where
    V: PartialEq,
    B: BoundingBox,
    E: Fn(&V) -> B,
    U: FnMut(&mut V, B) -> bool,
{
    /// Move a stored value to a new box.
    ///
    /// Takes the value out (returning `false` right away if it is not stored),
    /// passes it to `updater` with `bounds`, and adds it back whatever the updater
    /// returned, so the value is never lost. Returns the updater's result.
    pub fn update_boundary(&mut self, value: &V, bounds: B) -> bool {
        let Some(mut stored) = self.take(value) else {
            return false;
        };
        let accepted = (self.updater)(&mut stored, bounds);
        self.add(stored);
        accepted
    }
}

impl<V, B, E, U> Extend<V> for Tree<V, B, E, U>
where
    B: BoundingBox,
    E: Fn(&V) -> B,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<V, B: Debug, E, U> Debug for Tree<V, B, E, U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let boundary = self.root.map(|root| &self.nodes[root].bounds);
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("slots", &self.nodes.slot_count())
            .field("boundary", &boundary)
            .finish_non_exhaustive()
    }
}
