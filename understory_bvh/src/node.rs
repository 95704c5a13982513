// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node arena and the structural primitives of the hierarchy.
//!
//! Nodes live in a slot vector addressed by [`NodeIdx`]; parent and child links are
//! indices, so a rotation can rewrite several nodes without holding overlapping
//! borrows. Freed slots are recycled through a free list.

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use tracing::trace;

use crate::bounds::BoundingBox;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// A leaf owns exactly one value; an internal node has exactly two children.
pub(crate) enum Kind<V> {
    Leaf(V),
    Internal { left: NodeIdx, right: NodeIdx },
}

pub(crate) struct Node<V, B> {
    /// Own box for a leaf, union of the children otherwise.
    pub(crate) bounds: B,
    /// `None` only for the root.
    pub(crate) parent: Option<NodeIdx>,
    /// height(right) - height(left). Always zero for leaves.
    pub(crate) balance: i8,
    pub(crate) kind: Kind<V>,
}

impl<V, B> Node<V, B> {
    fn leaf(value: V, bounds: B) -> Self {
        Self {
            bounds,
            parent: None,
            balance: 0,
            kind: Kind::Leaf(value),
        }
    }
}

pub(crate) struct Nodes<V, B> {
    slots: Vec<Option<Node<V, B>>>,
    free_list: Vec<NodeIdx>,
}

impl<V, B> Default for Nodes<V, B> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<V, B> Index<NodeIdx> for Nodes<V, B> {
    type Output = Node<V, B>;

    fn index(&self, idx: NodeIdx) -> &Self::Output {
        self.slots[idx.get()]
            .as_ref()
            .expect("node index refers to a freed slot")
    }
}

impl<V, B> IndexMut<NodeIdx> for Nodes<V, B> {
    fn index_mut(&mut self, idx: NodeIdx) -> &mut Self::Output {
        self.slots[idx.get()]
            .as_mut()
            .expect("node index refers to a freed slot")
    }
}

impl<V, B> Nodes<V, B> {
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }

    /// Number of slots, live or free.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn alloc(&mut self, node: Node<V, B>) -> NodeIdx {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx.get()] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            NodeIdx::new(self.slots.len() - 1)
        }
    }

    fn release(&mut self, idx: NodeIdx) -> Node<V, B> {
        let node = self.slots[idx.get()]
            .take()
            .expect("node released twice");
        self.free_list.push(idx);
        node
    }

    /// Allocate a detached leaf.
    pub(crate) fn leaf(&mut self, value: V, bounds: B) -> NodeIdx {
        self.alloc(Node::leaf(value, bounds))
    }

    pub(crate) fn is_leaf(&self, idx: NodeIdx) -> bool {
        matches!(self[idx].kind, Kind::Leaf(_))
    }

    /// The value of a leaf, `None` for internal nodes.
    pub(crate) fn value(&self, idx: NodeIdx) -> Option<&V> {
        match &self[idx].kind {
            Kind::Leaf(value) => Some(value),
            Kind::Internal { .. } => None,
        }
    }

    /// Every stored value, in slot order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.slots.iter().flatten().filter_map(|node| match &node.kind {
            Kind::Leaf(value) => Some(value),
            Kind::Internal { .. } => None,
        })
    }

    /// `(left, right)` of an internal node.
    ///
    /// Panics on a leaf: callers only ask for children where the tree shape
    /// guarantees them.
    pub(crate) fn children(&self, idx: NodeIdx) -> (NodeIdx, NodeIdx) {
        match self[idx].kind {
            Kind::Internal { left, right } => (left, right),
            Kind::Leaf(_) => panic!("expected an internal node at {idx:?}, found a leaf"),
        }
    }

    pub(crate) fn is_left_child(&self, parent: NodeIdx, child: NodeIdx) -> bool {
        self.children(parent).0 == child
    }

    /// Walk parent links up to the node without a parent.
    pub(crate) fn top_from(&self, mut idx: NodeIdx) -> NodeIdx {
        while let Some(parent) = self[idx].parent {
            idx = parent;
        }
        idx
    }

    /// Point `parent`'s link at `old` to `new`. Does not touch `new.parent`.
    fn relink_child(&mut self, parent: NodeIdx, old: NodeIdx, new: NodeIdx) {
        match &mut self[parent].kind {
            Kind::Internal { left, .. } if *left == old => *left = new,
            Kind::Internal { right, .. } if *right == old => *right = new,
            Kind::Internal { .. } => panic!("{old:?} is not a child of {parent:?}"),
            Kind::Leaf(_) => panic!("leaf {parent:?} cannot have children"),
        }
    }

    /// Detach a leaf and discard its parent, promoting the sibling into the
    /// parent's slot.
    ///
    /// Returns the stored value and the promoted sibling, or `None` when the leaf
    /// was the root. The caller updates its root if the sibling ends up parentless.
    pub(crate) fn sever_leaf(&mut self, leaf: NodeIdx) -> (V, Option<NodeIdx>) {
        let parent = self[leaf].parent;
        let Kind::Leaf(value) = self.release(leaf).kind else {
            panic!("sever_leaf called on internal node {leaf:?}");
        };
        let Some(parent) = parent else {
            return (value, None);
        };
        let (left, right) = self.children(parent);
        let sibling = if left == leaf { right } else { left };
        let grandparent = self.release(parent).parent;
        self[sibling].parent = grandparent;
        if let Some(g) = grandparent {
            self.relink_child(g, parent, sibling);
        }
        trace!(
            leaf = leaf.get(),
            sibling = sibling.get(),
            "severed leaf"
        );
        (value, Some(sibling))
    }
}

impl<V, B: BoundingBox> Nodes<V, B> {
    /// Recompute an internal node's bounds from its children.
    pub(crate) fn refit(&mut self, idx: NodeIdx) {
        let (left, right) = self.children(idx);
        let bounds = self[left].bounds.union(&self[right].bounds);
        self[idx].bounds = bounds;
    }

    /// Replace `leaf` with a new internal node whose children are `leaf` (left)
    /// and a fresh leaf for `value` (right). Returns the new internal node.
    ///
    /// This is the only place internal nodes are created.
    pub(crate) fn split_leaf(&mut self, leaf: NodeIdx, value: V, bounds: B) -> NodeIdx {
        debug_assert!(self.is_leaf(leaf), "only leaves can be split");
        let parent = self[leaf].parent;
        let joined = self[leaf].bounds.union(&bounds);
        let fresh = self.leaf(value, bounds);
        let split = self.alloc(Node {
            bounds: joined,
            parent,
            balance: 0,
            kind: Kind::Internal {
                left: leaf,
                right: fresh,
            },
        });
        if let Some(p) = parent {
            self.relink_child(p, leaf, split);
        }
        self[leaf].parent = Some(split);
        self[fresh].parent = Some(split);
        trace!(leaf = leaf.get(), node = split.get(), "split leaf");
        split
    }

    /// Promote the right child of `n` into `n`'s slot. Returns the promoted node.
    ///
    /// Balance factors of both nodes are updated for any pre-rotation state, so
    /// the insert path ends with both at zero while the remove path may leave the
    /// promoted node at ±1.
    pub(crate) fn rotate_left(&mut self, n: NodeIdx) -> NodeIdx {
        let (left, pivot) = self.children(n);
        let (inner, outer) = self.children(pivot);
        let parent = self[n].parent;

        self[n].kind = Kind::Internal { left, right: inner };
        self[inner].parent = Some(n);
        self[pivot].kind = Kind::Internal {
            left: n,
            right: outer,
        };
        self[n].parent = Some(pivot);
        self[pivot].parent = parent;
        if let Some(p) = parent {
            self.relink_child(p, n, pivot);
        }

        self.refit(n);
        self.refit(pivot);

        let n_balance = self[n].balance - 1 - self[pivot].balance.max(0);
        let pivot_balance = self[pivot].balance - 1 + n_balance.min(0);
        self[n].balance = n_balance;
        self[pivot].balance = pivot_balance;
        trace!(
            node = n.get(),
            pivot = pivot.get(),
            balance = pivot_balance,
            "rotated left"
        );
        pivot
    }

    /// Promote the left child of `n` into `n`'s slot. Mirror of [`Self::rotate_left`].
    pub(crate) fn rotate_right(&mut self, n: NodeIdx) -> NodeIdx {
        let (pivot, right) = self.children(n);
        let (outer, inner) = self.children(pivot);
        let parent = self[n].parent;

        self[n].kind = Kind::Internal { left: inner, right };
        self[inner].parent = Some(n);
        self[pivot].kind = Kind::Internal {
            left: outer,
            right: n,
        };
        self[n].parent = Some(pivot);
        self[pivot].parent = parent;
        if let Some(p) = parent {
            self.relink_child(p, n, pivot);
        }

        self.refit(n);
        self.refit(pivot);

        let n_balance = self[n].balance + 1 - self[pivot].balance.min(0);
        let pivot_balance = self[pivot].balance + 1 + n_balance.max(0);
        self[n].balance = n_balance;
        self[pivot].balance = pivot_balance;
        trace!(
            node = n.get(),
            pivot = pivot.get(),
            balance = pivot_balance,
            "rotated right"
        );
        pivot
    }

    /// Restore balance at a node whose factor reached ±2, using a single or a
    /// double rotation depending on the heavy child's lean. Returns the node now
    /// occupying `n`'s slot.
    pub(crate) fn rebalance(&mut self, n: NodeIdx) -> NodeIdx {
        let (left, right) = self.children(n);
        match self[n].balance {
            -2 => {
                if self[left].balance > 0 {
                    self.rotate_left(left);
                }
                self.rotate_right(n)
            }
            2 => {
                if self[right].balance < 0 {
                    self.rotate_right(right);
                }
                self.rotate_left(n)
            }
            other => panic!("rebalance at {n:?} with balance factor {other}"),
        }
    }
}
