// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy region queries over the hierarchy.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::bounds::BoundingBox;
use crate::node::{Kind, NodeIdx, Nodes};

/// Depth-first walk yielding the leaves whose bounds intersect a region.
///
/// Subtrees whose bounds miss the region are skipped whole.
pub(crate) struct NodeQuery<'a, V, B> {
    nodes: &'a Nodes<V, B>,
    region: B,
    stack: Vec<NodeIdx>,
}

impl<'a, V, B> NodeQuery<'a, V, B> {
    pub(crate) fn new(nodes: &'a Nodes<V, B>, root: Option<NodeIdx>, region: B) -> Self {
        let stack = match root {
            Some(root) => vec![root],
            None => Vec::new(),
        };
        Self {
            nodes,
            region,
            stack,
        }
    }
}

impl<V, B: BoundingBox> Iterator for NodeQuery<'_, V, B> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<NodeIdx> {
        while let Some(idx) = self.stack.pop() {
            let node = &self.nodes[idx];
            if !node.bounds.intersects(&self.region) {
                continue;
            }
            match node.kind {
                Kind::Leaf(_) => return Some(idx),
                Kind::Internal { left, right } => {
                    // Left is popped first.
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

/// Iterator over the stored values whose bounds intersect a query region.
///
/// Returned by [`Tree::query`](crate::Tree::query). Values are produced lazily while
/// walking the tree, so the query borrows the tree for as long as it is alive;
/// collect the results first when the tree is about to be mutated.
///
/// The order of results follows the tree shape and is not otherwise specified.
pub struct Query<'a, V, B> {
    inner: NodeQuery<'a, V, B>,
}

impl<'a, V, B> Query<'a, V, B> {
    pub(crate) fn new(nodes: &'a Nodes<V, B>, root: Option<NodeIdx>, region: B) -> Self {
        Self {
            inner: NodeQuery::new(nodes, root, region),
        }
    }
}

impl<'a, V, B: BoundingBox> Iterator for Query<'a, V, B> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let nodes = self.inner.nodes;
        let idx = self.inner.next()?;
        nodes.value(idx)
    }
}

impl<V, B: Debug> Debug for Query<'_, V, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Query")
            .field("region", &self.inner.region)
            .field("pending", &self.inner.stack.len())
            .finish_non_exhaustive()
    }
}
