// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural self-check for [`Tree`].

use crate::bounds::BoundingBox;
use crate::node::{Kind, NodeIdx, Nodes};
use crate::tree::Tree;

/// A broken tree invariant, as reported by [`Tree::validate`].
///
/// Node numbers are arena slots; they are only meaningful for comparing reports
/// against each other.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// A node's parent link disagrees with the child link pointing at it.
    #[error("node {node} links to parent {found:?} but is a child of {expected:?}")]
    ParentLink {
        /// Offending node.
        node: usize,
        /// Parent implied by the child links.
        expected: Option<usize>,
        /// Parent recorded on the node.
        found: Option<usize>,
    },
    /// The stored balance factor does not match the subtree heights.
    #[error("node {node} stores balance {stored} but its subtree heights differ by {actual}")]
    BalanceMismatch {
        /// Offending node.
        node: usize,
        /// Factor recorded on the node.
        stored: i8,
        /// height(right) - height(left), measured.
        actual: isize,
    },
    /// The subtree heights differ by more than one.
    #[error("node {node} is out of balance ({balance})")]
    Unbalanced {
        /// Offending node.
        node: usize,
        /// height(right) - height(left), measured.
        balance: isize,
    },
    /// An internal node's bounds are not the union of its children's.
    #[error("node {node} bounds differ from the union of its children")]
    StaleBounds {
        /// Offending node.
        node: usize,
    },
    /// The item count disagrees with the number of leaves.
    #[error("tree reports {reported} items but holds {found} leaves")]
    CountMismatch {
        /// Value of [`Tree::len`].
        reported: usize,
        /// Leaves reachable from the root.
        found: usize,
    },
}

impl<V, B, E, U> Tree<V, B, E, U>
where
    B: BoundingBox,
    E: Fn(&V) -> B,
{
    /// Check every structural invariant of the tree.
    ///
    /// Verifies parent/child agreement, that each balance factor matches the
    /// measured subtree heights and stays within `-1..=1`, that internal bounds are
    /// exactly the union of their children, and that [`len`](Self::len) equals the
    /// number of leaves. Runs in linear time; meant for tests and debugging.
    pub fn validate(&self) -> Result<(), Violation> {
        self.measured_height().map(|_| ())
    }

    /// Validate, then return the height measured from the tree shape rather than
    /// read from balance factors.
    pub(crate) fn measured_height(&self) -> Result<usize, Violation> {
        let mut leaves = 0;
        let height = match self.root {
            Some(root) => check_subtree(&self.nodes, root, None, &mut leaves)?,
            None => 0,
        };
        if leaves != self.len {
            return Err(Violation::CountMismatch {
                reported: self.len,
                found: leaves,
            });
        }
        Ok(height)
    }
}

/// Returns the height of the subtree at `idx`.
fn check_subtree<V, B: BoundingBox>(
    nodes: &Nodes<V, B>,
    idx: NodeIdx,
    parent: Option<NodeIdx>,
    leaves: &mut usize,
) -> Result<usize, Violation> {
    let node = &nodes[idx];
    if node.parent != parent {
        return Err(Violation::ParentLink {
            node: idx.get(),
            expected: parent.map(NodeIdx::get),
            found: node.parent.map(NodeIdx::get),
        });
    }
    let (left, right) = match node.kind {
        Kind::Leaf(_) => {
            *leaves += 1;
            return Ok(0);
        }
        Kind::Internal { left, right } => (left, right),
    };
    let left_height = check_subtree(nodes, left, Some(idx), leaves)?;
    let right_height = check_subtree(nodes, right, Some(idx), leaves)?;

    let actual = right_height as isize - left_height as isize;
    if actual != isize::from(node.balance) {
        return Err(Violation::BalanceMismatch {
            node: idx.get(),
            stored: node.balance,
            actual,
        });
    }
    if actual.abs() > 1 {
        return Err(Violation::Unbalanced {
            node: idx.get(),
            balance: actual,
        });
    }

    let union = nodes[left].bounds.union(&nodes[right].bounds);
    if !(union.contains(&node.bounds) && node.bounds.contains(&union)) {
        return Err(Violation::StaleBounds { node: idx.get() });
    }
    Ok(1 + left_height.max(right_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Aabb2D;
    use alloc::string::ToString;

    #[test]
    fn corrupted_trees_are_reported() {
        let mut tree = Tree::new(|b: &Aabb2D<i64>| *b, |b: &mut Aabb2D<i64>, n| {
            *b = n;
            true
        });
        for i in 0..4 {
            tree.add(Aabb2D::new(i * 10, 0, i * 10 + 5, 5));
        }
        assert_eq!(tree.validate(), Ok(()));

        tree.len += 1;
        assert_eq!(
            tree.validate(),
            Err(Violation::CountMismatch {
                reported: 5,
                found: 4
            })
        );
        tree.len -= 1;

        let root = tree.root.expect("populated tree has a root");
        tree.nodes[root].bounds = Aabb2D::new(0, 0, 1, 1);
        assert_eq!(
            tree.validate(),
            Err(Violation::StaleBounds { node: root.get() })
        );
        tree.nodes.refit(root);

        tree.nodes[root].balance += 1;
        let err = tree.validate().expect_err("balance was tampered with");
        assert!(matches!(err, Violation::BalanceMismatch { .. }));
        assert!(err.to_string().contains("stores balance"));
    }
}
