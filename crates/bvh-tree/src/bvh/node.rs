//! Flat BVH node storage.

use crate::aabb::Aabb;

/// Discriminates leaf nodes from internal nodes.
///
/// An internal node stores only its left child's index; the right child
/// always occupies the next slot, so one index identifies both. A leaf
/// spans a contiguous range of the caller's index array (mesh mode) or
/// mesh array (model mode), and a zero-length leaf is legitimate: it is
/// what a build over no primitives produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Terminal node spanning `[first, first + count)`.
    Leaf { first: u32, count: u32 },
    /// Non-terminal node with children at `left_child` and `left_child + 1`.
    Internal { left_child: u32 },
}

/// A node of the flat BVH array.
///
/// Nodes are appended only during build; a leaf is rewritten into an
/// internal node exactly once, at the moment it is split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhNode {
    kind: NodeKind,
    aabb: Aabb,
}

impl BvhNode {
    /// Creates a leaf spanning `[first, first + count)`.
    pub(crate) fn leaf(first: u32, count: u32, aabb: Aabb) -> Self {
        Self {
            kind: NodeKind::Leaf { first, count },
            aabb,
        }
    }

    /// Rewrites this leaf into an internal node with children at
    /// `left_child` and `left_child + 1`.
    pub(crate) fn make_internal(&mut self, left_child: u32) {
        debug_assert!(self.is_leaf(), "only a leaf can be split");
        self.kind = NodeKind::Internal { left_child };
    }

    /// The node's discriminant and payload.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// The node's bounding box.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The left child's index.
    ///
    /// # Panics
    /// Panics if this node is a leaf.
    #[inline]
    pub fn left_child(&self) -> u32 {
        match self.kind {
            NodeKind::Internal { left_child } => left_child,
            NodeKind::Leaf { .. } => panic!("leaf nodes have no children"),
        }
    }

    /// The right child's index, always the slot after the left child.
    ///
    /// # Panics
    /// Panics if this node is a leaf.
    #[inline]
    pub fn right_child(&self) -> u32 {
        self.left_child() + 1
    }
}
