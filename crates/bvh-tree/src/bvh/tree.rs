//! The hierarchy itself: a flat node array plus its build and query
//! entry points.

use crate::mesh::{Mesh, PrimitiveTopology, Vertex};
use crate::ray::{MeshHit, ModelHit, Ray};

use super::build::{self, SplitMethod};
use super::node::{BvhNode, NodeKind};
use super::traverse::{self, TraversalMethod};

/// A bounding volume hierarchy stored as a flat node array.
///
/// The root is node 0 and an internal node's right child always directly
/// follows its left child, so a single child index per node is enough to
/// address both. Building never moves geometry, only reorders the index
/// array (or mesh array) it was given, which leaf ranges then address
/// directly.
///
/// A `Bvh` built over zero primitives holds a single empty leaf; a `Bvh`
/// that was never built holds no nodes at all. Both report misses for
/// every query.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
}

impl Bvh {
    /// Creates an empty hierarchy with no nodes.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Builds a hierarchy over a mesh's primitives, reordering `indices`
    /// in place. Leaf ranges address the reordered index array.
    pub fn build_primitives(
        vertices: &[Vertex],
        indices: &mut [u32],
        topology: PrimitiveTopology,
        method: SplitMethod,
    ) -> Self {
        Self {
            nodes: build::build_primitive_nodes(vertices, indices, topology, method),
        }
    }

    /// Builds a hierarchy over whole meshes, reordering `meshes` in place.
    /// Leaf ranges address the reordered mesh array.
    pub fn build_meshes(meshes: &mut [Mesh], method: SplitMethod) -> Self {
        Self {
            nodes: build::build_mesh_nodes(meshes, method),
        }
    }

    /// Finds the nearest triangle hit along `ray`, starting at `start`
    /// (the root is node 0). `vertices` and `indices` must be the buffers
    /// this hierarchy was built over.
    ///
    /// # Panics
    /// Panics if `start` is out of range of a non-empty node array.
    pub fn intersect_primitives(
        &self,
        vertices: &[Vertex],
        indices: &[u32],
        ray: &mut Ray,
        method: TraversalMethod,
        start: u32,
    ) -> MeshHit {
        traverse::intersect_mesh(&self.nodes, vertices, indices, ray, method, start)
    }

    /// Finds the nearest triangle hit across `meshes`, starting at `start`.
    /// `meshes` must be the array this hierarchy was built over.
    ///
    /// # Panics
    /// Panics if `start` is out of range of a non-empty node array.
    pub fn intersect_meshes(
        &self,
        meshes: &[Mesh],
        ray: &mut Ray,
        method: TraversalMethod,
        start: u32,
    ) -> ModelHit {
        traverse::intersect_model(&self.nodes, meshes, ray, method, start)
    }

    /// Returns `true` if no hierarchy has been built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node, if a hierarchy has been built.
    #[inline]
    pub fn root(&self) -> Option<&BvhNode> {
        self.nodes.first()
    }

    /// The node at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[inline]
    pub fn node(&self, index: u32) -> &BvhNode {
        &self.nodes[index as usize]
    }

    /// All nodes in appending order; the root is first.
    #[inline]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// The number of nodes, at most `2n - 1` for `n` primitives.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of levels in the hierarchy: 0 when unbuilt, 1 for a
    /// lone leaf.
    pub fn depth(&self) -> usize {
        fn node_depth(nodes: &[BvhNode], index: u32) -> usize {
            match nodes[index as usize].kind() {
                NodeKind::Leaf { .. } => 1,
                NodeKind::Internal { left_child } => {
                    1 + node_depth(nodes, left_child).max(node_depth(nodes, left_child + 1))
                }
            }
        }

        if self.nodes.is_empty() {
            0
        } else {
            node_depth(&self.nodes, 0)
        }
    }
}
