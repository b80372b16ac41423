//! Bounding Volume Hierarchy over triangle meshes and mesh collections.
//!
//! This module provides a BVH implementation that recursively partitions
//! primitives into nested bounding boxes. The hierarchy enables:
//!
//! - Nearest-hit ray queries that skip whole subtrees on a failed box test
//! - A choice of split policies, from cheap midpoint splitting to a full
//!   surface area heuristic
//! - Queries restricted to a subtree, resuming from any node
//!
//! # Example
//!
//! ```ignore
//! use bvh_tree::{Mesh, PrimitiveTopology, Ray, SplitMethod, TraversalMethod};
//! use nalgebra::{Point3, Vector3};
//!
//! // Build a hierarchy over a triangle mesh
//! let mut mesh = Mesh::new(vertices, indices, PrimitiveTopology::Triangles);
//! mesh.build_bvh(SplitMethod::PlaneCandidates);
//!
//! // Pick the nearest triangle under a ray
//! let mut ray = Ray::new(
//!     Point3::new(0.2, 0.2, 5.0),
//!     Vector3::new(0.0, 0.0, -1.0),
//!     10.0,
//! );
//! let hit = mesh.intersect(&mut ray, TraversalMethod::FrontToBack);
//! if hit.is_hit() {
//!     println!("hit triangle {:?} at distance {}", hit.indices, hit.distance);
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Bvh`]: The hierarchy itself, a flat node array rooted at index 0
//! - [`BvhNode`]: One node, either a leaf range over the index array or an
//!   internal node addressing its two adjacent children
//! - [`SplitMethod`]: Strategy for choosing split planes during the build
//! - [`TraversalMethod`]: Order in which ray queries walk the tree

mod build;
mod node;
mod traverse;
mod tree;

// Re-export main types
pub use build::{SplitMethod, CANDIDATE_PLANES};
pub use node::{BvhNode, NodeKind};
pub use traverse::TraversalMethod;
pub use tree::Bvh;
