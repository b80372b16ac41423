//! BVH (Bounding Volume Hierarchy) construction and nearest-hit ray
//! queries over triangle meshes and mesh collections.

mod aabb;
mod bvh;
mod mesh;
mod ray;

pub use aabb::Aabb;
pub use bvh::{Bvh, BvhNode, NodeKind, SplitMethod, TraversalMethod, CANDIDATE_PLANES};
pub use mesh::{Mesh, Model, PrimitiveTopology, Vertex};
pub use ray::{HitInfo, MeshHit, ModelHit, Ray, TriangleHit, RAY_EPSILON};
