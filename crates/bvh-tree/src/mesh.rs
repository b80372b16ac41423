//! Mesh and model shapes consumed and reordered by BVH builds.

use nalgebra::{Point3, Vector2, Vector3};

use crate::aabb::Aabb;
use crate::bvh::{Bvh, SplitMethod, TraversalMethod};
use crate::ray::{MeshHit, ModelHit, Ray};

/// A vertex with the standard attribute set.
///
/// Only `position` participates in spatial queries; the other attributes
/// ride along untouched for the caller's renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub tangent: Vector3<f32>,
    pub bitangent: Vector3<f32>,
}

impl Vertex {
    /// Creates a vertex at `position` with zeroed attributes.
    pub fn from_position(position: Point3<f32>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            uv: Vector2::zeros(),
            tangent: Vector3::zeros(),
            bitangent: Vector3::zeros(),
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::from_position(Point3::origin())
    }
}

/// Primitive interpretation of a mesh's index array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    Points,
    Lines,
    #[default]
    Triangles,
}

impl PrimitiveTopology {
    /// The number of indices one primitive occupies.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Points => 1,
            Self::Lines => 2,
            Self::Triangles => 3,
        }
    }
}

/// Indexed geometry with an optional hierarchy over its primitives.
///
/// Building the hierarchy permanently reorders the index array; render
/// output is unaffected since draw order is index-order-invariant.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    topology: PrimitiveTopology,
    bvh: Bvh,
}

impl Mesh {
    /// Creates a mesh from vertex and index data.
    ///
    /// # Panics
    /// Panics in debug builds if the index count is not a multiple of the
    /// topology's vertex count, or if an index is out of range of the
    /// vertex array.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        debug_assert!(
            indices.len() % topology.vertex_count() == 0,
            "index count must be a multiple of the primitive stride"
        );
        debug_assert!(
            indices.iter().all(|&index| (index as usize) < vertices.len()),
            "index out of range of the vertex array"
        );
        Self {
            vertices,
            indices,
            topology,
            bvh: Bvh::new(),
        }
    }

    /// The mesh's vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The mesh's index array, in post-build order once a hierarchy exists.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// How the index array groups into primitives.
    #[inline]
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// The hierarchy over this mesh's primitives, empty until built.
    #[inline]
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// The number of whole primitives in the index array.
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.topology.vertex_count()
    }

    /// The bounding box of the built hierarchy's root, or the empty box if
    /// none has been built.
    pub fn aabb(&self) -> Aabb {
        self.bvh.root().map_or(Aabb::empty(), |node| *node.aabb())
    }

    /// Builds (or rebuilds) the hierarchy over this mesh's primitives,
    /// permanently reordering the index array.
    pub fn build_bvh(&mut self, method: SplitMethod) {
        self.bvh = Bvh::build_primitives(&self.vertices, &mut self.indices, self.topology, method);
    }

    /// Finds the nearest triangle hit along `ray`.
    ///
    /// With [`TraversalMethod::Recursive`] the ray's length comes back
    /// shortened to the hit distance; [`TraversalMethod::FrontToBack`]
    /// leaves it untouched. A mesh without a built hierarchy reports a miss.
    ///
    /// # Panics
    /// Panics in debug builds if the mesh topology is not triangles.
    pub fn intersect(&self, ray: &mut Ray, method: TraversalMethod) -> MeshHit {
        self.intersect_from(ray, method, 0)
    }

    /// Like [`Mesh::intersect`], entering the hierarchy at an explicit node.
    ///
    /// # Panics
    /// Panics if `start` is out of range of a non-empty node array.
    pub fn intersect_from(&self, ray: &mut Ray, method: TraversalMethod, start: u32) -> MeshHit {
        debug_assert!(
            self.topology == PrimitiveTopology::Triangles,
            "ray queries expect triangle meshes"
        );
        self.bvh
            .intersect_primitives(&self.vertices, &self.indices, ray, method, start)
    }
}

/// A collection of meshes with a mesh-level hierarchy over their boxes.
///
/// Each mesh keeps its own triangle-level hierarchy; the model-level tree
/// only decides which meshes a ray needs to visit.
#[derive(Debug, Clone, Default)]
pub struct Model {
    meshes: Vec<Mesh>,
    bvh: Bvh,
}

impl Model {
    /// Creates a model from a set of meshes.
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self {
            meshes,
            bvh: Bvh::new(),
        }
    }

    /// The model's meshes, in post-build order once a hierarchy exists.
    #[inline]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Mutable access to the meshes, for building their own hierarchies
    /// before the model-level build.
    #[inline]
    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    /// The mesh-level hierarchy, empty until built.
    #[inline]
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// Builds (or rebuilds) the mesh-level hierarchy, permanently
    /// reordering the mesh array.
    ///
    /// # Panics
    /// Panics in debug builds if any mesh has no built hierarchy of its own.
    pub fn build_bvh(&mut self, method: SplitMethod) {
        debug_assert!(
            self.meshes.iter().all(|mesh| !mesh.bvh().is_empty()),
            "every mesh needs its own hierarchy before the model-level build"
        );
        self.bvh = Bvh::build_meshes(&mut self.meshes, method);
    }

    /// Finds the nearest triangle hit across all meshes.
    ///
    /// `method` only controls how the mesh-selection tree is walked; each
    /// selected mesh's own primitives are always tested front-to-back.
    /// The reported mesh index refers to the post-build mesh order.
    pub fn intersect(&self, ray: &mut Ray, method: TraversalMethod) -> ModelHit {
        self.intersect_from(ray, method, 0)
    }

    /// Like [`Model::intersect`], entering the hierarchy at an explicit node.
    ///
    /// # Panics
    /// Panics if `start` is out of range of a non-empty node array.
    pub fn intersect_from(&self, ray: &mut Ray, method: TraversalMethod, start: u32) -> ModelHit {
        self.bvh.intersect_meshes(&self.meshes, ray, method, start)
    }
}
