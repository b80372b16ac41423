//! Axis-aligned bounding boxes for BVH nodes and split decisions.

use nalgebra::{Point3, Vector3};

use crate::mesh::{Mesh, PrimitiveTopology, Vertex};

/// An axis-aligned bounding box in 3D space.
///
/// A freshly reset box is *empty*: its minimum corner sits at positive
/// infinity and its maximum at negative infinity, so growing it by any point
/// produces the degenerate box at exactly that point, and growing another
/// box by an empty one changes nothing.
///
/// A non-empty box maintains `min ≤ max` componentwise. Boxes are only ever
/// rebuilt through the grow operations, never patched field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Creates the empty box.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Creates a box from explicit corners.
    ///
    /// # Panics
    /// Panics in debug builds if `min` exceeds `max` on any axis.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "Aabb min corner must not exceed the max corner"
        );
        Self { min, max }
    }

    /// Bounds every vertex referenced by `indices`.
    ///
    /// The index slice must hold whole primitives of the given topology;
    /// a partial primitive is a caller contract violation.
    ///
    /// # Panics
    /// Panics in debug builds if `indices.len()` is not a multiple of the
    /// topology's vertex count.
    pub fn from_indexed(vertices: &[Vertex], indices: &[u32], topology: PrimitiveTopology) -> Self {
        debug_assert!(
            indices.len() % topology.vertex_count() == 0,
            "index count must be a multiple of the primitive stride"
        );
        let mut aabb = Self::empty();
        for &index in indices {
            aabb.grow_point(vertices[index as usize].position);
        }
        aabb
    }

    /// Bounds the root boxes of every mesh in `meshes`.
    ///
    /// Meshes without a built hierarchy contribute nothing.
    pub fn from_meshes(meshes: &[Mesh]) -> Self {
        let mut aabb = Self::empty();
        for mesh in meshes {
            aabb.grow(&mesh.aabb());
        }
        aabb
    }

    /// The minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    /// The maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Expands the box to contain `point`.
    pub fn grow_point(&mut self, point: Point3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Expands the box to contain `other`.
    pub fn grow(&mut self, other: &Aabb) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.min.z = self.min.z.min(other.min.z);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
        self.max.z = self.max.z.max(other.max.z);
    }

    /// The center point of the box.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// The box's size along each axis.
    #[inline]
    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// The axis index (0 = x, 1 = y, 2 = z) with the largest extent.
    ///
    /// Ties resolve toward the higher axis index: y beats x, z beats y.
    pub fn longest_axis(&self) -> usize {
        let extent = self.extent();
        let mut axis = 0;
        if extent.y >= extent.x {
            axis = 1;
        }
        if extent.z >= extent[axis] {
            axis = 2;
        }
        axis
    }

    /// The coordinate halfway along the given axis.
    #[inline]
    pub fn midpoint_along_axis(&self, axis: usize) -> f32 {
        self.min[axis] + 0.5 * (self.max[axis] - self.min[axis])
    }

    /// Half the surface area of the box.
    ///
    /// Split costs only ever compare areas against each other, so the
    /// factor of two is left out.
    pub fn half_area(&self) -> f32 {
        let extent = self.extent();
        extent.x * extent.y + extent.y * extent.z + extent.z * extent.x
    }

    /// Returns `true` if `point` lies inside or on the boundary of the box.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}
