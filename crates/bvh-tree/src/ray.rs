//! Rays and ray-geometry intersection tests.

use nalgebra::{Point3, Vector2, Vector3};

use crate::aabb::Aabb;

/// Determinant threshold below which a ray counts as parallel to a
/// triangle's plane and the triangle test reports a miss.
pub const RAY_EPSILON: f32 = 1e-8;

/// A ray with a limited reach.
///
/// `length` caps how far along the ray intersections are accepted. During a
/// recursive traversal it is additionally shortened to the nearest hit found
/// so far, pruning every later test in the same query; a ray is an
/// accumulator for the duration of one traversal, not a pure value.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Point3<f32>,
    /// Unit direction. [`Ray::new`] normalizes its input.
    pub direction: Vector3<f32>,
    /// Maximum distance along the ray at which hits are accepted.
    pub length: f32,
}

impl Ray {
    /// Creates a ray from an origin, a direction, and a maximum reach.
    /// The direction is normalized automatically.
    ///
    /// # Panics
    /// Panics if the direction has zero length.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>, length: f32) -> Self {
        let norm = direction.norm();
        assert!(norm > f32::EPSILON, "Ray direction cannot be zero");
        Self {
            origin,
            direction: direction / norm,
            length,
        }
    }

    /// The point `distance` units along the ray.
    #[inline]
    pub fn point_at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }

    /// Slab-tests the ray against a box, reporting the entry distance.
    ///
    /// The per-axis intervals are clipped to `[0, self.length]`, so a box
    /// behind the origin or beyond the ray's reach is a miss, and a ray
    /// parallel to a slab it lies outside of is a miss. An origin inside
    /// the box reports entry distance 0. The empty box misses every ray.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> HitInfo {
        let min = aabb.min();
        let max = aabb.max();
        // An inverted box contains nothing; its slabs would otherwise
        // degenerate into always-hit intervals.
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return HitInfo::miss();
        }

        let mut t_near = 0.0_f32;
        let mut t_far = self.length;

        for axis in 0..3 {
            let inverse = 1.0 / self.direction[axis];
            let t0 = (min[axis] - self.origin[axis]) * inverse;
            let t1 = (max[axis] - self.origin[axis]) * inverse;
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
        }

        if t_near <= t_far {
            HitInfo { distance: t_near }
        } else {
            HitInfo::miss()
        }
    }

    /// Möller–Trumbore test of the ray against a triangle.
    ///
    /// Both faces are tested. A near-parallel triangle (determinant below
    /// [`RAY_EPSILON`]), a hit behind the origin, or a hit farther than
    /// `self.length` all report a miss. On a hit the barycentric (u, v) of
    /// the intersection point is reported, with w implied as `1 - u - v`.
    pub fn intersect_triangle(
        &self,
        v0: Point3<f32>,
        v1: Point3<f32>,
        v2: Point3<f32>,
    ) -> TriangleHit {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let p = self.direction.cross(&edge2);
        let determinant = edge1.dot(&p);
        if determinant.abs() < RAY_EPSILON {
            return TriangleHit::miss();
        }
        let inverse_determinant = 1.0 / determinant;

        let s = self.origin - v0;
        let u = s.dot(&p) * inverse_determinant;
        if u < 0.0 || u > 1.0 {
            return TriangleHit::miss();
        }

        let q = s.cross(&edge1);
        let v = self.direction.dot(&q) * inverse_determinant;
        if v < 0.0 || u + v > 1.0 {
            return TriangleHit::miss();
        }

        let distance = edge2.dot(&q) * inverse_determinant;
        if distance < 0.0 || distance > self.length {
            return TriangleHit::miss();
        }

        TriangleHit {
            distance,
            uv: Vector2::new(u, v),
        }
    }
}

/// Result of a ray-box test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Entry distance along the ray, `f32::INFINITY` on a miss.
    pub distance: f32,
}

impl HitInfo {
    /// The no-hit value.
    pub fn miss() -> Self {
        Self {
            distance: f32::INFINITY,
        }
    }

    /// Returns `true` if this records an actual hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance < f32::INFINITY
    }
}

impl Default for HitInfo {
    fn default() -> Self {
        Self::miss()
    }
}

/// Result of a ray-triangle test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Hit distance along the ray, `f32::INFINITY` on a miss.
    pub distance: f32,
    /// Barycentric (u, v) of the hit point; w is implied as `1 - u - v`.
    pub uv: Vector2<f32>,
}

impl TriangleHit {
    /// The no-hit value.
    pub fn miss() -> Self {
        Self {
            distance: f32::INFINITY,
            uv: Vector2::zeros(),
        }
    }

    /// Returns `true` if this records an actual hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance < f32::INFINITY
    }
}

impl Default for TriangleHit {
    fn default() -> Self {
        Self::miss()
    }
}

/// Result of a ray query against a triangle mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Hit distance along the ray, `f32::INFINITY` on a miss.
    pub distance: f32,
    /// Barycentric (u, v) of the hit point on the hit triangle.
    pub uv: Vector2<f32>,
    /// The three vertex indices of the hit triangle.
    pub indices: [u32; 3],
}

impl MeshHit {
    /// The no-hit value.
    pub fn miss() -> Self {
        Self {
            distance: f32::INFINITY,
            uv: Vector2::zeros(),
            indices: [0; 3],
        }
    }

    /// Returns `true` if this records an actual hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance < f32::INFINITY
    }
}

impl Default for MeshHit {
    fn default() -> Self {
        Self::miss()
    }
}

/// Result of a ray query against a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelHit {
    /// Hit distance along the ray, `f32::INFINITY` on a miss.
    pub distance: f32,
    /// Barycentric (u, v) of the hit point on the hit triangle.
    pub uv: Vector2<f32>,
    /// The three vertex indices of the hit triangle within the hit mesh.
    pub indices: [u32; 3],
    /// Index of the hit mesh in the model's (post-build) mesh array.
    pub mesh_index: u32,
}

impl ModelHit {
    /// The no-hit value.
    pub fn miss() -> Self {
        Self {
            distance: f32::INFINITY,
            uv: Vector2::zeros(),
            indices: [0; 3],
            mesh_index: 0,
        }
    }

    /// Returns `true` if this records an actual hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance < f32::INFINITY
    }
}

impl Default for ModelHit {
    fn default() -> Self {
        Self::miss()
    }
}
