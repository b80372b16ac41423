//! Ray traversal of built hierarchies.

use std::mem;

use crate::mesh::{Mesh, Vertex};
use crate::ray::{MeshHit, ModelHit, Ray};

use super::node::{BvhNode, NodeKind};

/// Traversal order used by ray queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMethod {
    /// Depth-first recursion over both children, keeping the closer hit.
    /// The ray is shortened to each node's best hit on the way back up, so
    /// subtrees visited later prune against everything found before them.
    Recursive,
    /// Explicit-stack walk that descends into the child whose box the ray
    /// enters first and defers the farther child. The ray is never
    /// mutated.
    #[default]
    FrontToBack,
}

/// Runs a mesh-level query from `start`, dispatching on the traversal
/// order. An empty hierarchy reports a miss.
pub(crate) fn intersect_mesh(
    nodes: &[BvhNode],
    vertices: &[Vertex],
    indices: &[u32],
    ray: &mut Ray,
    method: TraversalMethod,
    start: u32,
) -> MeshHit {
    if nodes.is_empty() {
        return MeshHit::miss();
    }
    assert!(
        (start as usize) < nodes.len(),
        "start node index out of range"
    );
    match method {
        TraversalMethod::Recursive => mesh_recursive(nodes, vertices, indices, ray, start),
        TraversalMethod::FrontToBack => mesh_front_to_back(nodes, vertices, indices, ray, start),
    }
}

/// Runs a model-level query from `start`. Whichever order walks the
/// mesh-selection tree, leaf meshes are always tested through their own
/// front-to-back traversal.
pub(crate) fn intersect_model(
    nodes: &[BvhNode],
    meshes: &[Mesh],
    ray: &mut Ray,
    method: TraversalMethod,
    start: u32,
) -> ModelHit {
    if nodes.is_empty() {
        return ModelHit::miss();
    }
    assert!(
        (start as usize) < nodes.len(),
        "start node index out of range"
    );
    match method {
        TraversalMethod::Recursive => model_recursive(nodes, meshes, ray, start),
        TraversalMethod::FrontToBack => model_front_to_back(nodes, meshes, ray, start),
    }
}

fn mesh_recursive(
    nodes: &[BvhNode],
    vertices: &[Vertex],
    indices: &[u32],
    ray: &mut Ray,
    node_index: u32,
) -> MeshHit {
    let node = &nodes[node_index as usize];
    if !ray.intersect_aabb(node.aabb()).is_hit() {
        return MeshHit::miss();
    }

    let mut best = MeshHit::miss();
    match node.kind() {
        NodeKind::Leaf { first, count } => {
            for i in (first..first + count).step_by(3) {
                let hit = test_triangle(vertices, indices, ray, i as usize);
                if hit.distance < best.distance {
                    best = hit;
                }
            }
        }
        NodeKind::Internal { left_child } => {
            let left = mesh_recursive(nodes, vertices, indices, ray, left_child);
            if left.distance < best.distance {
                best = left;
            }
            let right = mesh_recursive(nodes, vertices, indices, ray, left_child + 1);
            if right.distance < best.distance {
                best = right;
            }
        }
    }

    if best.is_hit() {
        ray.length = best.distance;
    }
    best
}

fn mesh_front_to_back(
    nodes: &[BvhNode],
    vertices: &[Vertex],
    indices: &[u32],
    ray: &Ray,
    start: u32,
) -> MeshHit {
    let mut node = &nodes[start as usize];
    if !ray.intersect_aabb(node.aabb()).is_hit() {
        return MeshHit::miss();
    }

    let mut best = MeshHit::miss();
    let mut pending = Vec::new();
    loop {
        match node.kind() {
            NodeKind::Leaf { first, count } => {
                for i in (first..first + count).step_by(3) {
                    let hit = test_triangle(vertices, indices, ray, i as usize);
                    if hit.distance < best.distance {
                        best = hit;
                    }
                }
                match pending.pop() {
                    Some(next) => node = next,
                    None => break,
                }
            }
            NodeKind::Internal { left_child } => {
                let mut near = &nodes[left_child as usize];
                let mut far = &nodes[left_child as usize + 1];
                let mut near_entry = ray.intersect_aabb(near.aabb());
                let mut far_entry = ray.intersect_aabb(far.aabb());
                if far_entry.distance < near_entry.distance {
                    mem::swap(&mut near, &mut far);
                    mem::swap(&mut near_entry, &mut far_entry);
                }

                if near_entry.is_hit() {
                    if far_entry.is_hit() {
                        pending.push(far);
                    }
                    node = near;
                } else {
                    match pending.pop() {
                        Some(next) => node = next,
                        None => break,
                    }
                }
            }
        }
    }
    best
}

fn model_recursive(
    nodes: &[BvhNode],
    meshes: &[Mesh],
    ray: &mut Ray,
    node_index: u32,
) -> ModelHit {
    let node = &nodes[node_index as usize];
    if !ray.intersect_aabb(node.aabb()).is_hit() {
        return ModelHit::miss();
    }

    let mut best = ModelHit::miss();
    match node.kind() {
        NodeKind::Leaf { first, count } => {
            for mesh_index in first..first + count {
                let hit = test_mesh(meshes, ray, mesh_index);
                if hit.distance < best.distance {
                    best = hit;
                }
            }
        }
        NodeKind::Internal { left_child } => {
            let left = model_recursive(nodes, meshes, ray, left_child);
            if left.distance < best.distance {
                best = left;
            }
            let right = model_recursive(nodes, meshes, ray, left_child + 1);
            if right.distance < best.distance {
                best = right;
            }
        }
    }

    if best.is_hit() {
        ray.length = best.distance;
    }
    best
}

fn model_front_to_back(nodes: &[BvhNode], meshes: &[Mesh], ray: &Ray, start: u32) -> ModelHit {
    let mut node = &nodes[start as usize];
    if !ray.intersect_aabb(node.aabb()).is_hit() {
        return ModelHit::miss();
    }

    let mut best = ModelHit::miss();
    let mut pending = Vec::new();
    loop {
        match node.kind() {
            NodeKind::Leaf { first, count } => {
                for mesh_index in first..first + count {
                    let hit = test_mesh(meshes, ray, mesh_index);
                    if hit.distance < best.distance {
                        best = hit;
                    }
                }
                match pending.pop() {
                    Some(next) => node = next,
                    None => break,
                }
            }
            NodeKind::Internal { left_child } => {
                let mut near = &nodes[left_child as usize];
                let mut far = &nodes[left_child as usize + 1];
                let mut near_entry = ray.intersect_aabb(near.aabb());
                let mut far_entry = ray.intersect_aabb(far.aabb());
                if far_entry.distance < near_entry.distance {
                    mem::swap(&mut near, &mut far);
                    mem::swap(&mut near_entry, &mut far_entry);
                }

                if near_entry.is_hit() {
                    if far_entry.is_hit() {
                        pending.push(far);
                    }
                    node = near;
                } else {
                    match pending.pop() {
                        Some(next) => node = next,
                        None => break,
                    }
                }
            }
        }
    }
    best
}

/// Tests one triangle of a leaf range, widening the hit with the vertex
/// indices it was built from.
fn test_triangle(vertices: &[Vertex], indices: &[u32], ray: &Ray, first: usize) -> MeshHit {
    let i0 = indices[first];
    let i1 = indices[first + 1];
    let i2 = indices[first + 2];
    let hit = ray.intersect_triangle(
        vertices[i0 as usize].position,
        vertices[i1 as usize].position,
        vertices[i2 as usize].position,
    );
    if !hit.is_hit() {
        return MeshHit::miss();
    }
    MeshHit {
        distance: hit.distance,
        uv: hit.uv,
        indices: [i0, i1, i2],
    }
}

/// Tests one mesh of a model leaf through its own hierarchy. A mesh whose
/// hierarchy was never built reports a miss.
fn test_mesh(meshes: &[Mesh], ray: &Ray, mesh_index: u32) -> ModelHit {
    let mesh = &meshes[mesh_index as usize];
    let nodes = mesh.bvh().nodes();
    if nodes.is_empty() {
        return ModelHit::miss();
    }

    let hit = mesh_front_to_back(nodes, mesh.vertices(), mesh.indices(), ray, 0);
    if !hit.is_hit() {
        return ModelHit::miss();
    }
    ModelHit {
        distance: hit.distance,
        uv: hit.uv,
        indices: hit.indices,
        mesh_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bvh::SplitMethod;
    use crate::mesh::{Model, PrimitiveTopology};
    use nalgebra::{Point3, Vector3};

    /// A row of disjoint coplanar triangles in the z = 0 plane. Triangle
    /// `i` spans x in `[i * spacing, i * spacing + 0.8]`.
    fn make_strip(n: usize, spacing: f32) -> Mesh {
        let mut vertices = Vec::with_capacity(n * 3);
        let mut indices = Vec::with_capacity(n * 3);
        for i in 0..n {
            let x = i as f32 * spacing;
            vertices.push(Vertex::from_position(Point3::new(x, 0.0, 0.0)));
            vertices.push(Vertex::from_position(Point3::new(x + 0.8, 0.0, 0.0)));
            vertices.push(Vertex::from_position(Point3::new(x, 0.8, 0.0)));
            let base = (i * 3) as u32;
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        }
        Mesh::new(vertices, indices, PrimitiveTopology::Triangles)
    }

    /// A ray dropping straight down the z axis through `(x, 0.2)`.
    fn make_pick_ray(x: f32, length: f32) -> Ray {
        Ray::new(
            Point3::new(x, 0.2, 5.0),
            Vector3::new(0.0, 0.0, -1.0),
            length,
        )
    }

    fn make_offset_mesh(z: f32) -> Mesh {
        let vertices = vec![
            Vertex::from_position(Point3::new(0.0, 0.0, z)),
            Vertex::from_position(Point3::new(0.8, 0.0, z)),
            Vertex::from_position(Point3::new(0.0, 0.8, z)),
        ];
        Mesh::new(vertices, vec![0, 1, 2], PrimitiveTopology::Triangles)
    }

    #[test]
    fn traversal_methods_agree_for_every_split_method() {
        let split_methods = [
            SplitMethod::Midpoint,
            SplitMethod::PlaneCandidates,
            SplitMethod::SurfaceAreaHeuristic,
        ];
        for &split in &split_methods {
            let mut mesh = make_strip(20, 1.0);
            mesh.build_bvh(split);

            for &x in &[0.2, 7.2, 13.2, 19.2, 7.75, -5.0] {
                let mut recursive_ray = make_pick_ray(x, 10.0);
                let recursive = mesh.intersect(&mut recursive_ray, TraversalMethod::Recursive);
                let mut ordered_ray = make_pick_ray(x, 10.0);
                let ordered = mesh.intersect(&mut ordered_ray, TraversalMethod::FrontToBack);

                assert_eq!(recursive, ordered, "{:?} at x = {}", split, x);
            }
        }
    }

    #[test]
    fn hits_identify_the_triangle() {
        let mut mesh = make_strip(20, 1.0);
        mesh.build_bvh(SplitMethod::PlaneCandidates);

        let mut ray = make_pick_ray(7.2, 10.0);
        let hit = mesh.intersect(&mut ray, TraversalMethod::FrontToBack);

        assert!(hit.is_hit());
        assert!((hit.distance - 5.0).abs() < 1e-4);
        assert!((hit.uv.x - 0.25).abs() < 1e-5);
        assert!((hit.uv.y - 0.25).abs() < 1e-5);
        assert_eq!(hit.indices, [21, 22, 23]);
    }

    #[test]
    fn recursive_queries_shorten_the_ray_to_the_hit() {
        let mut mesh = make_strip(4, 1.0);
        mesh.build_bvh(SplitMethod::PlaneCandidates);

        let mut ray = make_pick_ray(2.2, 50.0);
        let hit = mesh.intersect(&mut ray, TraversalMethod::Recursive);

        assert!(hit.is_hit());
        assert_eq!(ray.length, hit.distance);
    }

    #[test]
    fn recursive_misses_leave_the_ray_length_alone() {
        let mut mesh = make_strip(4, 1.0);
        mesh.build_bvh(SplitMethod::PlaneCandidates);

        let mut ray = make_pick_ray(-10.0, 50.0);
        assert!(!mesh.intersect(&mut ray, TraversalMethod::Recursive).is_hit());
        assert_eq!(ray.length, 50.0);
    }

    #[test]
    fn front_to_back_queries_never_touch_the_ray() {
        let mut mesh = make_strip(4, 1.0);
        mesh.build_bvh(SplitMethod::PlaneCandidates);

        let mut ray = make_pick_ray(2.2, 50.0);
        let hit = mesh.intersect(&mut ray, TraversalMethod::FrontToBack);

        assert!(hit.is_hit());
        assert_eq!(ray.length, 50.0);
    }

    #[test]
    fn ray_length_caps_both_traversals() {
        let mut mesh = make_strip(3, 1.0);
        mesh.build_bvh(SplitMethod::PlaneCandidates);

        for &method in &[TraversalMethod::Recursive, TraversalMethod::FrontToBack] {
            let mut ray = make_pick_ray(0.2, 3.0);
            assert!(!mesh.intersect(&mut ray, method).is_hit());
            assert_eq!(ray.length, 3.0);
        }
    }

    #[test]
    fn repeated_queries_with_fresh_rays_agree() {
        let mut mesh = make_strip(6, 1.0);
        mesh.build_bvh(SplitMethod::PlaneCandidates);

        let mut first_ray = make_pick_ray(3.2, 10.0);
        let first = mesh.intersect(&mut first_ray, TraversalMethod::Recursive);
        let mut second_ray = make_pick_ray(3.2, 10.0);
        let second = mesh.intersect(&mut second_ray, TraversalMethod::Recursive);

        assert!(first.is_hit());
        assert_eq!(first, second);
    }

    #[test]
    fn subtree_queries_only_see_the_start_nodes_range() {
        let mut mesh = make_strip(2, 100.0);
        mesh.build_bvh(SplitMethod::SurfaceAreaHeuristic);
        assert_eq!(mesh.bvh().node_count(), 3);

        let right_cluster = Point3::new(100.2, 0.2, 0.0);
        let start: u32 = if mesh.bvh().node(1).aabb().contains_point(right_cluster) {
            1
        } else {
            2
        };
        let other = if start == 1 { 2 } else { 1 };

        let mut ray = make_pick_ray(100.2, 10.0);
        let subtree = mesh.intersect_from(&mut ray, TraversalMethod::FrontToBack, start);
        assert!(subtree.is_hit());

        let mut ray = make_pick_ray(100.2, 10.0);
        assert!(
            !mesh
                .intersect_from(&mut ray, TraversalMethod::Recursive, other)
                .is_hit()
        );

        let mut ray = make_pick_ray(100.2, 10.0);
        let full = mesh.intersect_from(&mut ray, TraversalMethod::FrontToBack, 0);
        assert_eq!(full, subtree);
    }

    #[test]
    #[should_panic(expected = "start node index out of range")]
    fn out_of_range_start_node_panics() {
        let mut mesh = make_strip(2, 1.0);
        mesh.build_bvh(SplitMethod::Midpoint);

        let mut ray = make_pick_ray(0.2, 10.0);
        mesh.intersect_from(&mut ray, TraversalMethod::FrontToBack, 99);
    }

    #[test]
    fn unbuilt_mesh_reports_misses() {
        let mesh = make_strip(4, 1.0);

        let mut ray = make_pick_ray(0.2, 10.0);
        assert!(!mesh.intersect(&mut ray, TraversalMethod::FrontToBack).is_hit());
        let mut ray = make_pick_ray(0.2, 10.0);
        assert!(!mesh.intersect(&mut ray, TraversalMethod::Recursive).is_hit());
    }

    #[test]
    fn model_queries_follow_the_same_ray_contract() {
        let mut meshes = vec![make_offset_mesh(0.0), make_offset_mesh(-10.0)];
        for mesh in &mut meshes {
            mesh.build_bvh(SplitMethod::Midpoint);
        }
        let mut model = Model::new(meshes);
        model.build_bvh(SplitMethod::Midpoint);

        // The nearer of the two parallel triangles is 5 units away.
        let mut recursive_ray = make_pick_ray(0.2, 50.0);
        let recursive = model.intersect(&mut recursive_ray, TraversalMethod::Recursive);
        assert!(recursive.is_hit());
        assert!((recursive.distance - 5.0).abs() < 1e-4);
        assert_eq!(recursive_ray.length, recursive.distance);

        let mut ordered_ray = make_pick_ray(0.2, 50.0);
        let ordered = model.intersect(&mut ordered_ray, TraversalMethod::FrontToBack);
        assert_eq!(ordered, recursive);
        assert_eq!(ordered_ray.length, 50.0);
    }
}
