//! BVH construction: split policies and in-place range partitioning.

use nalgebra::{Point3, Vector3};

use crate::aabb::Aabb;
use crate::mesh::{Mesh, PrimitiveTopology, Vertex};

use super::node::BvhNode;

/// Number of interior candidate planes evaluated per axis by
/// [`SplitMethod::PlaneCandidates`].
pub const CANDIDATE_PLANES: usize = 10;

/// Split policy used to subdivide a node's primitive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMethod {
    /// Split the longest axis of the node's box at its midpoint. Cheapest
    /// to build, no cost model.
    Midpoint,
    /// Binned approximation of the surface area heuristic, evaluating
    /// [`CANDIDATE_PLANES`] planes per axis across the node's centroid
    /// range. O(n) per node.
    #[default]
    PlaneCandidates,
    /// Exhaustive surface area heuristic over every primitive centroid on
    /// every axis. Exact and O(n²) per node; intentionally slow to build.
    SurfaceAreaHeuristic,
}

/// Items a hierarchy can be built over: addressable primitives with
/// centroids and boxes, reorderable in place.
///
/// Leaf ranges are recorded in index units, `stride` indices per item, so
/// mesh-mode leaves address the caller's index array directly while
/// model-mode leaves (stride 1) address mesh slots.
trait Partitionable {
    fn len(&self) -> usize;
    fn stride(&self) -> usize;
    fn centroid(&self, item: usize) -> Point3<f32>;
    fn item_aabb(&self, item: usize) -> Aabb;
    fn swap(&mut self, a: usize, b: usize);
    fn range_aabb(&self, first: usize, count: usize) -> Aabb;
    /// Smallest range worth attempting to split.
    fn min_split_count(&self) -> usize;
}

/// Triangle/line/point primitives of one mesh, addressed through its
/// index array.
struct PrimitiveItems<'a> {
    vertices: &'a [Vertex],
    indices: &'a mut [u32],
    topology: PrimitiveTopology,
}

impl Partitionable for PrimitiveItems<'_> {
    fn len(&self) -> usize {
        self.indices.len() / self.topology.vertex_count()
    }

    fn stride(&self) -> usize {
        self.topology.vertex_count()
    }

    fn centroid(&self, item: usize) -> Point3<f32> {
        let stride = self.topology.vertex_count();
        let first = item * stride;
        let mut sum = Vector3::zeros();
        for &index in &self.indices[first..first + stride] {
            sum += self.vertices[index as usize].position.coords;
        }
        Point3::from(sum / stride as f32)
    }

    fn item_aabb(&self, item: usize) -> Aabb {
        let stride = self.topology.vertex_count();
        let first = item * stride;
        let mut aabb = Aabb::empty();
        for &index in &self.indices[first..first + stride] {
            aabb.grow_point(self.vertices[index as usize].position);
        }
        aabb
    }

    fn swap(&mut self, a: usize, b: usize) {
        let stride = self.topology.vertex_count();
        for offset in 0..stride {
            self.indices.swap(a * stride + offset, b * stride + offset);
        }
    }

    fn range_aabb(&self, first: usize, count: usize) -> Aabb {
        let stride = self.topology.vertex_count();
        Aabb::from_indexed(
            self.vertices,
            &self.indices[first * stride..(first + count) * stride],
            self.topology,
        )
    }

    fn min_split_count(&self) -> usize {
        1
    }
}

/// Whole meshes of a model, addressed by slot. Swaps move entire `Mesh`
/// values so each mesh's own hierarchy stays self-contained.
struct MeshItems<'a> {
    meshes: &'a mut [Mesh],
}

impl Partitionable for MeshItems<'_> {
    fn len(&self) -> usize {
        self.meshes.len()
    }

    fn stride(&self) -> usize {
        1
    }

    fn centroid(&self, item: usize) -> Point3<f32> {
        self.meshes[item].aabb().center()
    }

    fn item_aabb(&self, item: usize) -> Aabb {
        self.meshes[item].aabb()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.meshes.swap(a, b);
    }

    fn range_aabb(&self, first: usize, count: usize) -> Aabb {
        Aabb::from_meshes(&self.meshes[first..first + count])
    }

    fn min_split_count(&self) -> usize {
        2
    }
}

/// Builds the node array for a mesh's primitives, reordering the index
/// array in place.
pub(crate) fn build_primitive_nodes(
    vertices: &[Vertex],
    indices: &mut [u32],
    topology: PrimitiveTopology,
    method: SplitMethod,
) -> Vec<BvhNode> {
    debug_assert!(
        indices.len() % topology.vertex_count() == 0,
        "index count must be a multiple of the primitive stride"
    );
    let mut items = PrimitiveItems {
        vertices,
        indices,
        topology,
    };
    build_nodes(&mut items, method)
}

/// Builds the node array for a model's meshes, reordering the mesh array
/// in place.
pub(crate) fn build_mesh_nodes(meshes: &mut [Mesh], method: SplitMethod) -> Vec<BvhNode> {
    let mut items = MeshItems { meshes };
    build_nodes(&mut items, method)
}

/// Work-stack subdivision shared by both build modes.
///
/// The root covers the whole range. Each popped range either terminates as
/// a leaf or is partitioned in place, its node rewritten into an internal
/// node and two child leaves appended, adjacent by construction. A split
/// that would leave either side empty is abandoned and the node stays a
/// leaf, which bounds subdivision on coincident-centroid input.
fn build_nodes<P: Partitionable>(items: &mut P, method: SplitMethod) -> Vec<BvhNode> {
    let count = items.len();
    let stride = items.stride();

    // 2N-1 is the tight node bound for a full binary tree of N leaves.
    let capacity = if count == 0 { 1 } else { 2 * count - 1 };
    let mut nodes = Vec::with_capacity(capacity);
    nodes.push(BvhNode::leaf(
        0,
        (count * stride) as u32,
        items.range_aabb(0, count),
    ));

    let mut ranges = vec![(0usize, 0usize, count)];
    while let Some((node_index, first, count)) = ranges.pop() {
        if count < items.min_split_count() {
            continue;
        }

        let aabb = *nodes[node_index].aabb();
        let (axis, coordinate) = match choose_split(items, first, count, &aabb, method) {
            Some(split) => split,
            None => continue,
        };

        let left_count = partition(items, first, count, axis, coordinate);
        if left_count == 0 || left_count == count {
            continue;
        }

        let right_first = first + left_count;
        let right_count = count - left_count;
        let left_child = nodes.len() as u32;
        nodes.push(BvhNode::leaf(
            (first * stride) as u32,
            (left_count * stride) as u32,
            items.range_aabb(first, left_count),
        ));
        nodes.push(BvhNode::leaf(
            (right_first * stride) as u32,
            (right_count * stride) as u32,
            items.range_aabb(right_first, right_count),
        ));
        nodes[node_index].make_internal(left_child);

        ranges.push((left_child as usize + 1, right_first, right_count));
        ranges.push((left_child as usize, first, left_count));
    }

    nodes
}

/// Picks a split plane for the range, or `None` to terminate it as a leaf.
fn choose_split<P: Partitionable>(
    items: &P,
    first: usize,
    count: usize,
    aabb: &Aabb,
    method: SplitMethod,
) -> Option<(usize, f32)> {
    match method {
        SplitMethod::Midpoint => midpoint_split(aabb),
        SplitMethod::PlaneCandidates => candidate_plane_split(items, first, count, aabb),
        SplitMethod::SurfaceAreaHeuristic => surface_area_split(items, first, count, aabb),
    }
}

fn midpoint_split(aabb: &Aabb) -> Option<(usize, f32)> {
    let axis = aabb.longest_axis();
    Some((axis, aabb.midpoint_along_axis(axis)))
}

/// Exhaustive surface area heuristic: every primitive centroid on every
/// axis is a candidate plane. Keeps the global minimum cost and declines
/// the split when it would not beat the cost of leaving the node a leaf.
fn surface_area_split<P: Partitionable>(
    items: &P,
    first: usize,
    count: usize,
    aabb: &Aabb,
) -> Option<(usize, f32)> {
    if count < 2 {
        return None;
    }

    let mut best = None;
    let mut best_cost = f32::INFINITY;

    for axis in 0..3 {
        for candidate in first..first + count {
            let coordinate = items.centroid(candidate)[axis];

            let mut left_count = 0usize;
            let mut right_count = 0usize;
            let mut left_aabb = Aabb::empty();
            let mut right_aabb = Aabb::empty();
            for item in first..first + count {
                if items.centroid(item)[axis] < coordinate {
                    left_count += 1;
                    left_aabb.grow(&items.item_aabb(item));
                } else {
                    right_count += 1;
                    right_aabb.grow(&items.item_aabb(item));
                }
            }
            if left_count == 0 || right_count == 0 {
                continue;
            }

            let cost = left_count as f32 * left_aabb.half_area()
                + right_count as f32 * right_aabb.half_area();
            if cost < best_cost {
                best_cost = cost;
                best = Some((axis, coordinate));
            }
        }
    }

    let parent_cost = count as f32 * aabb.half_area();
    match best {
        Some(split) if best_cost < parent_cost => Some(split),
        _ => None,
    }
}

/// Binned surface-area-heuristic approximation. Buckets centroids into
/// `CANDIDATE_PLANES + 1` equal-width bins across the node's centroid
/// range per axis, then evaluates only the interior bin boundaries from
/// two cumulative sweeps. Axes with zero centroid extent are skipped.
/// Same leaf-termination rule as the exhaustive heuristic.
fn candidate_plane_split<P: Partitionable>(
    items: &P,
    first: usize,
    count: usize,
    aabb: &Aabb,
) -> Option<(usize, f32)> {
    if count < 2 {
        return None;
    }
    let bin_count = CANDIDATE_PLANES + 1;

    let mut best = None;
    let mut best_cost = f32::INFINITY;

    for axis in 0..3 {
        let mut centroid_min = f32::INFINITY;
        let mut centroid_max = f32::NEG_INFINITY;
        for item in first..first + count {
            let centroid = items.centroid(item)[axis];
            centroid_min = centroid_min.min(centroid);
            centroid_max = centroid_max.max(centroid);
        }
        if centroid_max <= centroid_min {
            continue;
        }

        let mut bin_counts = [0usize; CANDIDATE_PLANES + 1];
        let mut bin_aabbs = [Aabb::empty(); CANDIDATE_PLANES + 1];
        let scale = bin_count as f32 / (centroid_max - centroid_min);
        for item in first..first + count {
            let centroid = items.centroid(item)[axis];
            let bin = (((centroid - centroid_min) * scale) as usize).min(bin_count - 1);
            bin_counts[bin] += 1;
            bin_aabbs[bin].grow(&items.item_aabb(item));
        }

        // Cumulative totals on each side of every interior boundary.
        let mut left_counts = [0usize; CANDIDATE_PLANES];
        let mut left_areas = [0.0f32; CANDIDATE_PLANES];
        let mut right_counts = [0usize; CANDIDATE_PLANES];
        let mut right_areas = [0.0f32; CANDIDATE_PLANES];

        let mut running_count = 0usize;
        let mut running_aabb = Aabb::empty();
        for boundary in 0..CANDIDATE_PLANES {
            running_count += bin_counts[boundary];
            running_aabb.grow(&bin_aabbs[boundary]);
            left_counts[boundary] = running_count;
            left_areas[boundary] = running_aabb.half_area();
        }

        running_count = 0;
        running_aabb = Aabb::empty();
        for boundary in (0..CANDIDATE_PLANES).rev() {
            running_count += bin_counts[boundary + 1];
            running_aabb.grow(&bin_aabbs[boundary + 1]);
            right_counts[boundary] = running_count;
            right_areas[boundary] = running_aabb.half_area();
        }

        for boundary in 0..CANDIDATE_PLANES {
            if left_counts[boundary] == 0 || right_counts[boundary] == 0 {
                continue;
            }
            let cost = left_counts[boundary] as f32 * left_areas[boundary]
                + right_counts[boundary] as f32 * right_areas[boundary];
            if cost < best_cost {
                let t = (boundary + 1) as f32 / bin_count as f32;
                best_cost = cost;
                best = Some((axis, centroid_min + (centroid_max - centroid_min) * t));
            }
        }
    }

    let parent_cost = count as f32 * aabb.half_area();
    match best {
        Some(split) if best_cost < parent_cost => Some(split),
        _ => None,
    }
}

/// Two-pointer in-place partition of `[first, first + count)` around
/// `coordinate` on `axis`. Items whose centroid lies below the coordinate
/// end up on the left. Returns the size of the left side, which may be 0
/// or `count` when every centroid falls on one side.
fn partition<P: Partitionable>(
    items: &mut P,
    first: usize,
    count: usize,
    axis: usize,
    coordinate: f32,
) -> usize {
    let mut front = first;
    let mut back = first + count;
    while front < back {
        if items.centroid(front)[axis] < coordinate {
            front += 1;
        } else {
            back -= 1;
            items.swap(front, back);
        }
    }
    front - first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bvh::node::NodeKind;

    /// One flat triangle per entry, with its centroid exactly at `x`.
    fn make_triangles_at(positions: &[f32]) -> (Vec<Vertex>, Vec<u32>) {
        let mut vertices = Vec::with_capacity(positions.len() * 3);
        let mut indices = Vec::with_capacity(positions.len() * 3);
        for (i, &x) in positions.iter().enumerate() {
            vertices.push(Vertex::from_position(Point3::new(x, 0.0, 0.0)));
            vertices.push(Vertex::from_position(Point3::new(x, 1.0, 0.0)));
            vertices.push(Vertex::from_position(Point3::new(x, 0.0, 1.0)));
            let base = (i * 3) as u32;
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        }
        (vertices, indices)
    }

    fn sorted_triples(indices: &[u32]) -> Vec<[u32; 3]> {
        let mut triples: Vec<[u32; 3]> = indices
            .chunks(3)
            .map(|chunk| {
                let mut triple = [chunk[0], chunk[1], chunk[2]];
                triple.sort_unstable();
                triple
            })
            .collect();
        triples.sort_unstable();
        triples
    }

    /// One primitive per entry along the x = y diagonal, `stride` indices
    /// each, so range boxes have positive area and splits can pay off.
    fn make_diagonal_primitives(
        count: usize,
        topology: PrimitiveTopology,
    ) -> (Vec<Vertex>, Vec<u32>) {
        let stride = topology.vertex_count();
        let mut vertices = Vec::with_capacity(count * stride);
        let mut indices = Vec::with_capacity(count * stride);
        for item in 0..count {
            let along = item as f32 * 2.0;
            for vertex in 0..stride {
                let offset = vertex as f32 * 0.5;
                vertices.push(Vertex::from_position(Point3::new(
                    along + offset,
                    along + offset,
                    0.0,
                )));
            }
            let base = (item * stride) as u32;
            indices.extend((0..stride as u32).map(|offset| base + offset));
        }
        (vertices, indices)
    }

    #[test]
    fn centroid_is_the_vertex_average() {
        let (vertices, mut indices) = make_triangles_at(&[0.0]);
        let items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };

        let centroid = items.centroid(0);
        assert_eq!(centroid.x, 0.0);
        assert!((centroid.y - 1.0 / 3.0).abs() < 1e-6);
        assert!((centroid.z - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn swap_moves_whole_index_triples() {
        let (vertices, mut indices) = make_triangles_at(&[0.0, 1.0, 2.0]);
        let original = sorted_triples(&indices);

        let mut items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };
        items.swap(0, 2);

        assert_eq!(items.centroid(0).x, 2.0);
        assert_eq!(items.centroid(2).x, 0.0);
        assert_eq!(sorted_triples(&indices), original);
    }

    #[test]
    fn partition_splits_around_the_coordinate() {
        let (vertices, mut indices) = make_triangles_at(&[3.0, 0.0, 2.0, 1.0]);
        let mut items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };

        let left_count = partition(&mut items, 0, 4, 0, 1.5);

        assert_eq!(left_count, 2);
        for item in 0..left_count {
            assert!(items.centroid(item).x < 1.5);
        }
        for item in left_count..4 {
            assert!(items.centroid(item).x >= 1.5);
        }
    }

    #[test]
    fn partition_preserves_the_primitive_set() {
        let (vertices, mut indices) = make_triangles_at(&[5.0, 1.0, 4.0, 2.0, 3.0]);
        let original = sorted_triples(&indices);

        let mut items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };
        partition(&mut items, 0, 5, 0, 3.5);

        assert_eq!(sorted_triples(&indices), original);
    }

    #[test]
    fn partition_reports_empty_sides() {
        let (vertices, mut indices) = make_triangles_at(&[1.0, 2.0, 3.0]);
        let mut items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };

        assert_eq!(partition(&mut items, 0, 3, 0, 0.5), 0);
        assert_eq!(partition(&mut items, 0, 3, 0, 10.0), 3);
    }

    #[test]
    fn partition_respects_subranges() {
        let (vertices, mut indices) = make_triangles_at(&[9.0, 4.0, 1.0, 6.0, 0.0]);
        let mut items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };

        // Only items 1..4 take part; the ends must not move.
        let left_count = partition(&mut items, 1, 3, 0, 5.0);

        assert_eq!(left_count, 2);
        assert_eq!(items.centroid(0).x, 9.0);
        assert_eq!(items.centroid(4).x, 0.0);
        assert!(items.centroid(1).x < 5.0);
        assert!(items.centroid(2).x < 5.0);
        assert!(items.centroid(3).x >= 5.0);
    }

    #[test]
    fn midpoint_picks_the_longest_axis() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 10.0, 1.0));
        assert_eq!(midpoint_split(&aabb), Some((1, 5.0)));
    }

    #[test]
    fn surface_area_heuristic_splits_separated_clusters() {
        let (vertices, mut indices) = make_triangles_at(&[0.0, 100.0]);
        let items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };
        let aabb = items.range_aabb(0, 2);

        let split = surface_area_split(&items, 0, 2, &aabb);
        assert_eq!(split, Some((0, 100.0)));
    }

    #[test]
    fn surface_area_heuristic_declines_a_single_primitive() {
        let (vertices, mut indices) = make_triangles_at(&[0.0]);
        let items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };
        let aabb = items.range_aabb(0, 1);

        assert_eq!(surface_area_split(&items, 0, 1, &aabb), None);
    }

    #[test]
    fn surface_area_heuristic_declines_coincident_centroids() {
        let (vertices, mut indices) = make_triangles_at(&[5.0, 5.0, 5.0, 5.0]);
        let items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };
        let aabb = items.range_aabb(0, 4);

        assert_eq!(surface_area_split(&items, 0, 4, &aabb), None);
    }

    #[test]
    fn candidate_planes_split_spread_out_primitives() {
        let positions: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let (vertices, mut indices) = make_triangles_at(&positions);
        let items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };
        let aabb = items.range_aabb(0, 12);

        let (axis, coordinate) = candidate_plane_split(&items, 0, 12, &aabb)
            .expect("spread-out centroids must produce a split");
        assert_eq!(axis, 0);
        assert!(coordinate > 0.0 && coordinate < 11.0);
    }

    #[test]
    fn candidate_planes_decline_coincident_centroids() {
        let (vertices, mut indices) = make_triangles_at(&[7.0, 7.0, 7.0]);
        let items = PrimitiveItems {
            vertices: &vertices,
            indices: &mut indices,
            topology: PrimitiveTopology::Triangles,
        };
        let aabb = items.range_aabb(0, 3);

        assert_eq!(candidate_plane_split(&items, 0, 3, &aabb), None);
    }

    #[test]
    fn build_keeps_siblings_adjacent() {
        let positions: Vec<f32> = (0..8).map(|i| i as f32 * 2.0).collect();
        let (vertices, mut indices) = make_triangles_at(&positions);

        let nodes = build_primitive_nodes(
            &vertices,
            &mut indices,
            PrimitiveTopology::Triangles,
            SplitMethod::PlaneCandidates,
        );

        assert!(nodes.len() <= 15);
        for node in &nodes {
            if let NodeKind::Internal { left_child } = node.kind() {
                assert!((left_child as usize) < nodes.len());
                assert!((left_child as usize + 1) < nodes.len());
            }
        }
    }

    #[test]
    fn line_and_point_topologies_build_stride_aligned_leaves() {
        for topology in [PrimitiveTopology::Lines, PrimitiveTopology::Points] {
            let stride = topology.vertex_count();
            let (vertices, mut indices) = make_diagonal_primitives(7, topology);

            let nodes = build_primitive_nodes(
                &vertices,
                &mut indices,
                topology,
                SplitMethod::PlaneCandidates,
            );

            assert!(nodes.len() >= 3, "{:?} never split", topology);
            assert!(nodes.len() <= 13);

            // Leaves tile the index array in whole primitives.
            let mut ranges: Vec<(u32, u32)> = nodes
                .iter()
                .filter_map(|node| match node.kind() {
                    NodeKind::Leaf { first, count } => Some((first, count)),
                    NodeKind::Internal { .. } => None,
                })
                .collect();
            ranges.sort_unstable();

            let mut next = 0u32;
            for (first, count) in ranges {
                assert_eq!(first as usize % stride, 0, "{:?} leaf start misaligned", topology);
                assert_eq!(count as usize % stride, 0, "{:?} leaf count misaligned", topology);
                assert_eq!(first, next);
                next = first + count;
            }
            assert_eq!(next as usize, indices.len());

            let mut sorted = indices.clone();
            sorted.sort_unstable();
            let identity: Vec<u32> = (0..indices.len() as u32).collect();
            assert_eq!(sorted, identity, "{:?} lost index entries", topology);
        }
    }

    #[test]
    fn mesh_items_use_root_box_centers() {
        let (vertices_a, indices_a) = make_triangles_at(&[0.0]);
        let (vertices_b, indices_b) = make_triangles_at(&[10.0]);
        let mut meshes = vec![
            Mesh::new(vertices_a, indices_a, PrimitiveTopology::Triangles),
            Mesh::new(vertices_b, indices_b, PrimitiveTopology::Triangles),
        ];
        for mesh in &mut meshes {
            mesh.build_bvh(SplitMethod::Midpoint);
        }

        let mut items = MeshItems {
            meshes: &mut meshes,
        };
        assert_eq!(items.centroid(0).x, 0.0);
        assert_eq!(items.centroid(1).x, 10.0);

        items.swap(0, 1);
        assert_eq!(items.centroid(0).x, 10.0);
    }

    #[test]
    fn mesh_mode_leaves_count_in_mesh_units() {
        let mut meshes: Vec<Mesh> = [0.0, 8.0, 16.0]
            .iter()
            .map(|&x| {
                let (vertices, indices) = make_triangles_at(&[x]);
                Mesh::new(vertices, indices, PrimitiveTopology::Triangles)
            })
            .collect();
        for mesh in &mut meshes {
            mesh.build_bvh(SplitMethod::PlaneCandidates);
        }

        let nodes = build_mesh_nodes(&mut meshes, SplitMethod::PlaneCandidates);

        let leaf_total: u32 = nodes
            .iter()
            .filter_map(|node| match node.kind() {
                NodeKind::Leaf { count, .. } => Some(count),
                NodeKind::Internal { .. } => None,
            })
            .sum();
        assert_eq!(leaf_total, 3);
    }
}
