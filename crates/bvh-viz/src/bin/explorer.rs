use bvh_tree::{Mesh, PrimitiveTopology, SplitMethod, TraversalMethod};
use bvh_viz::{
    draw_mesh_triangles, draw_triangle_colored, generate_rotated_cube_mesh, screen_ray,
    BvhNavigator, OrbitCamera,
};
use macroquad::prelude::*;
use nalgebra::{Point3, Rotation3, Unit, Vector3};

const NUM_CUBES: usize = 24;
const WORLD_SIZE: f32 = 30.0;
const MIN_CUBE_SIZE: f32 = 2.0;
const MAX_CUBE_SIZE: f32 = 5.0;
const PICK_DISTANCE: f32 = 300.0;

/// Simple seeded random number generator (LCG).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 33) as f32) / (u32::MAX as f32 / 2.0)
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Generates a single mesh holding many randomly rotated cubes.
fn generate_cube_field(seed: u64) -> Mesh {
    let mut rng = Rng::new(seed);
    let mut vertices = Vec::with_capacity(NUM_CUBES * 8);
    let mut indices = Vec::with_capacity(NUM_CUBES * 36);

    for _ in 0..NUM_CUBES {
        let x = (rng.next_f32() - 0.5) * WORLD_SIZE;
        let y = (rng.next_f32() - 0.5) * WORLD_SIZE;
        let z = (rng.next_f32() - 0.5) * WORLD_SIZE;
        let center = Point3::new(x, y, z);

        let size = rng.range(MIN_CUBE_SIZE, MAX_CUBE_SIZE);

        let axis_x = rng.next_f32() - 0.5;
        let axis_y = rng.next_f32() - 0.5;
        let axis_z = rng.next_f32() - 0.5;
        let axis = Vector3::new(axis_x, axis_y, axis_z);

        let axis = if axis.norm() > 0.01 {
            Unit::new_normalize(axis)
        } else {
            Unit::new_normalize(Vector3::new(1.0, 0.0, 0.0))
        };

        let angle = rng.next_f32() * std::f32::consts::TAU;
        let rotation = Rotation3::from_axis_angle(&axis, angle);

        let cube = generate_rotated_cube_mesh(center, size, &rotation);
        let base = vertices.len() as u32;
        vertices.extend_from_slice(cube.vertices());
        indices.extend(cube.indices().iter().map(|&index| base + index));
    }

    Mesh::new(vertices, indices, PrimitiveTopology::Triangles)
}

#[macroquad::main("BVH Explorer")]
async fn main() {
    println!("Generating {} random rotated cubes...", NUM_CUBES);
    let mut mesh = generate_cube_field(42);
    println!("Created {} triangles", mesh.primitive_count());

    println!("Building BVH...");
    mesh.build_bvh(SplitMethod::PlaneCandidates);
    println!(
        "BVH built: {} nodes, depth {}",
        mesh.bvh().node_count(),
        mesh.bvh().depth()
    );

    let mut camera = OrbitCamera::new(50.0, 0.0, 0.3).with_zoom(3.0, 10.0, 150.0);
    let mut navigator = BvhNavigator::new();

    loop {
        camera.update();
        navigator.update(mesh.bvh());

        let camera3d = camera.to_camera3d();
        let (mouse_x, mouse_y) = mouse_position();
        let mut ray = screen_ray(&camera3d, vec2(mouse_x, mouse_y), PICK_DISTANCE);

        // Picking is restricted to the subtree under inspection
        let start = navigator.current_index(mesh.bvh()).unwrap_or(0);
        let hit = mesh.intersect_from(&mut ray, TraversalMethod::FrontToBack, start);

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera3d);

        draw_mesh_triangles(&mesh);
        navigator.draw_boxes(mesh.bvh());
        if hit.is_hit() {
            draw_triangle_colored(&mesh, hit.indices, WHITE);
        }

        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(8.0, 0.0, 0.0), RED);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 8.0, 0.0), GREEN);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 8.0), BLUE);

        set_default_camera();

        draw_text(
            &format!("BVH Explorer - {} triangles", mesh.primitive_count()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Tree: {} nodes, depth {}",
                mesh.bvh().node_count(),
                mesh.bvh().depth()
            ),
            10.0,
            45.0,
            18.0,
            GRAY,
        );

        navigator.draw_ui(mesh.bvh(), 70.0);

        if hit.is_hit() {
            draw_text(
                &format!(
                    "Subtree hit: triangle {:?}, distance {:.2}",
                    hit.indices, hit.distance
                ),
                10.0,
                155.0,
                16.0,
                YELLOW,
            );
        } else {
            draw_text("Subtree hit: none", 10.0, 155.0, 16.0, DARKGRAY);
        }

        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 175.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 195.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
