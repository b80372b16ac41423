use bvh_tree::{Model, SplitMethod, TraversalMethod};
use bvh_viz::{
    draw_aabb_wires, draw_mesh_triangles, draw_triangle_colored, generate_cube_mesh, screen_ray,
    OrbitCamera,
};
use macroquad::prelude::*;
use nalgebra::Point3;

const GRID_SIZE: usize = 4;
const CUBE_SIZE: f32 = 2.0;
const CUBE_SPACING: f32 = 5.0;
const PICK_DISTANCE: f32 = 200.0;

/// Generates a flat grid of cube meshes with both hierarchy levels built.
fn generate_cube_grid() -> Model {
    let mut meshes = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    let offset = (GRID_SIZE - 1) as f32 * CUBE_SPACING / 2.0;

    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            let center = Point3::new(
                i as f32 * CUBE_SPACING - offset,
                0.0,
                j as f32 * CUBE_SPACING - offset,
            );
            meshes.push(generate_cube_mesh(center, CUBE_SIZE));
        }
    }

    let mut model = Model::new(meshes);
    for mesh in model.meshes_mut() {
        mesh.build_bvh(SplitMethod::PlaneCandidates);
    }
    model.build_bvh(SplitMethod::PlaneCandidates);
    model
}

#[macroquad::main("BVH Picking")]
async fn main() {
    println!("Generating {}x{} cube grid...", GRID_SIZE, GRID_SIZE);
    let model = generate_cube_grid();
    let triangle_count: usize = model.meshes().iter().map(|m| m.primitive_count()).sum();
    println!(
        "Created {} meshes, {} triangles",
        model.meshes().len(),
        triangle_count
    );
    println!(
        "Model hierarchy built: {} nodes, depth {}",
        model.bvh().node_count(),
        model.bvh().depth()
    );

    let mut camera = OrbitCamera::new(30.0, 0.6, 0.5).with_zoom(2.0, 5.0, 100.0);

    loop {
        camera.update();

        let camera3d = camera.to_camera3d();
        let (mouse_x, mouse_y) = mouse_position();
        let mut ray = screen_ray(&camera3d, vec2(mouse_x, mouse_y), PICK_DISTANCE);
        let hit = model.intersect(&mut ray, TraversalMethod::FrontToBack);

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera3d);

        for mesh in model.meshes() {
            draw_mesh_triangles(mesh);
        }

        if hit.is_hit() {
            let mesh = &model.meshes()[hit.mesh_index as usize];
            draw_triangle_colored(mesh, hit.indices, WHITE);
            draw_aabb_wires(&mesh.aabb(), YELLOW);
        }

        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(8.0, 0.0, 0.0), RED);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 8.0, 0.0), GREEN);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 8.0), BLUE);

        set_default_camera();

        draw_text(
            &format!(
                "BVH Picking - {} meshes, {} triangles",
                model.meshes().len(),
                triangle_count
            ),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        if hit.is_hit() {
            draw_text(
                &format!(
                    "Hit: mesh {}, triangle {:?}, distance {:.2}",
                    hit.mesh_index, hit.indices, hit.distance
                ),
                10.0,
                45.0,
                18.0,
                YELLOW,
            );
        } else {
            draw_text("Hit: none", 10.0, 45.0, 18.0, GRAY);
        }

        draw_text("Point at a cube to pick it", 10.0, 70.0, 16.0, DARKGRAY);
        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 90.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 110.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
