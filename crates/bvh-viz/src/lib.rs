//! Shared visualization utilities for BVH examples.

use std::hash::{Hash, Hasher};

use bvh_tree::{Aabb, Mesh, PrimitiveTopology, Ray, Vertex};
use macroquad::models::{draw_mesh, Mesh as DrawMesh, Vertex as DrawVertex};
use macroquad::prelude::*;
use nalgebra::{Point3, Rotation3, Vector3};

pub mod navigator;
pub use navigator::BvhNavigator;

/// Generates a deterministic color from a triangle's vertex indices using
/// hashing. This keeps every triangle's color stable across frames.
pub fn triangle_color(indices: [u32; 3]) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for index in indices {
        index.hash(&mut hasher);
    }
    let hash = hasher.finish();

    // Extract RGB from hash bytes
    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;

    // Ensure colors aren't too dark by adding a minimum brightness
    let r = r.max(40);
    let g = g.max(40);
    let b = b.max(40);

    Color::from_rgba(r, g, b, 255)
}

/// Draws one triangle of a mesh in an explicit color.
pub fn draw_triangle_colored(mesh: &Mesh, triangle: [u32; 3], color: Color) {
    let vertices: Vec<DrawVertex> = triangle
        .iter()
        .map(|&index| {
            let p = mesh.vertices()[index as usize].position;
            DrawVertex::new2(vec3(p.x, p.y, p.z), vec2(0.0, 0.0), color)
        })
        .collect();

    draw_mesh(&DrawMesh {
        vertices,
        indices: vec![0, 1, 2],
        texture: None,
    });
}

/// Draws one triangle of a mesh in its hash color.
pub fn draw_triangle(mesh: &Mesh, triangle: [u32; 3]) {
    draw_triangle_colored(mesh, triangle, triangle_color(triangle));
}

/// Draws every triangle of a mesh, each in its hash color.
pub fn draw_mesh_triangles(mesh: &Mesh) {
    for chunk in mesh.indices().chunks(3) {
        draw_triangle(mesh, [chunk[0], chunk[1], chunk[2]]);
    }
}

/// Draws the wireframe of an axis-aligned box. Boxes with non-finite
/// extents (the empty box) are skipped.
pub fn draw_aabb_wires(aabb: &Aabb, color: Color) {
    let center = aabb.center();
    let extent = aabb.extent();
    if !extent.x.is_finite() || !extent.y.is_finite() || !extent.z.is_finite() {
        return;
    }

    draw_cube_wires(
        vec3(center.x, center.y, center.z),
        vec3(extent.x, extent.y, extent.z),
        color,
    );
}

/// Builds a world-space picking ray through a screen position by
/// unprojecting it against the camera's view-projection matrix.
pub fn screen_ray(camera: &Camera3D, screen: Vec2, length: f32) -> Ray {
    let inverse = camera.matrix().inverse();

    // Screen to normalized device coordinates, with y flipped
    let ndc_x = screen.x / screen_width() * 2.0 - 1.0;
    let ndc_y = 1.0 - screen.y / screen_height() * 2.0;

    let near = inverse.project_point3(vec3(ndc_x, ndc_y, -1.0));
    let far = inverse.project_point3(vec3(ndc_x, ndc_y, 1.0));
    let direction = far - near;

    Ray::new(
        Point3::new(near.x, near.y, near.z),
        Vector3::new(direction.x, direction.y, direction.z),
        length,
    )
}

// 8 corners of a unit cube, paired with the 6 faces that connect them
// with counter-clockwise winding (viewed from outside).
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0], // 0: left-bottom-back
    [1.0, -1.0, -1.0],  // 1: right-bottom-back
    [1.0, 1.0, -1.0],   // 2: right-top-back
    [-1.0, 1.0, -1.0],  // 3: left-top-back
    [-1.0, -1.0, 1.0],  // 4: left-bottom-front
    [1.0, -1.0, 1.0],   // 5: right-bottom-front
    [1.0, 1.0, 1.0],    // 6: right-top-front
    [-1.0, 1.0, 1.0],   // 7: left-top-front
];

const CUBE_FACES: [[u32; 4]; 6] = [
    [4, 5, 6, 7], // front (+Z)
    [1, 0, 3, 2], // back (-Z)
    [0, 4, 7, 3], // left (-X)
    [5, 1, 2, 6], // right (+X)
    [7, 6, 2, 3], // top (+Y)
    [0, 1, 5, 4], // bottom (-Y)
];

/// Generates the 12-triangle mesh of an axis-aligned cube.
pub fn generate_cube_mesh(center: Point3<f32>, size: f32) -> Mesh {
    generate_rotated_cube_mesh(center, size, &Rotation3::identity())
}

/// Generates the 12-triangle mesh of a rotated cube.
pub fn generate_rotated_cube_mesh(
    center: Point3<f32>,
    size: f32,
    rotation: &Rotation3<f32>,
) -> Mesh {
    let half = size / 2.0;

    let vertices: Vec<Vertex> = CUBE_CORNERS
        .iter()
        .map(|&[x, y, z]| {
            let corner = rotation * Vector3::new(x * half, y * half, z * half);
            Vertex::from_position(center + corner)
        })
        .collect();

    // Two triangles per quad face
    let mut indices = Vec::with_capacity(CUBE_FACES.len() * 6);
    for face in &CUBE_FACES {
        indices.extend_from_slice(&[face[0], face[1], face[2]]);
        indices.extend_from_slice(&[face[0], face[2], face[3]]);
    }

    Mesh::new(vertices, indices, PrimitiveTopology::Triangles)
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 5.0,
            min_distance: 10.0,
            max_distance: 200.0,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Sets the camera target point.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Updates camera state from user input (mouse drag, scroll, arrow keys).
    pub fn update(&mut self) {
        // Mouse drag for rotation
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        // Mouse wheel for zoom
        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        // Arrow keys for rotation
        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }
}
