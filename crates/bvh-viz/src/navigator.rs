//! BVH navigation utilities for interactive visualization.

use bvh_tree::{Bvh, BvhNode, NodeKind};
use macroquad::prelude::*;

use crate::draw_aabb_wires;

/// Direction taken at each node in the navigation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Interactive BVH navigator for exploring tree structure.
pub struct BvhNavigator {
    path: Vec<Direction>,
}

impl Default for BvhNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl BvhNavigator {
    /// Creates a new navigator starting at the root.
    pub fn new() -> Self {
        Self { path: Vec::new() }
    }

    /// Returns the current navigation path.
    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    /// Returns the current depth in the tree.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Attempts to navigate to the left child. Returns true if successful.
    pub fn go_left(&mut self, bvh: &Bvh) -> bool {
        if let Some(node) = self.current_node(bvh) {
            if !node.is_leaf() {
                self.path.push(Direction::Left);
                return true;
            }
        }
        false
    }

    /// Attempts to navigate to the right child. Returns true if successful.
    pub fn go_right(&mut self, bvh: &Bvh) -> bool {
        if let Some(node) = self.current_node(bvh) {
            if !node.is_leaf() {
                self.path.push(Direction::Right);
                return true;
            }
        }
        false
    }

    /// Navigates to the parent node. Returns true if not already at root.
    pub fn go_parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Returns to the root node.
    pub fn go_root(&mut self) {
        self.path.clear();
    }

    /// Handles keyboard input for navigation.
    /// Returns true if navigation state changed.
    pub fn update(&mut self, bvh: &Bvh) -> bool {
        let mut changed = false;

        if is_key_pressed(KeyCode::Q) {
            changed = self.go_left(bvh);
        }
        if is_key_pressed(KeyCode::E) {
            changed = self.go_right(bvh);
        }
        if is_key_pressed(KeyCode::P) {
            changed = self.go_parent();
        }
        if is_key_pressed(KeyCode::R) {
            if !self.path.is_empty() {
                self.go_root();
                changed = true;
            }
        }

        changed
    }

    /// Resolves the path to a node index, if the hierarchy is non-empty
    /// and the path is still valid.
    pub fn current_index(&self, bvh: &Bvh) -> Option<u32> {
        if bvh.is_empty() {
            return None;
        }

        let mut index = 0;
        for direction in &self.path {
            match bvh.node(index).kind() {
                NodeKind::Leaf { .. } => return None,
                NodeKind::Internal { left_child } => {
                    index = match direction {
                        Direction::Left => left_child,
                        Direction::Right => left_child + 1,
                    };
                }
            }
        }
        Some(index)
    }

    /// Returns a reference to the current node, if the hierarchy is non-empty.
    pub fn current_node<'a>(&self, bvh: &'a Bvh) -> Option<&'a BvhNode> {
        self.current_index(bvh).map(|index| bvh.node(index))
    }

    /// Draws the current node's box, plus its children's boxes when it is
    /// an internal node.
    pub fn draw_boxes(&self, bvh: &Bvh) {
        if let Some(node) = self.current_node(bvh) {
            draw_aabb_wires(node.aabb(), YELLOW);
            if let NodeKind::Internal { left_child } = node.kind() {
                draw_aabb_wires(bvh.node(left_child).aabb(), GREEN);
                draw_aabb_wires(bvh.node(left_child + 1).aabb(), SKYBLUE);
            }
        }
    }

    /// Draws the navigation UI overlay.
    pub fn draw_ui(&self, bvh: &Bvh, y_offset: f32) {
        let (summary, is_leaf) = match self.current_index(bvh) {
            Some(index) => {
                let node = bvh.node(index);
                let summary = match node.kind() {
                    NodeKind::Leaf { first, count } => {
                        format!("Node {}: leaf over indices {}..{}", index, first, first + count)
                    }
                    NodeKind::Internal { left_child } => {
                        format!("Node {}: children {} and {}", index, left_child, left_child + 1)
                    }
                };
                (summary, node.is_leaf())
            }
            None => ("No hierarchy built".to_string(), true),
        };

        // Build path string
        let path_str = if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path
                .iter()
                .map(|d| match d {
                    Direction::Left => "L",
                    Direction::Right => "R",
                })
                .collect::<Vec<_>>()
                .join(" -> ")
        };

        draw_text(&summary, 10.0, y_offset, 18.0, WHITE);
        draw_text(
            &format!("Path: {} (depth {})", path_str, self.path.len()),
            10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );
        draw_text(
            if is_leaf {
                "(leaf)"
            } else {
                "[Q] left child | [E] right child"
            },
            10.0,
            y_offset + 40.0,
            18.0,
            if is_leaf { ORANGE } else { GREEN },
        );
        draw_text("[P]arent | [R]oot", 10.0, y_offset + 60.0, 16.0, DARKGRAY);
    }
}
