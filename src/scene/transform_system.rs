//! Transform system.
//!
//! Propagates world matrices through the hierarchy, decoupled from `Scene`
//! so it borrows only the node arena and the camera pool. Traversal is
//! top-down — a parent's world matrix is final before any child reads it —
//! and iterative, so deep scenes cannot overflow the stack.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::camera::Camera;
use crate::scene::node::{Node, NodeContent};
use crate::scene::{CameraKey, NodeHandle};

/// Updates world matrices for the whole tree under `root`, refreshing the
/// view/projection of any camera component it passes.
pub fn update_hierarchy(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    root: NodeHandle,
) {
    // Work stack: (node, parent world matrix, parent changed this pass)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);
    stack.push((root, Affine3A::IDENTITY, false));

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);

            if let NodeContent::Camera(camera_key) = node.content
                && let Some(camera) = cameras.get_mut(camera_key)
            {
                camera.update_view_projection(&new_world);
            }
        }

        let current_world = node.transform.world_matrix;
        for i in (0..node.children.len()).rev() {
            let child = node.children[i];
            stack.push((child, current_world, world_needs_update));
        }
    }
}

/// Updates world matrices for the subtree rooted at `subtree_root`, seeding
/// from its parent's current world matrix. Used for local refreshes after
/// an edit when a full pass would be wasteful.
pub fn update_subtree(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    subtree_root: NodeHandle,
) {
    let Some(node) = nodes.get(subtree_root) else {
        return;
    };

    let parent_world = node
        .parent
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    let mut stack: Vec<(NodeHandle, Affine3A)> = vec![(subtree_root, parent_world)];

    while let Some((handle, parent_world)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        node.transform.update_local_matrix();
        let new_world = parent_world * *node.transform.local_matrix();
        node.transform.set_world_matrix(new_world);

        if let NodeContent::Camera(camera_key) = node.content
            && let Some(camera) = cameras.get_mut(camera_key)
        {
            camera.update_view_projection(&new_world);
        }

        for i in (0..node.children.len()).rev() {
            let child = node.children[i];
            stack.push((child, new_world));
        }
    }
}
