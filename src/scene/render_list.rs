//! Per-frame render-list construction.
//!
//! `Scene::update` flattens the node tree and the environment into two
//! ordered item lists: a general geometry list and a shadow-caster list.
//! Items only *tag* their layer — draw-order grouping is the renderer's
//! stable sort, not a pre-sort here. Both lists are rebuilt every frame
//! and must not be retained by the consumer across frames.

use glam::Mat4;
use slotmap::SlotMap;

use crate::assets::{GeometryHandle, MaterialHandle};
use crate::resources::mesh::Mesh;
use crate::scene::node::{Node, NodeContent};
use crate::scene::{MeshKey, NodeHandle};

/// Draw-order group. The renderer sorts items by this ordinal (stable), so
/// Background always precedes scene geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderLayer {
    Background = 0,
    Opaque = 1,
    Transparent = 2,
    Overlay = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderItemKind {
    /// Geometry contributed by a mesh node.
    Mesh,
    /// The scene's sky backdrop.
    Background,
}

/// A transient descriptor of one drawable for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderItem {
    pub kind: RenderItemKind,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub world_matrix: Mat4,
    pub layer: RenderLayer,
}

/// Capacity hint for the per-frame lists; they grow past this as needed.
pub(crate) const RENDER_LIST_RESERVE: usize = 1000;

/// Walks the tree from `root` and appends one geometry item per visible
/// mesh node, mirroring shadow casters into the shadow list.
///
/// An invisible node hides its whole subtree. Borrows only the node arena
/// and mesh pool so the scene can run it without aliasing its other state.
pub(crate) fn build_lists(
    nodes: &SlotMap<NodeHandle, Node>,
    meshes: &SlotMap<MeshKey, Mesh>,
    root: NodeHandle,
    geometry_list: &mut Vec<RenderItem>,
    shadow_list: &mut Vec<RenderItem>,
) {
    let mut stack: Vec<NodeHandle> = Vec::with_capacity(64);
    stack.push(root);

    while let Some(handle) = stack.pop() {
        let Some(node) = nodes.get(handle) else {
            continue;
        };
        if !node.visible {
            continue;
        }

        if let NodeContent::Mesh(mesh_key) = node.content
            && let Some(mesh) = meshes.get(mesh_key)
        {
            let item = RenderItem {
                kind: RenderItemKind::Mesh,
                geometry: mesh.geometry,
                material: mesh.material,
                world_matrix: node.transform.world_matrix_as_mat4(),
                layer: RenderLayer::Opaque,
            };
            geometry_list.push(item);
            if node.casts_shadows() {
                shadow_list.push(item);
            }
        }

        for &child in node.children().iter().rev() {
            stack.push(child);
        }
    }
}
