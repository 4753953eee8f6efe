use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Affine3A, Mat4};
use slotmap::SlotMap;

use crate::assets::{AssetServer, TextureHandle};
use crate::resources::color::Color;
use crate::resources::geometry::BoundingBox;
use crate::resources::mesh::Mesh;
use crate::resources::primitives::{SphereOptions, create_sphere};
use crate::resources::material::Material;
use crate::scene::camera::Camera;
use crate::scene::environment::{self, Fog, Outline, Sky};
use crate::scene::light::Light;
use crate::scene::node::{Node, NodeContent, NodeKind};
use crate::scene::particles::ParticleSystem;
use crate::scene::render_list::{self, RenderItem, RenderItemKind, RenderLayer};
use crate::scene::transform_system;
use crate::scene::viewer::Viewer;
use crate::scene::wrapper::SceneNode;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle, ParticleKey, ViewerKey};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// The scene: node arena, component pools, environment state and the
/// per-frame render lists.
///
/// One scene exists per open project. All mutation happens on the main
/// thread between frames — the graph performs no locking of its own.
///
/// Structural operations are defensive: a stale handle, a cycle-creating
/// re-parent or a double removal logs and does nothing, because a failed
/// editor action must not crash the session.
pub struct Scene {
    pub id: u32,

    assets: AssetServer,

    nodes: SlotMap<NodeHandle, Node>,
    root: NodeHandle,

    // ==== Component pools ====
    pub(crate) meshes: SlotMap<MeshKey, Mesh>,
    pub(crate) cameras: SlotMap<CameraKey, Camera>,
    pub(crate) lights: SlotMap<LightKey, Light>,
    pub(crate) viewers: SlotMap<ViewerKey, Viewer>,
    pub(crate) particles: SlotMap<ParticleKey, ParticleSystem>,

    // ==== Environment ====
    sky: Sky,
    fog: Fog,
    ambient_color: Color,
    outline: Outline,

    // ==== Bindings ====
    /// The camera the viewport renders through. Not validated against the
    /// tree; callers own that.
    active_camera: Option<NodeHandle>,
    /// First viewer node added to the tree. Not re-assigned when another
    /// viewer exists at removal time.
    vr_viewer: Option<NodeHandle>,
    /// Light nodes currently in the rooted tree, insertion order.
    /// Maintained synchronously on every structural mutation.
    light_nodes: Vec<NodeHandle>,

    // ==== Per-frame output ====
    geometry_list: Vec<RenderItem>,
    shadow_list: Vec<RenderItem>,
}

impl Default for Scene {
    /// An empty scene with its own private asset server.
    fn default() -> Self {
        Self::new(AssetServer::new())
    }
}

impl Scene {
    /// Creates an empty scene: a root "World" node, a white sky dome,
    /// near-white fog from 100 to 180 and a dark-gray ambient term.
    #[must_use]
    pub fn new(assets: AssetServer) -> Self {
        let mut nodes = SlotMap::with_key();

        let mut root_node = Node::new("World");
        // The root is plumbing: never picked, cloned or shadow-cast.
        root_node.flags = crate::scene::node::NodeFlags::empty();
        let root = nodes.insert(root_node);

        let sky_geometry = assets.add_geometry(create_sphere(SphereOptions::default()));
        let sky_material = assets.add_material(Material::with_color("Sky", Color::WHITE));

        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            assets,
            nodes,
            root,
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            viewers: SlotMap::with_key(),
            particles: SlotMap::with_key(),
            sky: Sky::new(sky_geometry, sky_material),
            fog: Fog::default(),
            ambient_color: environment::default_ambient(),
            outline: Outline::default(),
            active_camera: None,
            vr_viewer: None,
            light_nodes: Vec::new(),
            geometry_list: Vec::with_capacity(render_list::RENDER_LIST_RESERVE),
            shadow_list: Vec::with_capacity(render_list::RENDER_LIST_RESERVE),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn assets(&self) -> &AssetServer {
        &self.assets
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Chainable mutation wrapper; every call no-ops on a stale handle.
    pub fn node(&mut self, handle: NodeHandle) -> SceneNode<'_> {
        SceneNode::new(self, handle)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node whose name matches, if any. Names are not unique.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(handle, _)| handle)
    }

    // ========================================================================
    // Checked kind casts
    // ========================================================================

    #[must_use]
    pub fn get_mesh(&self, handle: NodeHandle) -> Option<&Mesh> {
        match self.nodes.get(handle)?.content {
            NodeContent::Mesh(key) => self.meshes.get(key),
            _ => None,
        }
    }

    pub fn get_mesh_mut(&mut self, handle: NodeHandle) -> Option<&mut Mesh> {
        match self.nodes.get(handle)?.content {
            NodeContent::Mesh(key) => self.meshes.get_mut(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_light(&self, handle: NodeHandle) -> Option<&Light> {
        match self.nodes.get(handle)?.content {
            NodeContent::Light(key) => self.lights.get(key),
            _ => None,
        }
    }

    pub fn get_light_mut(&mut self, handle: NodeHandle) -> Option<&mut Light> {
        match self.nodes.get(handle)?.content {
            NodeContent::Light(key) => self.lights.get_mut(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_camera(&self, handle: NodeHandle) -> Option<&Camera> {
        match self.nodes.get(handle)?.content {
            NodeContent::Camera(key) => self.cameras.get(key),
            _ => None,
        }
    }

    pub fn get_camera_mut(&mut self, handle: NodeHandle) -> Option<&mut Camera> {
        match self.nodes.get(handle)?.content {
            NodeContent::Camera(key) => self.cameras.get_mut(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_viewer(&self, handle: NodeHandle) -> Option<&Viewer> {
        match self.nodes.get(handle)?.content {
            NodeContent::Viewer(key) => self.viewers.get(key),
            _ => None,
        }
    }

    pub fn get_viewer_mut(&mut self, handle: NodeHandle) -> Option<&mut Viewer> {
        match self.nodes.get(handle)?.content {
            NodeContent::Viewer(key) => self.viewers.get_mut(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_particle_system(&self, handle: NodeHandle) -> Option<&ParticleSystem> {
        match self.nodes.get(handle)?.content {
            NodeContent::ParticleSystem(key) => self.particles.get(key),
            _ => None,
        }
    }

    pub fn get_particle_system_mut(&mut self, handle: NodeHandle) -> Option<&mut ParticleSystem> {
        match self.nodes.get(handle)?.content {
            NodeContent::ParticleSystem(key) => self.particles.get_mut(key),
            _ => None,
        }
    }

    // ========================================================================
    // Factories
    // ========================================================================

    pub fn add_empty(&mut self, name: &str) -> NodeHandle {
        let root = self.root;
        self.add_empty_to_parent(name, root)
    }

    pub fn add_empty_to_parent(&mut self, name: &str, parent: NodeHandle) -> NodeHandle {
        self.insert_node(Node::new(name), parent)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let root = self.root;
        self.add_mesh_to_parent(mesh, root)
    }

    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let name = mesh.name.clone();
        let key = self.meshes.insert(mesh);
        self.insert_node(Node::with_content(&name, NodeContent::Mesh(key)), parent)
    }

    pub fn add_light(&mut self, light: Light) -> NodeHandle {
        let root = self.root;
        self.add_light_to_parent(light, root)
    }

    pub fn add_light_to_parent(&mut self, light: Light, parent: NodeHandle) -> NodeHandle {
        let key = self.lights.insert(light);
        self.insert_node(Node::with_content("Light", NodeContent::Light(key)), parent)
    }

    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let root = self.root;
        self.add_camera_to_parent(camera, root)
    }

    pub fn add_camera_to_parent(&mut self, camera: Camera, parent: NodeHandle) -> NodeHandle {
        let key = self.cameras.insert(camera);
        self.insert_node(Node::with_content("Camera", NodeContent::Camera(key)), parent)
    }

    pub fn add_viewer(&mut self, viewer: Viewer) -> NodeHandle {
        let root = self.root;
        self.add_viewer_to_parent(viewer, root)
    }

    pub fn add_viewer_to_parent(&mut self, viewer: Viewer, parent: NodeHandle) -> NodeHandle {
        let key = self.viewers.insert(viewer);
        self.insert_node(Node::with_content("Viewer", NodeContent::Viewer(key)), parent)
    }

    pub fn add_particle_system(&mut self, system: ParticleSystem) -> NodeHandle {
        let root = self.root;
        self.add_particle_system_to_parent(system, root)
    }

    pub fn add_particle_system_to_parent(
        &mut self,
        system: ParticleSystem,
        parent: NodeHandle,
    ) -> NodeHandle {
        let key = self.particles.insert(system);
        self.insert_node(
            Node::with_content("Particle System", NodeContent::ParticleSystem(key)),
            parent,
        )
    }

    fn insert_node(&mut self, node: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.attach(handle, parent);
        handle
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Re-parents `child` under `parent`, appending it as the last child.
    /// The child's local transform is kept as-is (its world pose follows the
    /// new parent); use [`attach_keep_world`] to preserve the world pose.
    ///
    /// Rejected as a logged no-op: stale handles, self-attach, re-parenting
    /// the root, and any attach that would make a node its own ancestor.
    ///
    /// [`attach_keep_world`]: Scene::attach_keep_world
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach a node to itself");
            return;
        }
        if child == self.root {
            log::warn!("Cannot re-parent the root node");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::warn!("Attach with stale node handle ignored");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Attach rejected: would create a cycle");
            return;
        }

        let was_in_tree = self.is_in_tree(child);

        // Detach from the old parent, if any.
        self.unlink(child);

        // Link to the new one.
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }

        let now_in_tree = self.is_in_tree(child);
        if !was_in_tree && now_in_tree {
            self.register_subtree(child);
        } else if was_in_tree && !now_in_tree {
            self.unregister_subtree(child);
        }
    }

    /// Re-parents `child` under `parent` while preserving its world pose:
    /// the local transform is recomputed against the new parent so the node
    /// does not visually jump. Same rejection rules as [`Scene::attach`].
    pub fn attach_keep_world(&mut self, child: NodeHandle, parent: NodeHandle) {
        let (Some(child_world), Some(parent_world)) =
            (self.world_matrix_of(child), self.world_matrix_of(parent))
        else {
            log::warn!("Attach with stale node handle ignored");
            return;
        };

        self.attach(child, parent);

        // Only adjust if the attach actually happened.
        if let Some(node) = self.nodes.get_mut(child)
            && node.parent == Some(parent)
        {
            node.transform
                .apply_local_matrix(parent_world.inverse() * child_world);
        }
    }

    /// Unlinks `node` (and with it the whole subtree) from its parent.
    ///
    /// The subtree stays alive in the scene, owner-less, so an undo layer
    /// can re-attach it later; lights and the tracked viewer inside it are
    /// unregistered immediately. Destroying the subtree for good is
    /// [`Scene::remove_node`]. Detaching the root or an already-detached
    /// node is a no-op.
    pub fn detach(&mut self, node: NodeHandle) {
        if node == self.root {
            log::warn!("Cannot detach the root node");
            return;
        }
        let Some(n) = self.nodes.get(node) else {
            return;
        };
        if n.parent.is_none() {
            return;
        }

        if self.is_in_tree(node) {
            self.unregister_subtree(node);
        }
        self.unlink(node);
    }

    /// Destroys `node` and its entire subtree: components are removed from
    /// their pools and the nodes are freed. A second removal of the same
    /// handle is a no-op. The root cannot be removed.
    pub fn remove_node(&mut self, node: NodeHandle) {
        if node == self.root {
            log::warn!("Cannot remove the root node");
            return;
        }
        if !self.nodes.contains_key(node) {
            return;
        }

        if self.is_in_tree(node) {
            self.unregister_subtree(node);
        }
        self.unlink(node);

        // Collect the subtree, then free bottom-up state in one sweep.
        let mut doomed = Vec::new();
        let mut stack = vec![node];
        while let Some(handle) = stack.pop() {
            if let Some(n) = self.nodes.get(handle) {
                stack.extend_from_slice(&n.children);
                doomed.push(handle);
            }
        }

        for handle in doomed {
            if self.active_camera == Some(handle) {
                self.active_camera = None;
            }
            if let Some(n) = self.nodes.remove(handle) {
                match n.content {
                    NodeContent::Empty => {}
                    NodeContent::Mesh(key) => {
                        self.meshes.remove(key);
                    }
                    NodeContent::Light(key) => {
                        self.lights.remove(key);
                    }
                    NodeContent::Camera(key) => {
                        self.cameras.remove(key);
                    }
                    NodeContent::Viewer(key) => {
                        self.viewers.remove(key);
                    }
                    NodeContent::ParticleSystem(key) => {
                        self.particles.remove(key);
                    }
                }
            }
        }
    }

    /// Deep-clones `source`'s subtree and inserts the clone as its sibling
    /// (or under the root if the source is detached).
    ///
    /// Clones get fresh identities; geometry, material and texture handles
    /// are shared with the source, not copied. Returns `None` when the
    /// source is not duplicable or the handle is stale.
    pub fn duplicate(&mut self, source: NodeHandle) -> Option<NodeHandle> {
        let src = self.nodes.get(source)?;
        if !src.is_duplicable() {
            log::warn!("Node '{}' is not duplicable", src.name);
            return None;
        }
        let parent = src.parent.unwrap_or(self.root);

        let clone = self.clone_subtree(source)?;
        self.attach(clone, parent);
        Some(clone)
    }

    fn clone_subtree(&mut self, source: NodeHandle) -> Option<NodeHandle> {
        let src = self.nodes.get(source)?;

        let mut clone = Node::with_content(&src.name, NodeContent::Empty);
        clone.transform = src.transform.clone();
        clone.visible = src.visible;
        clone.flags = src.flags;
        clone.animation = src.animation.clone();
        clone.content = match src.content {
            NodeContent::Empty => NodeContent::Empty,
            NodeContent::Mesh(key) => {
                let component = self.meshes.get(key)?.clone();
                NodeContent::Mesh(self.meshes.insert(component))
            }
            NodeContent::Light(key) => {
                let component = self.lights.get(key)?.duplicate();
                NodeContent::Light(self.lights.insert(component))
            }
            NodeContent::Camera(key) => {
                let mut component = self.cameras.get(key)?.clone();
                component.uuid = uuid::Uuid::new_v4();
                NodeContent::Camera(self.cameras.insert(component))
            }
            NodeContent::Viewer(key) => {
                let mut component = self.viewers.get(key)?.clone();
                component.uuid = uuid::Uuid::new_v4();
                NodeContent::Viewer(self.viewers.insert(component))
            }
            NodeContent::ParticleSystem(key) => {
                let component = self.particles.get(key)?.duplicate();
                NodeContent::ParticleSystem(self.particles.insert(component))
            }
        };

        let clone_handle = self.nodes.insert(clone);

        let source_children = self.nodes.get(source)?.children.clone();
        for child in source_children {
            if let Some(child_clone) = self.clone_subtree(child) {
                if let Some(c) = self.nodes.get_mut(child_clone) {
                    c.parent = Some(clone_handle);
                }
                if let Some(p) = self.nodes.get_mut(clone_handle) {
                    p.children.push(child_clone);
                }
            }
        }

        Some(clone_handle)
    }

    /// True when `ancestor` appears on `node`'s parent chain (or is the
    /// node itself).
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    /// True when `node`'s parent chain reaches the root.
    #[must_use]
    pub fn is_in_tree(&self, node: NodeHandle) -> bool {
        self.is_ancestor(self.root, node)
    }

    /// World transform computed fresh from the TRS chain — independent of
    /// the cached per-frame pass, so it is valid mid-edit.
    #[must_use]
    pub fn world_matrix_of(&self, node: NodeHandle) -> Option<Affine3A> {
        self.nodes.get(node)?;

        let mut matrix = Affine3A::IDENTITY;
        let mut current = Some(node);
        while let Some(handle) = current {
            let n = self.nodes.get(handle)?;
            let local = Affine3A::from_scale_rotation_translation(
                n.transform.scale,
                n.transform.rotation,
                n.transform.position,
            );
            matrix = local * matrix;
            current = n.parent;
        }
        Some(matrix)
    }

    fn unlink(&mut self, child: NodeHandle) {
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent
            && let Some(parent_node) = self.nodes.get_mut(p)
            && let Some(i) = parent_node.children.iter().position(|&c| c == child)
        {
            parent_node.children.remove(i);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
    }

    // ========================================================================
    // Light / viewer bookkeeping
    // ========================================================================
    // Updated synchronously on every structural mutation: O(1)-ish work per
    // add/remove instead of a full traversal per frame.

    fn register_subtree(&mut self, subtree: NodeHandle) {
        let mut stack = vec![subtree];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            stack.extend_from_slice(&node.children);

            match node.kind() {
                NodeKind::Light => {
                    if !self.light_nodes.contains(&handle) {
                        self.light_nodes.push(handle);
                    }
                }
                NodeKind::Viewer => {
                    // First viewer wins; later ones stay plain tree members.
                    if self.vr_viewer.is_none() {
                        self.vr_viewer = Some(handle);
                    }
                }
                _ => {}
            }
        }
    }

    fn unregister_subtree(&mut self, subtree: NodeHandle) {
        let mut stack = vec![subtree];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            stack.extend_from_slice(&node.children);

            match node.kind() {
                NodeKind::Light => {
                    if let Some(i) = self.light_nodes.iter().position(|&l| l == handle) {
                        self.light_nodes.remove(i);
                    }
                }
                NodeKind::Viewer => {
                    // No promotion of a remaining viewer node.
                    if self.vr_viewer == Some(handle) {
                        self.vr_viewer = None;
                    }
                }
                _ => {}
            }
        }
    }

    // ========================================================================
    // Bindings
    // ========================================================================

    /// Rebinds the viewport camera. Membership in this scene's tree is the
    /// caller's responsibility.
    pub fn set_active_camera(&mut self, camera: Option<NodeHandle>) {
        self.active_camera = camera;
    }

    #[inline]
    #[must_use]
    pub fn active_camera(&self) -> Option<NodeHandle> {
        self.active_camera
    }

    #[inline]
    #[must_use]
    pub fn vr_viewer(&self) -> Option<NodeHandle> {
        self.vr_viewer
    }

    /// Light nodes currently in the tree, in insertion order.
    #[inline]
    #[must_use]
    pub fn lights(&self) -> &[NodeHandle] {
        &self.light_nodes
    }

    // ========================================================================
    // Environment
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn sky(&self) -> &Sky {
        &self.sky
    }

    pub fn set_sky_color(&mut self, color: Color) {
        self.sky.color = color;
        self.assets
            .materials
            .modify(self.sky.material, |m| m.base_color = color);
    }

    pub fn set_sky_texture(&mut self, texture: TextureHandle) {
        self.sky.texture = Some(texture);
        self.assets
            .materials
            .modify(self.sky.material, |m| m.texture = Some(texture));
    }

    /// Clears the sky texture binding, releasing the held reference.
    pub fn clear_sky_texture(&mut self) {
        self.sky.texture = None;
        self.assets
            .materials
            .modify(self.sky.material, |m| m.texture = None);
    }

    #[inline]
    #[must_use]
    pub fn fog(&self) -> &Fog {
        &self.fog
    }

    pub fn set_fog(&mut self, fog: Fog) {
        self.fog = fog;
    }

    #[inline]
    #[must_use]
    pub fn ambient_color(&self) -> Color {
        self.ambient_color
    }

    pub fn set_ambient_color(&mut self, color: Color) {
        self.ambient_color = color;
    }

    #[inline]
    #[must_use]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn set_outline_width(&mut self, width: u32) {
        self.outline.width = width;
    }

    pub fn set_outline_color(&mut self, color: Color) {
        self.outline.color = color;
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Advances the scene by `dt` seconds: kind-specific state (particle
    /// systems), then the transform hierarchy, then the active camera's
    /// matrices, then the render lists. The sky item is appended every
    /// frame; everything else in the lists is rebuilt from the tree.
    pub fn update(&mut self, dt: f32) {
        for (_, system) in &mut self.particles {
            system.update(dt);
        }

        transform_system::update_hierarchy(&mut self.nodes, &mut self.cameras, self.root);

        // The active camera is not always part of the hierarchy (editor
        // fly-cam), so its matrices are refreshed explicitly.
        if let Some(cam_handle) = self.active_camera {
            if let Some(NodeContent::Camera(key)) =
                self.nodes.get(cam_handle).map(Node::content)
                && let Some(camera) = self.cameras.get_mut(key)
            {
                camera.update_projection_matrix();
            }
            transform_system::update_subtree(&mut self.nodes, &mut self.cameras, cam_handle);
        }

        self.geometry_list.clear();
        self.shadow_list.clear();
        render_list::build_lists(
            &self.nodes,
            &self.meshes,
            self.root,
            &mut self.geometry_list,
            &mut self.shadow_list,
        );

        // The sky is always drawn as the backdrop.
        self.geometry_list.push(RenderItem {
            kind: RenderItemKind::Background,
            geometry: self.sky.geometry,
            material: self.sky.material,
            world_matrix: Mat4::IDENTITY,
            layer: RenderLayer::Background,
        });
    }

    /// Samples every node's keyframe animation at playhead `time` and
    /// writes the result into its transform. The next [`Scene::update`]
    /// propagates the new poses.
    pub fn update_animation(&mut self, time: f32) {
        for (_, node) in &mut self.nodes {
            let Node {
                animation,
                transform,
                ..
            } = node;
            let Some(anim) = animation else {
                continue;
            };

            let t = anim.local_time(time);
            if let Some(track) = &anim.position
                && let Some(v) = track.sample(t)
            {
                transform.position = v;
            }
            if let Some(track) = &anim.rotation
                && let Some(v) = track.sample(t)
            {
                transform.rotation = v;
            }
            if let Some(track) = &anim.scale
                && let Some(v) = track.sample(t)
            {
                transform.scale = v;
            }
        }
    }

    /// Geometry items produced by the last [`Scene::update`]. Consume
    /// immediately — the list is rebuilt next frame.
    #[inline]
    #[must_use]
    pub fn geometry_list(&self) -> &[RenderItem] {
        &self.geometry_list
    }

    /// Shadow-caster items produced by the last [`Scene::update`].
    #[inline]
    #[must_use]
    pub fn shadow_list(&self) -> &[RenderItem] {
        &self.shadow_list
    }

    // ========================================================================
    // Editor queries
    // ========================================================================

    /// World-space bounds of `node`'s subtree, from mesh bounding boxes and
    /// the world matrices of the last update pass. `None` when the subtree
    /// contains no geometry.
    #[must_use]
    pub fn bounding_box_of(&self, node: NodeHandle) -> Option<BoundingBox> {
        let mut combined = self.bounding_box_of_one(node);

        let n = self.nodes.get(node)?;
        for &child in &n.children {
            if let Some(child_box) = self.bounding_box_of(child) {
                combined = match combined {
                    Some(existing) => Some(existing.union(&child_box)),
                    None => Some(child_box),
                };
            }
        }

        combined
    }

    fn bounding_box_of_one(&self, node: NodeHandle) -> Option<BoundingBox> {
        let n = self.nodes.get(node)?;
        let NodeContent::Mesh(mesh_key) = n.content else {
            return None;
        };
        let mesh = self.meshes.get(mesh_key)?;
        let geometry = self.assets.geometries.get(mesh.geometry)?;
        let local = *geometry.bounding_box()?;
        Some(local.transform(n.transform.world_matrix()))
    }
}
