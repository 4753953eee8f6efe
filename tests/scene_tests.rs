//! Scene Integration Tests
//!
//! Tests for:
//! - Hierarchy: attach/detach, cycle rejection, child ordering
//! - Bookkeeping: light list and viewer tracking invariants
//! - Duplication: deep clone with shared asset references
//! - Render lists: sky item, geometry/shadow population

use vireo::assets::AssetServer;
use vireo::scene::NodeHandle;
use vireo::{Light, Material, Mesh, NodeKind, RenderItemKind, RenderLayer, Scene, Viewer, create_box};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_scene() -> Scene {
    Scene::new(AssetServer::new())
}

/// Registers a unit box and a default material, returns a mesh node.
fn add_box_mesh(scene: &mut Scene) -> NodeHandle {
    let geometry = scene.assets().add_geometry(create_box(1.0, 1.0, 1.0));
    let material = scene.assets().add_material(Material::new("Default"));
    scene.add_mesh(Mesh::new(geometry, material))
}

// ============================================================================
// Hierarchy: Attach / Detach
// ============================================================================

#[test]
fn attach_detach_leaves_sibling_order_unchanged() {
    let mut scene = new_scene();
    let a = scene.add_empty("a");
    let b = scene.add_empty("b");

    let before: Vec<_> = scene.get_node(scene.root()).unwrap().children().to_vec();

    let c = scene.add_empty("c");
    scene.detach(c);

    let after: Vec<_> = scene.get_node(scene.root()).unwrap().children().to_vec();
    assert_eq!(before, after);
    assert_eq!(after, vec![a, b]);
}

#[test]
fn attach_appends_as_last_child() {
    let mut scene = new_scene();
    let a = scene.add_empty("a");
    let b = scene.add_empty("b");

    // Re-attaching an existing child moves it to the end.
    scene.attach(a, scene.root());
    let children = scene.get_node(scene.root()).unwrap().children().to_vec();
    assert_eq!(children, vec![b, a]);
}

#[test]
fn attach_to_descendant_is_rejected() {
    init_logger();
    let mut scene = new_scene();
    let a = scene.add_empty("a");
    let b = scene.add_empty_to_parent("b", a);

    // `a` is an ancestor of `b`; this would create a cycle.
    scene.attach(a, b);

    assert_eq!(scene.get_node(a).unwrap().parent(), Some(scene.root()));
    assert!(!scene.get_node(b).unwrap().children().contains(&a));
}

#[test]
fn attach_to_self_is_noop() {
    let mut scene = new_scene();
    let a = scene.add_empty("a");
    scene.attach(a, a);
    assert_eq!(scene.get_node(a).unwrap().parent(), Some(scene.root()));
}

#[test]
fn root_cannot_be_reparented_or_removed() {
    let mut scene = new_scene();
    let a = scene.add_empty("a");
    let root = scene.root();

    scene.attach(root, a);
    assert_eq!(scene.get_node(root).unwrap().parent(), None);

    scene.remove_node(root);
    assert!(scene.get_node(root).is_some());
}

#[test]
fn detach_keeps_subtree_alive() {
    let mut scene = new_scene();
    let a = scene.add_empty("a");
    let b = scene.add_empty_to_parent("b", a);

    scene.detach(a);

    // Still in the arena, no longer under the root.
    assert!(scene.get_node(a).is_some());
    assert!(scene.get_node(b).is_some());
    assert_eq!(scene.get_node(a).unwrap().parent(), None);
    assert!(!scene.is_in_tree(a));

    // An undo layer can bring it back.
    scene.attach(a, scene.root());
    assert!(scene.is_in_tree(b));
}

#[test]
fn remove_node_destroys_subtree() {
    let mut scene = new_scene();
    let a = scene.add_empty("a");
    let b = scene.add_empty_to_parent("b", a);
    let c = scene.add_empty_to_parent("c", b);

    scene.remove_node(a);

    assert!(scene.get_node(a).is_none());
    assert!(scene.get_node(b).is_none());
    assert!(scene.get_node(c).is_none());

    // Second removal of the same handle is a no-op.
    scene.remove_node(a);
}

// ============================================================================
// Light Bookkeeping
// ============================================================================

#[test]
fn light_list_tracks_single_reference() {
    let mut scene = new_scene();
    let light = scene.add_light(Light::new_point(glam::Vec3::ONE, 1.0, 40.0));

    assert_eq!(scene.lights(), &[light]);

    scene.remove_node(light);
    assert!(scene.lights().is_empty());

    // Removing twice must not panic or change anything.
    scene.remove_node(light);
    assert!(scene.lights().is_empty());
}

#[test]
fn lights_keep_insertion_order() {
    let mut scene = new_scene();
    let l1 = scene.add_light(Light::new_directional(glam::Vec3::ONE, 1.0));
    let l2 = scene.add_light(Light::new_point(glam::Vec3::ONE, 1.0, 40.0));
    let l3 = scene.add_light(Light::new_spot(glam::Vec3::ONE, 1.0, 40.0, 0.3, 0.5));

    assert_eq!(scene.lights(), &[l1, l2, l3]);

    scene.remove_node(l2);
    assert_eq!(scene.lights(), &[l1, l3]);
}

#[test]
fn detached_subtree_unregisters_its_lights() {
    let mut scene = new_scene();
    let group = scene.add_empty("group");
    let light = scene.add_light_to_parent(Light::new_point(glam::Vec3::ONE, 1.0, 40.0), group);

    assert_eq!(scene.lights(), &[light]);

    scene.detach(group);
    assert!(scene.lights().is_empty());

    // Re-attaching registers the light again.
    scene.attach(group, scene.root());
    assert_eq!(scene.lights(), &[light]);
}

// ============================================================================
// Viewer Tracking
// ============================================================================

#[test]
fn first_viewer_wins() {
    let mut scene = new_scene();
    let v1 = scene.add_viewer(Viewer::new());
    let _v2 = scene.add_viewer(Viewer::new());

    assert_eq!(scene.vr_viewer(), Some(v1));
}

#[test]
fn viewer_removal_does_not_promote_second() {
    let mut scene = new_scene();
    let v1 = scene.add_viewer(Viewer::new());
    let v2 = scene.add_viewer(Viewer::new());

    scene.remove_node(v1);

    // The second viewer node is still a valid tree member, but the scene
    // does not promote it: the tracked viewer stays cleared until a viewer
    // is added again. This mirrors the long-standing editor behavior.
    assert!(scene.is_in_tree(v2));
    assert_eq!(scene.vr_viewer(), None);
}

// ============================================================================
// Duplication
// ============================================================================

#[test]
fn duplicate_adds_one_sibling_sharing_assets() {
    let mut scene = new_scene();
    let mesh_node = add_box_mesh(&mut scene);

    let before = scene.get_node(scene.root()).unwrap().children().len();
    let dup = scene.duplicate(mesh_node).expect("mesh node is duplicable");
    let after = scene.get_node(scene.root()).unwrap().children().len();

    assert_eq!(after, before + 1);

    // Fresh identity, shared geometry and material references.
    assert_ne!(
        scene.get_node(dup).unwrap().uuid(),
        scene.get_node(mesh_node).unwrap().uuid()
    );
    let src = scene.get_mesh(mesh_node).unwrap();
    let cloned = scene.get_mesh(dup).unwrap();
    assert_eq!(src.geometry, cloned.geometry);
    assert_eq!(src.material, cloned.material);
}

#[test]
fn duplicate_clones_whole_subtree() {
    let mut scene = new_scene();
    let group = scene.add_empty("group");
    let light = scene.add_light_to_parent(Light::new_point(glam::Vec3::ONE, 1.0, 40.0), group);

    let dup = scene.duplicate(group).unwrap();
    let dup_children = scene.get_node(dup).unwrap().children().to_vec();

    assert_eq!(dup_children.len(), 1);
    let dup_light = dup_children[0];
    assert_ne!(dup_light, light);
    assert_eq!(scene.get_node(dup_light).unwrap().kind(), NodeKind::Light);

    // The cloned light registers with the scene like any other.
    assert_eq!(scene.lights().len(), 2);
}

#[test]
fn non_duplicable_node_is_refused() {
    init_logger();
    let mut scene = new_scene();
    let a = scene.add_empty("a");
    scene.node(a).set_duplicable(false);

    assert!(scene.duplicate(a).is_none());

    // Nothing was inserted.
    assert_eq!(scene.get_node(scene.root()).unwrap().children().len(), 1);
}

// ============================================================================
// Render Lists
// ============================================================================

#[test]
fn update_without_camera_appends_exactly_one_sky_item() {
    let mut scene = new_scene();
    scene.update(0.016);

    assert_eq!(scene.geometry_list().len(), 1);
    let sky = &scene.geometry_list()[0];
    assert_eq!(sky.kind, RenderItemKind::Background);
    assert_eq!(sky.layer, RenderLayer::Background);
}

#[test]
fn mesh_nodes_populate_geometry_list() {
    let mut scene = new_scene();
    let mesh_node = add_box_mesh(&mut scene);

    scene.update(0.016);
    assert_eq!(scene.geometry_list().len(), 2);

    scene.remove_node(mesh_node);
    scene.update(0.016);
    assert_eq!(scene.geometry_list().len(), 1);
    assert_eq!(scene.geometry_list()[0].kind, RenderItemKind::Background);
}

#[test]
fn render_lists_are_rebuilt_not_accumulated() {
    let mut scene = new_scene();
    add_box_mesh(&mut scene);

    scene.update(0.016);
    scene.update(0.016);
    scene.update(0.016);

    assert_eq!(scene.geometry_list().len(), 2);
}

#[test]
fn shadow_list_follows_cast_shadows_flag() {
    let mut scene = new_scene();
    let mesh_node = add_box_mesh(&mut scene);

    scene.update(0.016);
    assert_eq!(scene.shadow_list().len(), 1);

    scene.node(mesh_node).set_cast_shadows(false);
    scene.update(0.016);
    assert!(scene.shadow_list().is_empty());
}

#[test]
fn invisible_node_hides_its_subtree() {
    let mut scene = new_scene();
    let group = scene.add_empty("group");
    let geometry = scene.assets().add_geometry(create_box(1.0, 1.0, 1.0));
    let material = scene.assets().add_material(Material::new("Default"));
    scene.add_mesh_to_parent(Mesh::new(geometry, material), group);

    scene.update(0.016);
    assert_eq!(scene.geometry_list().len(), 2);

    scene.node(group).set_visible(false);
    scene.update(0.016);
    assert_eq!(scene.geometry_list().len(), 1);
}

// ============================================================================
// Environment & Bindings
// ============================================================================

#[test]
fn sky_color_writes_through_to_material() {
    let mut scene = new_scene();
    let color = vireo::Color::gray(72);
    scene.set_sky_color(color);

    assert_eq!(scene.sky().color, color);
    let material = scene.assets().materials.get(scene.sky().material()).unwrap();
    assert_eq!(material.base_color, color);
}

#[test]
fn sky_texture_set_and_clear() {
    let mut scene = new_scene();
    let texture = scene
        .assets()
        .add_texture(vireo::Texture::new("Sky", "skies/default.png", 1024, 512));

    scene.set_sky_texture(texture);
    assert_eq!(scene.sky().texture, Some(texture));

    scene.clear_sky_texture();
    assert_eq!(scene.sky().texture, None);
    let material = scene.assets().materials.get(scene.sky().material()).unwrap();
    assert!(material.texture.is_none());
}

#[test]
fn removing_active_camera_clears_binding() {
    let mut scene = new_scene();
    let cam = scene.add_camera(vireo::Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 1000.0));
    scene.set_active_camera(Some(cam));

    scene.remove_node(cam);
    assert_eq!(scene.active_camera(), None);

    // Update stays defensive with a cleared camera.
    scene.update(0.016);
}

#[test]
fn find_by_name_matches_first() {
    let mut scene = new_scene();
    let a = scene.add_empty("Ground");
    assert_eq!(scene.find_by_name("Ground"), Some(a));
    assert_eq!(scene.find_by_name("Nope"), None);
}

#[test]
fn scenes_get_unique_ids() {
    let s1 = new_scene();
    let s2 = new_scene();
    assert_ne!(s1.id, s2.id);
}
