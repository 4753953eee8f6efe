//! Transform & Camera Integration Tests
//!
//! Tests for:
//! - World matrix propagation through the hierarchy
//! - Dirty tracking across structural edits
//! - Keep-world re-parenting
//! - Active camera view/projection refresh

use glam::Vec3;
use vireo::assets::AssetServer;
use vireo::{Camera, Scene};

fn new_scene() -> Scene {
    Scene::new(AssetServer::new())
}

// ============================================================================
// World Matrix Propagation
// ============================================================================

#[test]
fn world_positions_compose_parent_before_child() {
    let mut scene = new_scene();
    let parent = scene.add_empty("parent");
    let child = scene.add_empty_to_parent("child", parent);

    scene.node(parent).set_position(1.0, 0.0, 0.0);
    scene.node(child).set_position(0.0, 2.0, 0.0);
    scene.update(0.016);

    let world = scene.get_node(child).unwrap().transform.world_matrix().translation;
    assert!((world.x - 1.0).abs() < 1e-5);
    assert!((world.y - 2.0).abs() < 1e-5);
}

#[test]
fn scale_propagates_to_children() {
    let mut scene = new_scene();
    let parent = scene.add_empty("parent");
    let child = scene.add_empty_to_parent("child", parent);

    scene.node(parent).set_scale(2.0);
    scene.node(child).set_position(1.0, 0.0, 0.0);
    scene.update(0.016);

    let world = scene.get_node(child).unwrap().transform.world_matrix().translation;
    assert!((world.x - 2.0).abs() < 1e-5);
}

#[test]
fn moving_parent_after_update_moves_child() {
    let mut scene = new_scene();
    let parent = scene.add_empty("parent");
    let child = scene.add_empty_to_parent("child", parent);

    scene.update(0.016);

    scene.node(parent).set_position(0.0, 0.0, 3.0);
    scene.update(0.016);

    let world = scene.get_node(child).unwrap().transform.world_matrix().translation;
    assert!((world.z - 3.0).abs() < 1e-5);
}

#[test]
fn world_matrix_of_is_fresh_without_update() {
    let mut scene = new_scene();
    let parent = scene.add_empty("parent");
    let child = scene.add_empty_to_parent("child", parent);

    scene.node(parent).set_position(1.0, 1.0, 1.0);
    scene.node(child).set_position(1.0, 0.0, 0.0);

    // No update pass has run; the query composes from TRS directly.
    let world = scene.world_matrix_of(child).unwrap().translation;
    assert!((world.x - 2.0).abs() < 1e-5);
    assert!((world.y - 1.0).abs() < 1e-5);
}

// ============================================================================
// Dirty Tracking
// ============================================================================

#[test]
fn attach_marks_child_transform_dirty() {
    let mut scene = new_scene();
    let parent = scene.add_empty("parent");
    let child = scene.add_empty("child");

    // Consume the initial dirty state.
    scene
        .get_node_mut(child)
        .unwrap()
        .transform
        .update_local_matrix();

    scene.attach(child, parent);

    assert!(
        scene
            .get_node_mut(child)
            .unwrap()
            .transform
            .update_local_matrix(),
        "attach should mark the child transform dirty"
    );
}

#[test]
fn unchanged_transform_reports_clean() {
    let mut scene = new_scene();
    let node = scene.add_empty("n");
    scene.update(0.016);

    assert!(
        !scene
            .get_node_mut(node)
            .unwrap()
            .transform
            .update_local_matrix()
    );
}

// ============================================================================
// Keep-World Re-parenting
// ============================================================================

#[test]
fn attach_keep_world_preserves_world_pose() {
    let mut scene = new_scene();
    let platform = scene.add_empty("platform");
    let crate_node = scene.add_empty("crate");

    scene.node(platform).set_position(5.0, 0.0, 0.0);
    scene.node(crate_node).set_position(1.0, 2.0, 3.0);

    scene.attach_keep_world(crate_node, platform);
    scene.update(0.016);

    // World position unchanged, local position re-expressed.
    let world = scene
        .get_node(crate_node)
        .unwrap()
        .transform
        .world_matrix()
        .translation;
    assert!((Vec3::from(world) - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-4);

    let local = scene.get_node(crate_node).unwrap().transform.position;
    assert!((local - Vec3::new(-4.0, 2.0, 3.0)).length() < 1e-4);
}

#[test]
fn plain_attach_keeps_local_pose() {
    let mut scene = new_scene();
    let platform = scene.add_empty("platform");
    let crate_node = scene.add_empty("crate");

    scene.node(platform).set_position(5.0, 0.0, 0.0);
    scene.node(crate_node).set_position(1.0, 0.0, 0.0);

    scene.attach(crate_node, platform);
    scene.update(0.016);

    let world = scene
        .get_node(crate_node)
        .unwrap()
        .transform
        .world_matrix()
        .translation;
    assert!((world.x - 6.0).abs() < 1e-5);
}

// ============================================================================
// Active Camera
// ============================================================================

#[test]
fn active_camera_view_follows_node_transform() {
    let mut scene = new_scene();
    let cam = scene.add_camera(Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 1000.0));
    scene.node(cam).set_position(0.0, 0.0, 10.0);
    scene.set_active_camera(Some(cam));

    scene.update(0.016);

    let camera = scene.get_camera(cam).unwrap();
    // View is the inverse of the node's world transform.
    let view_translation = camera.view_matrix().w_axis;
    assert!((view_translation.z - (-10.0)).abs() < 1e-4);
}

#[test]
fn detached_camera_still_updates_when_active() {
    let mut scene = new_scene();
    let cam = scene.add_camera(Camera::new_perspective(60.0, 1.0, 0.1, 100.0));
    scene.set_active_camera(Some(cam));
    scene.detach(cam);

    scene.node(cam).set_position(3.0, 0.0, 0.0);
    scene.update(0.016);

    let camera = scene.get_camera(cam).unwrap();
    assert!((camera.view_matrix().w_axis.x - (-3.0)).abs() < 1e-4);
}

#[test]
fn non_camera_binding_is_harmless() {
    let mut scene = new_scene();
    let empty = scene.add_empty("not a camera");
    scene.set_active_camera(Some(empty));

    // Defensive no-op: the update pass must not fail.
    scene.update(0.016);
    assert_eq!(scene.active_camera(), Some(empty));
}
