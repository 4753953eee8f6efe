//! Snapshot & Project Lifecycle Tests
//!
//! Tests for:
//! - Snapshot round-trip through serde_json
//! - Asset uuid resolution failures
//! - Default-project synthesis via SceneManager

use glam::Vec3;
use vireo::assets::AssetServer;
use vireo::scene::SceneManager;
use vireo::{
    Camera, Color, Light, Material, Mesh, NodeKind, ParticleSystem, Scene, SceneSnapshot, Viewer,
    create_box,
};

fn build_sample_scene(assets: &AssetServer) -> Scene {
    let mut scene = Scene::new(assets.clone());

    let geometry = assets.add_geometry(create_box(1.0, 1.0, 1.0));
    let material = assets.add_material(Material::new("Crate"));

    let group = scene.add_empty("Props");
    let mesh = scene.add_mesh_to_parent(Mesh::new(geometry, material), group);
    scene.node(mesh).set_name("Crate").set_position(1.0, 0.5, -2.0);

    scene.add_light(Light::new_spot(Vec3::ONE, 2.0, 30.0, 0.3, 0.6));

    let cam = scene.add_camera(Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 500.0));
    scene.set_active_camera(Some(cam));

    scene.add_viewer(Viewer::new());
    scene.add_particle_system(ParticleSystem::new());

    scene.set_sky_color(Color::gray(72));
    scene.set_ambient_color(Color::gray(96));
    scene.set_outline_width(4);

    scene
}

// ============================================================================
// Round-trip
// ============================================================================

#[test]
fn snapshot_roundtrips_through_json() {
    let assets = AssetServer::new();
    let scene = build_sample_scene(&assets);

    let snapshot = scene.to_snapshot().unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: SceneSnapshot = serde_json::from_str(&json).unwrap();

    let restored = Scene::from_snapshot(&parsed, &assets).unwrap();

    assert_eq!(restored.node_count(), scene.node_count());
    assert_eq!(restored.lights().len(), 1);
    assert!(restored.vr_viewer().is_some());
    assert_eq!(restored.ambient_color(), Color::gray(96));
    assert_eq!(restored.sky().color, Color::gray(72));
    assert_eq!(restored.outline().width, 4);
}

#[test]
fn snapshot_preserves_node_identity_and_pose() {
    let assets = AssetServer::new();
    let scene = build_sample_scene(&assets);
    let crate_handle = scene.find_by_name("Crate").unwrap();
    let crate_uuid = scene.get_node(crate_handle).unwrap().uuid();

    let snapshot = scene.to_snapshot().unwrap();
    let restored = Scene::from_snapshot(&snapshot, &assets).unwrap();

    let restored_crate = restored.find_by_name("Crate").unwrap();
    let node = restored.get_node(restored_crate).unwrap();
    assert_eq!(node.uuid(), crate_uuid);
    assert_eq!(node.kind(), NodeKind::Mesh);
    assert!((node.transform.position - Vec3::new(1.0, 0.5, -2.0)).length() < 1e-6);

    // The mesh references the same shared assets.
    let src_mesh = scene.get_mesh(crate_handle).unwrap();
    let restored_mesh = restored.get_mesh(restored_crate).unwrap();
    assert_eq!(src_mesh.geometry, restored_mesh.geometry);
    assert_eq!(src_mesh.material, restored_mesh.material);
}

#[test]
fn snapshot_restores_active_camera_binding() {
    let assets = AssetServer::new();
    let scene = build_sample_scene(&assets);

    let snapshot = scene.to_snapshot().unwrap();
    let restored = Scene::from_snapshot(&snapshot, &assets).unwrap();

    let cam = restored.active_camera().expect("camera binding restored");
    assert_eq!(restored.get_node(cam).unwrap().kind(), NodeKind::Camera);
}

#[test]
fn snapshot_restores_light_parameters() {
    let assets = AssetServer::new();
    let scene = build_sample_scene(&assets);

    let snapshot = scene.to_snapshot().unwrap();
    let restored = Scene::from_snapshot(&snapshot, &assets).unwrap();

    let light_handle = restored.lights()[0];
    let light = restored.get_light(light_handle).unwrap();
    assert!((light.intensity - 2.0).abs() < 1e-6);
    match &light.kind {
        vireo::LightKind::Spot(spot) => {
            assert!((spot.range - 30.0).abs() < 1e-6);
            assert!((spot.outer_cone - 0.6).abs() < 1e-6);
        }
        other => panic!("expected a spot light, got {other:?}"),
    }
}

#[test]
fn snapshot_skips_detached_subtrees() {
    let assets = AssetServer::new();
    let mut scene = Scene::new(assets.clone());
    let a = scene.add_empty("kept");
    let b = scene.add_empty("dropped");
    scene.detach(b);

    let snapshot = scene.to_snapshot().unwrap();

    // Root + the attached node only.
    assert_eq!(snapshot.nodes.len(), 2);
    assert!(snapshot.nodes.iter().any(|n| n.name == "kept"));
    assert!(snapshot.nodes.iter().all(|n| n.name != "dropped"));
    let _ = (a, b);
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn from_snapshot_fails_on_unknown_asset() {
    let assets = AssetServer::new();
    let scene = build_sample_scene(&assets);
    let snapshot = scene.to_snapshot().unwrap();

    // A different server has never seen these assets.
    let empty_assets = AssetServer::new();
    let result = Scene::from_snapshot(&snapshot, &empty_assets);

    assert!(matches!(result, Err(vireo::VireoError::AssetNotFound(_))));
}

// ============================================================================
// Default project
// ============================================================================

#[test]
fn new_project_builds_the_default_scene() {
    let mut manager = SceneManager::new(AssetServer::new());
    let handle = manager.new_project();

    assert_eq!(manager.active_handle(), Some(handle));

    let scene = manager.active_scene_mut().unwrap();
    assert_eq!(scene.get_node(scene.root()).unwrap().children().len(), 3);
    assert_eq!(scene.lights().len(), 2);
    assert_eq!(scene.ambient_color(), Color::gray(96));
    assert_eq!(scene.sky().color, Color::gray(72));
    assert_eq!(scene.fog().color, Color::gray(72));
    assert!(scene.fog().enabled);

    let ground = scene.find_by_name("Ground").unwrap();
    let ground_node = scene.get_node(ground).unwrap();
    assert!(!ground_node.is_pickable());
    assert!(!ground_node.casts_shadows());

    // Ground plane + sky in the geometry list; nothing casts shadows.
    scene.update(0.016);
    assert_eq!(scene.geometry_list().len(), 2);
    assert!(scene.shadow_list().is_empty());
}

#[test]
fn closing_the_active_project_clears_it() {
    let mut manager = SceneManager::new(AssetServer::new());
    let handle = manager.new_project();

    manager.remove_scene(handle);
    assert_eq!(manager.active_handle(), None);
    assert!(manager.active_scene().is_none());
}

#[test]
fn default_project_roundtrips() {
    let mut manager = SceneManager::new(AssetServer::new());
    manager.new_project();
    let scene = manager.active_scene().unwrap();

    let snapshot = scene.to_snapshot().unwrap();
    let restored = Scene::from_snapshot(&snapshot, manager.assets()).unwrap();

    assert_eq!(restored.node_count(), scene.node_count());
    assert_eq!(restored.lights().len(), 2);
    assert!(restored.find_by_name("Directional Light").is_some());
    assert!(restored.find_by_name("Point Light").is_some());
}
