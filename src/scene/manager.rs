use slotmap::{SlotMap, new_key_type};

use crate::assets::AssetServer;
use crate::resources::color::Color;
use crate::resources::material::Material;
use crate::resources::mesh::Mesh;
use crate::resources::primitives::{PlaneOptions, create_plane};
use crate::scene::light::{self, Light};
use crate::scene::scene::Scene;

new_key_type! {
    pub struct SceneHandle;
}

/// Scene lifecycle subsystem.
///
/// One scene exists per open project; opening a project creates it,
/// closing the project removes it (releasing every node). All scenes share
/// the manager's asset server.
pub struct SceneManager {
    assets: AssetServer,
    scenes: SlotMap<SceneHandle, Scene>,
    active_scene: Option<SceneHandle>,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new(AssetServer::new())
    }
}

impl SceneManager {
    #[must_use]
    pub fn new(assets: AssetServer) -> Self {
        Self {
            assets,
            scenes: SlotMap::with_key(),
            active_scene: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn assets(&self) -> &AssetServer {
        &self.assets
    }

    /// Creates a new empty scene, returning its handle.
    pub fn create_scene(&mut self) -> SceneHandle {
        self.scenes.insert(Scene::new(self.assets.clone()))
    }

    /// Removes a scene, releasing all of its nodes.
    pub fn remove_scene(&mut self, handle: SceneHandle) {
        if self.active_scene == Some(handle) {
            self.active_scene = None;
            log::warn!("Active scene was removed; no scene is active now");
        }
        self.scenes.remove(handle);
    }

    /// Sets the active scene.
    pub fn set_active(&mut self, handle: SceneHandle) {
        if self.scenes.contains_key(handle) {
            self.active_scene = Some(handle);
        } else {
            log::error!("Attempted to set a stale SceneHandle as active");
        }
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<SceneHandle> {
        self.active_scene
    }

    #[must_use]
    pub fn get_scene(&self, handle: SceneHandle) -> Option<&Scene> {
        self.scenes.get(handle)
    }

    pub fn get_scene_mut(&mut self, handle: SceneHandle) -> Option<&mut Scene> {
        self.scenes.get_mut(handle)
    }

    #[must_use]
    pub fn active_scene(&self) -> Option<&Scene> {
        self.active_scene.and_then(|h| self.scenes.get(h))
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.active_scene.and_then(|h| self.scenes.get_mut(h))
    }

    /// Synthesizes the default scene for a new project and makes it
    /// active: a ground plane, one directional light, one point light and
    /// muted gray sky/ambient/fog.
    pub fn new_project(&mut self) -> SceneHandle {
        let handle = self.create_scene();
        self.set_active(handle);

        let assets = self.assets.clone();
        let scene = self
            .scenes
            .get_mut(handle)
            .expect("scene created a moment ago");

        scene.set_sky_color(Color::gray(72));
        scene.set_ambient_color(Color::gray(96));
        let mut fog = *scene.fog();
        fog.color = Color::gray(72);
        scene.set_fog(fog);

        let ground_geometry = assets.add_geometry(create_plane(PlaneOptions {
            width: 20.0,
            depth: 20.0,
            ..PlaneOptions::default()
        }));
        let ground_material = assets.add_material(Material::with_color("Ground", Color::gray(180)));
        let ground = scene.add_mesh(Mesh::new(ground_geometry, ground_material));
        scene
            .node(ground)
            .set_name("Ground")
            .set_pickable(false)
            .set_cast_shadows(false);

        let dlight = scene.add_light(Light::new_directional(glam::Vec3::ONE, 1.0));
        scene
            .node(dlight)
            .set_name("Directional Light")
            .set_position(4.0, 4.0, 0.0)
            .set_rotation_euler(15f32.to_radians(), 0.0, 0.0);

        let plight = scene.add_light(Light::new_point(
            glam::Vec3::ONE,
            1.0,
            light::DEFAULT_POINT_RANGE,
        ));
        scene
            .node(plight)
            .set_name("Point Light")
            .set_position(-4.0, 4.0, 0.0);

        handle
    }
}
