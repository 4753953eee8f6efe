//! Scene snapshot data model.
//!
//! The serializable form of a scene: one record per tree node (kind,
//! transform, name, flags, asset references by uuid) plus the environment
//! block. This is the contract the persistence layer consumes — actual
//! file or database I/O lives outside the core. A writer calls
//! [`Scene::to_snapshot`] and serializes the result; a reader deserializes
//! and calls [`Scene::from_snapshot`], which rebuilds the tree node by
//! node through the scene factories, resolving asset uuids against the
//! shared [`AssetServer`].

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assets::AssetServer;
use crate::errors::{Result, VireoError};
use crate::resources::color::Color;
use crate::resources::mesh::Mesh;
use crate::scene::camera::{Camera, ProjectionType};
use crate::scene::environment::Fog;
use crate::scene::light::{Light, LightKind};
use crate::scene::node::{NodeContent, NodeFlags};
use crate::scene::particles::ParticleSystem;
use crate::scene::scene::Scene;
use crate::scene::viewer::Viewer;
use crate::scene::NodeHandle;

/// Serialized environment state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    pub sky_color: Color,
    pub sky_texture: Option<Uuid>,
    pub fog_color: Color,
    pub fog_start: f32,
    pub fog_end: f32,
    pub fog_enabled: bool,
    pub ambient_color: Color,
    pub outline_width: u32,
    pub outline_color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LightKindRecord {
    Directional,
    Point { range: f32 },
    Spot { range: f32, inner_cone: f32, outer_cone: f32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ProjectionRecord {
    Perspective,
    Orthographic,
}

/// Kind tag plus kind-specific fields for one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KindRecord {
    Empty,
    Mesh {
        geometry: Uuid,
        material: Uuid,
        render_order: i32,
    },
    Light {
        color: Vec3,
        intensity: f32,
        kind: LightKindRecord,
    },
    Camera {
        projection: ProjectionRecord,
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
        ortho_size: f32,
    },
    Viewer {
        view_scale: f32,
    },
    ParticleSystem {
        emission_rate: f32,
        lifetime: f32,
        speed: f32,
        gravity_factor: f32,
        particle_scale: f32,
        random_rotation: bool,
    },
}

/// One tree node. `parent` is an index into [`SceneSnapshot::nodes`];
/// parents always precede their children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub uuid: Uuid,
    pub name: String,
    pub parent: Option<usize>,

    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub visible: bool,
    pub pickable: bool,
    pub cast_shadows: bool,
    pub duplicable: bool,

    pub kind: KindRecord,
}

/// The serializable form of an entire scene. Record 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub environment: EnvironmentRecord,
    /// Index of the active camera's record, when it is part of the tree.
    pub active_camera: Option<usize>,
    pub nodes: Vec<NodeRecord>,
}

impl Scene {
    /// Snapshots the rooted tree and environment. Detached subtrees are
    /// not part of a project file and are skipped.
    ///
    /// Fails with [`VireoError::AssetNotFound`] when a mesh references an
    /// asset that is no longer in the server.
    pub fn to_snapshot(&self) -> Result<SceneSnapshot> {
        let mut nodes = Vec::with_capacity(self.node_count());
        let mut indices: FxHashMap<NodeHandle, usize> = FxHashMap::default();

        // Depth-first from the root so parents precede children.
        let mut stack = vec![self.root()];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.get_node(handle) else {
                continue;
            };

            let parent = node.parent().map(|p| indices[&p]);
            let kind = self.kind_record_of(handle)?;

            indices.insert(handle, nodes.len());
            nodes.push(NodeRecord {
                uuid: node.uuid(),
                name: node.name.clone(),
                parent,
                position: node.transform.position,
                rotation: node.transform.rotation,
                scale: node.transform.scale,
                visible: node.visible,
                pickable: node.is_pickable(),
                cast_shadows: node.casts_shadows(),
                duplicable: node.is_duplicable(),
                kind,
            });

            for &child in node.children().iter().rev() {
                stack.push(child);
            }
        }

        let sky = self.sky();
        let sky_texture = match sky.texture {
            Some(handle) => Some(
                self.assets()
                    .textures
                    .get(handle)
                    .ok_or_else(|| VireoError::AssetNotFound("sky texture".into()))?
                    .uuid,
            ),
            None => None,
        };

        let fog = self.fog();
        let outline = self.outline();

        Ok(SceneSnapshot {
            environment: EnvironmentRecord {
                sky_color: sky.color,
                sky_texture,
                fog_color: fog.color,
                fog_start: fog.start,
                fog_end: fog.end,
                fog_enabled: fog.enabled,
                ambient_color: self.ambient_color(),
                outline_width: outline.width,
                outline_color: outline.color,
            },
            active_camera: self
                .active_camera()
                .and_then(|h| indices.get(&h).copied()),
            nodes,
        })
    }

    fn kind_record_of(&self, handle: NodeHandle) -> Result<KindRecord> {
        let Some(node) = self.get_node(handle) else {
            return Ok(KindRecord::Empty);
        };

        Ok(match node.content() {
            NodeContent::Empty => KindRecord::Empty,
            NodeContent::Mesh(_) => {
                let Some(mesh) = self.get_mesh(handle) else {
                    return Ok(KindRecord::Empty);
                };
                let geometry = self
                    .assets()
                    .geometries
                    .get(mesh.geometry)
                    .ok_or_else(|| {
                        VireoError::AssetNotFound(format!("geometry of '{}'", node.name))
                    })?
                    .uuid;
                let material = self
                    .assets()
                    .materials
                    .get(mesh.material)
                    .ok_or_else(|| {
                        VireoError::AssetNotFound(format!("material of '{}'", node.name))
                    })?
                    .uuid;
                KindRecord::Mesh {
                    geometry,
                    material,
                    render_order: mesh.render_order,
                }
            }
            NodeContent::Light(_) => {
                let Some(light) = self.get_light(handle) else {
                    return Ok(KindRecord::Empty);
                };
                KindRecord::Light {
                    color: light.color,
                    intensity: light.intensity,
                    kind: match &light.kind {
                        LightKind::Directional(_) => LightKindRecord::Directional,
                        LightKind::Point(p) => LightKindRecord::Point { range: p.range },
                        LightKind::Spot(s) => LightKindRecord::Spot {
                            range: s.range,
                            inner_cone: s.inner_cone,
                            outer_cone: s.outer_cone,
                        },
                    },
                }
            }
            NodeContent::Camera(_) => {
                let Some(camera) = self.get_camera(handle) else {
                    return Ok(KindRecord::Empty);
                };
                KindRecord::Camera {
                    projection: match camera.projection_type {
                        ProjectionType::Perspective => ProjectionRecord::Perspective,
                        ProjectionType::Orthographic => ProjectionRecord::Orthographic,
                    },
                    fov_degrees: camera.fov.to_degrees(),
                    aspect: camera.aspect,
                    near: camera.near,
                    far: camera.far,
                    ortho_size: camera.ortho_size,
                }
            }
            NodeContent::Viewer(_) => {
                let Some(viewer) = self.get_viewer(handle) else {
                    return Ok(KindRecord::Empty);
                };
                KindRecord::Viewer {
                    view_scale: viewer.view_scale,
                }
            }
            NodeContent::ParticleSystem(_) => {
                let Some(system) = self.get_particle_system(handle) else {
                    return Ok(KindRecord::Empty);
                };
                KindRecord::ParticleSystem {
                    emission_rate: system.emission_rate,
                    lifetime: system.lifetime,
                    speed: system.speed,
                    gravity_factor: system.gravity_factor,
                    particle_scale: system.particle_scale,
                    random_rotation: system.random_rotation,
                }
            }
        })
    }

    /// Rebuilds a scene from a snapshot, resolving asset uuids against
    /// `assets`. Node identities (uuids) are preserved.
    pub fn from_snapshot(snapshot: &SceneSnapshot, assets: &AssetServer) -> Result<Self> {
        let mut scene = Scene::new(assets.clone());

        let first = snapshot.nodes.first().ok_or(VireoError::SnapshotMissingRoot)?;
        if first.parent.is_some() {
            return Err(VireoError::SnapshotMissingRoot);
        }

        let mut handles: Vec<NodeHandle> = Vec::with_capacity(snapshot.nodes.len());

        // Record 0 maps onto the scene's own root.
        let root = scene.root();
        apply_record(&mut scene, root, first);
        handles.push(root);

        for (i, record) in snapshot.nodes.iter().enumerate().skip(1) {
            let parent_index = record.parent.unwrap_or(0);
            if parent_index >= handles.len() {
                return Err(VireoError::SnapshotParentOutOfBounds {
                    index: parent_index,
                    record: i,
                });
            }
            let parent = handles[parent_index];

            let handle = match &record.kind {
                KindRecord::Empty => scene.add_empty_to_parent(&record.name, parent),
                KindRecord::Mesh {
                    geometry,
                    material,
                    render_order,
                } => {
                    let geometry = assets
                        .geometries
                        .get_handle_by_uuid(geometry)
                        .ok_or_else(|| {
                            VireoError::AssetNotFound(format!("geometry of '{}'", record.name))
                        })?;
                    let material = assets
                        .materials
                        .get_handle_by_uuid(material)
                        .ok_or_else(|| {
                            VireoError::AssetNotFound(format!("material of '{}'", record.name))
                        })?;
                    let mut mesh = Mesh::new(geometry, material);
                    mesh.name = record.name.clone();
                    mesh.render_order = *render_order;
                    scene.add_mesh_to_parent(mesh, parent)
                }
                KindRecord::Light {
                    color,
                    intensity,
                    kind,
                } => {
                    let light = match kind {
                        LightKindRecord::Directional => Light::new_directional(*color, *intensity),
                        LightKindRecord::Point { range } => {
                            Light::new_point(*color, *intensity, *range)
                        }
                        LightKindRecord::Spot {
                            range,
                            inner_cone,
                            outer_cone,
                        } => Light::new_spot(*color, *intensity, *range, *inner_cone, *outer_cone),
                    };
                    scene.add_light_to_parent(light, parent)
                }
                KindRecord::Camera {
                    projection,
                    fov_degrees,
                    aspect,
                    near,
                    far,
                    ortho_size,
                } => {
                    let mut camera = match projection {
                        ProjectionRecord::Perspective => {
                            Camera::new_perspective(*fov_degrees, *aspect, *near, *far)
                        }
                        ProjectionRecord::Orthographic => {
                            Camera::new_orthographic(*ortho_size, *aspect, *near, *far)
                        }
                    };
                    camera.ortho_size = *ortho_size;
                    camera.update_projection_matrix();
                    scene.add_camera_to_parent(camera, parent)
                }
                KindRecord::Viewer { view_scale } => {
                    let mut viewer = Viewer::new();
                    viewer.view_scale = *view_scale;
                    scene.add_viewer_to_parent(viewer, parent)
                }
                KindRecord::ParticleSystem {
                    emission_rate,
                    lifetime,
                    speed,
                    gravity_factor,
                    particle_scale,
                    random_rotation,
                } => {
                    let mut system = ParticleSystem::new();
                    system.emission_rate = *emission_rate;
                    system.lifetime = *lifetime;
                    system.speed = *speed;
                    system.gravity_factor = *gravity_factor;
                    system.particle_scale = *particle_scale;
                    system.random_rotation = *random_rotation;
                    scene.add_particle_system_to_parent(system, parent)
                }
            };

            apply_record(&mut scene, handle, record);
            handles.push(handle);
        }

        // Environment.
        let env = &snapshot.environment;
        scene.set_sky_color(env.sky_color);
        if let Some(texture_uuid) = env.sky_texture {
            let texture = assets
                .textures
                .get_handle_by_uuid(&texture_uuid)
                .ok_or_else(|| VireoError::AssetNotFound("sky texture".into()))?;
            scene.set_sky_texture(texture);
        }
        scene.set_fog(Fog {
            color: env.fog_color,
            start: env.fog_start,
            end: env.fog_end,
            enabled: env.fog_enabled,
        });
        scene.set_ambient_color(env.ambient_color);
        scene.set_outline_width(env.outline_width);
        scene.set_outline_color(env.outline_color);

        if let Some(index) = snapshot.active_camera {
            if index < handles.len() {
                scene.set_active_camera(Some(handles[index]));
            } else {
                log::warn!("Snapshot active camera index out of range, ignored");
            }
        }

        Ok(scene)
    }
}

fn apply_record(scene: &mut Scene, handle: NodeHandle, record: &NodeRecord) {
    if let Some(node) = scene.get_node_mut(handle) {
        node.uuid = record.uuid;
        node.name = record.name.clone();
        node.transform.position = record.position;
        node.transform.rotation = record.rotation;
        node.transform.scale = record.scale;
        node.visible = record.visible;
        node.flags = NodeFlags::empty();
        node.flags.set(NodeFlags::PICKABLE, record.pickable);
        node.flags.set(NodeFlags::CAST_SHADOWS, record.cast_shadows);
        node.flags.set(NodeFlags::DUPLICABLE, record.duplicable);
    }
}
