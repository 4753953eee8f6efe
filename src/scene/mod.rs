//! Scene graph system.
//!
//! Manages the node hierarchy and its components:
//! - `Node`: one entry in the scene tree (transform + kind payload)
//! - `Transform`: TRS component with cached local/world matrices
//! - `Scene`: node arena, component pools, environment state, render lists
//! - `Camera` / `Light` / `Viewer` / `ParticleSystem`: kind components
//! - `transform_system` / `render_list`: decoupled per-frame passes
//! - `SceneManager`: project-level scene lifecycle

pub mod animation;
pub mod camera;
pub mod environment;
pub mod light;
pub mod manager;
pub mod node;
pub mod particles;
pub mod render_list;
pub mod scene;
pub mod snapshot;
pub mod transform;
pub mod transform_system;
pub mod viewer;
pub mod wrapper;

pub use animation::{KeyframeTrack, TransformAnimation};
pub use camera::{Camera, ProjectionType};
pub use environment::{Fog, Outline, Sky};
pub use light::{Light, LightKind};
pub use manager::{SceneHandle, SceneManager};
pub use node::{Node, NodeContent, NodeFlags, NodeKind};
pub use particles::ParticleSystem;
pub use render_list::{RenderItem, RenderItemKind, RenderLayer};
pub use scene::Scene;
pub use snapshot::SceneSnapshot;
pub use transform::Transform;
pub use viewer::Viewer;
pub use wrapper::SceneNode;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
    pub struct ViewerKey;
    pub struct ParticleKey;
}
