#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod assets;
pub mod errors;
pub mod resources;
pub mod scene;

pub use assets::{AssetServer, GeometryHandle, MaterialHandle, TextureHandle};
pub use errors::{Result, VireoError};
pub use resources::primitives::*;
pub use resources::{BoundingBox, Color, Geometry, Material, Mesh, Texture};
pub use scene::{
    Camera, Fog, Light, LightKind, Node, NodeContent, NodeFlags, NodeKind, Outline,
    ParticleSystem, RenderItem, RenderItemKind, RenderLayer, Scene, SceneManager, SceneSnapshot,
    Sky, Transform, Viewer,
};
