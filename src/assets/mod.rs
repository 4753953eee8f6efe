//! Shared asset server.
//!
//! Geometries, materials and textures are reference-shared across nodes:
//! any number of mesh nodes may point at the same handle, and a duplicated
//! subtree shares its source's assets instead of copying them. The server
//! itself is `Arc`-cloneable so every open scene can hold the same one.

pub mod storage;

use std::sync::Arc;

use slotmap::new_key_type;

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::resources::texture::Texture;
use storage::AssetStorage;

// Strongly-typed handles
new_key_type! {
    pub struct GeometryHandle;
    pub struct MaterialHandle;
    pub struct TextureHandle;
}

#[derive(Clone)]
pub struct AssetServer {
    pub geometries: Arc<AssetStorage<GeometryHandle, Geometry>>,
    pub materials: Arc<AssetStorage<MaterialHandle, Material>>,
    pub textures: Arc<AssetStorage<TextureHandle, Texture>>,
}

impl Default for AssetServer {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            geometries: Arc::new(AssetStorage::new()),
            materials: Arc::new(AssetStorage::new()),
            textures: Arc::new(AssetStorage::new()),
        }
    }

    // Registration goes through the uuid path so snapshots can resolve
    // their asset references back to live handles.

    pub fn add_geometry(&self, geometry: Geometry) -> GeometryHandle {
        self.geometries.add_with_uuid(geometry.uuid, geometry)
    }

    pub fn add_material(&self, material: Material) -> MaterialHandle {
        self.materials.add_with_uuid(material.uuid, material)
    }

    pub fn add_texture(&self, texture: Texture) -> TextureHandle {
        self.textures.add_with_uuid(texture.uuid, texture)
    }
}
