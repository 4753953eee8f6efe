pub mod color;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod texture;

pub use color::Color;
pub use geometry::{BoundingBox, Geometry};
pub use material::Material;
pub use mesh::Mesh;
pub use texture::Texture;
