use crate::assets::{GeometryHandle, MaterialHandle};

/// Mesh component: a geometry/material pair placed in the scene by a node.
///
/// The handles reference shared assets — duplicating a mesh node clones
/// this component but not the geometry or material behind it.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    pub geometry: GeometryHandle,
    pub material: MaterialHandle,

    /// Draw-order bias within a render layer (higher draws later).
    pub render_order: i32,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material,
            render_order: 0,
        }
    }

    /// Swaps the material binding, keeping everything else.
    pub fn set_material(&mut self, material: MaterialHandle) {
        self.material = material;
    }
}
