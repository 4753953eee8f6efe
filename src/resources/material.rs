use uuid::Uuid;

use crate::assets::TextureHandle;
use crate::resources::color::Color;

/// Surface description referenced by mesh nodes.
///
/// Materials are shared assets: many nodes may reference the same handle,
/// and duplicating a node shares the material rather than copying it. The
/// sky material is an ordinary `Material` held (by handle) by the scene;
/// `set_sky_color`/`set_sky_texture` write through to it.
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: String,

    pub base_color: Color,
    /// Optional diffuse texture binding (None = untextured).
    pub texture: Option<TextureHandle>,
    /// Tiling factor applied to the texture UVs.
    pub texture_scale: f32,
    pub double_sided: bool,
}

impl Material {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            base_color: Color::WHITE,
            texture: None,
            texture_scale: 1.0,
            double_sided: false,
        }
    }

    #[must_use]
    pub fn with_color(name: &str, color: Color) -> Self {
        let mut m = Self::new(name);
        m.base_color = color;
        m
    }
}
