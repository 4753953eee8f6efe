//! Environment state owned by the scene: sky, fog, ambient and outline.
//!
//! These settings are scene-global — independent of any single node — and
//! every field is exposed through plain getters/setters on `Scene` so a
//! persistence writer can snapshot them and a reader can restore them.

use crate::assets::{GeometryHandle, MaterialHandle, TextureHandle};
use crate::resources::color::Color;

/// Sky backdrop: a unit dome mesh drawn at the background layer, tinted by
/// `color` and optionally textured.
#[derive(Debug, Clone)]
pub struct Sky {
    pub(crate) geometry: GeometryHandle,
    pub(crate) material: MaterialHandle,
    pub color: Color,
    pub texture: Option<TextureHandle>,
}

impl Sky {
    #[must_use]
    pub(crate) fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            geometry,
            material,
            color: Color::WHITE,
            texture: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    #[inline]
    #[must_use]
    pub fn material(&self) -> MaterialHandle {
        self.material
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub start: f32,
    pub end: f32,
    pub enabled: bool,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            color: Color::rgb(250, 250, 250),
            start: 100.0,
            end: 180.0,
            enabled: true,
        }
    }
}

/// Selection-outline post effect settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub width: u32,
    pub color: Color,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            width: 6,
            color: Color::rgb(255, 255, 0),
        }
    }
}

/// Default ambient term for freshly created scenes.
#[must_use]
pub fn default_ambient() -> Color {
    Color::gray(64)
}
