use glam::Vec4;
use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGBA color.
///
/// The editor works in integer channels (0–255); consumers that need
/// normalized floats convert through [`Color::to_vec4`]. No validation
/// beyond the channel type itself is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Uniform gray (`v`, `v`, `v`, 255).
    #[inline]
    #[must_use]
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Normalized RGBA in [0, 1].
    #[must_use]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        )
    }

    /// Builds a color from normalized floats, clamping to [0, 1].
    #[must_use]
    pub fn from_vec4(v: Vec4) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: q(v.x),
            g: q(v.y),
            b: q(v.z),
            a: q(v.w),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_roundtrips_through_vec4() {
        let c = Color::rgba(72, 96, 250, 255);
        let back = Color::from_vec4(c.to_vec4());
        assert_eq!(c, back);
    }

    #[test]
    fn from_vec4_clamps() {
        let c = Color::from_vec4(Vec4::new(2.0, -1.0, 0.5, 1.0));
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 0);
    }
}
