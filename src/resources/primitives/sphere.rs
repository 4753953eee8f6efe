use std::f32::consts::PI;

use crate::resources::geometry::Geometry;

pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
        }
    }
}

/// Builds a UV sphere (Y-up, latitude rings from the south pole).
///
/// The unit sphere with default segments doubles as the sky dome: the
/// renderer draws it inside-out at the background layer.
#[must_use]
pub fn create_sphere(options: SphereOptions) -> Geometry {
    let radius = options.radius;
    let width_segments = options.width_segments.max(3);
    let height_segments = options.height_segments.max(2);

    let mut geo = Geometry::new("Sphere");

    for y in 0..=height_segments {
        let v = y as f32 / height_segments as f32;
        // latitude angle: 0 at the south pole, PI at the north pole
        let theta = v * PI;

        let py = -radius * theta.cos();
        let ring_radius = radius * theta.sin();

        for x in 0..=width_segments {
            let u = x as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;

            let px = ring_radius * phi.cos();
            let pz = ring_radius * phi.sin();

            geo.positions.push([px, py, pz]);
            let n = glam::Vec3::new(px, py, pz).normalize_or_zero();
            geo.normals.push([n.x, n.y, n.z]);
            geo.uvs.push([u, 1.0 - v]);
        }
    }

    let ring = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let a = y * ring + x;
            let b = (y + 1) * ring + x;
            let c = (y + 1) * ring + x + 1;
            let d = y * ring + x + 1;

            if y != 0 {
                geo.indices.extend_from_slice(&[a, b, d]);
            }
            if y != height_segments - 1 {
                geo.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    geo.compute_bounding_volume();
    geo
}
