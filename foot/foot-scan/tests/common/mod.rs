//! Synthetic foot clouds shared by the integration tests.

#![allow(dead_code)]

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use foot_types::Vertex;

/// Floor height used by every scenario.
pub const FLOOR_Y: f64 = 0.10;

/// Surface samples of an ellipsoid whose underside touches `FLOOR_Y`.
///
/// `length` runs along z and `width` along x before rotating by `yaw` about
/// the vertical axis through `(cx, cz)`. `phase` offsets the longitude of
/// every sample so successive batches see different points of the surface.
#[allow(clippy::too_many_arguments)]
pub fn ellipsoid(
    cx: f64,
    cz: f64,
    length: f64,
    width: f64,
    height: f64,
    yaw: f64,
    phase: f64,
    per_ring: usize,
) -> Vec<Vertex> {
    let rings = 15;
    let (rx, ry, rz) = (width / 2.0, height / 2.0, length / 2.0);
    let cy = FLOOR_Y + ry;
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let mut points = Vec::with_capacity(rings * per_ring);
    for i in 0..rings {
        let lat = -FRAC_PI_2 + PI * i as f64 / (rings - 1) as f64;
        for j in 0..per_ring {
            let lon = phase + TAU * j as f64 / per_ring as f64;
            let x = rx * lat.cos() * lon.cos();
            let z = rz * lat.cos() * lon.sin();
            points.push(Vertex::from_coords(
                cx + x * cos_yaw - z * sin_yaw,
                cy + ry * lat.sin(),
                cz + x * sin_yaw + z * cos_yaw,
            ));
        }
    }
    points
}

/// A 27 × 10 × 10 cm foot at the origin.
pub fn reference_foot(yaw: f64, phase: f64) -> Vec<Vertex> {
    ellipsoid(0.0, 0.0, 0.27, 0.10, 0.10, yaw, phase, 32)
}
