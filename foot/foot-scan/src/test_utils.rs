//! Synthetic foot-shaped point clouds for tests.

use std::f64::consts::{FRAC_PI_2, TAU};

use foot_types::Vertex;

/// Surface samples of an ellipsoid resting on the floor.
///
/// `length` runs along world z and `width` along world x before the cloud is
/// rotated by `yaw` radians about the vertical axis through `center`. With an
/// odd `rings` and `per_ring` divisible by four the extreme points of both
/// horizontal axes are sampled exactly.
pub(crate) fn ellipsoid(
    center: [f64; 3],
    length: f64,
    width: f64,
    height: f64,
    rings: usize,
    per_ring: usize,
    yaw: f64,
) -> Vec<Vertex> {
    let (rx, ry, rz) = (width / 2.0, height / 2.0, length / 2.0);
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let mut points = Vec::with_capacity(rings * per_ring);
    for i in 0..rings {
        let lat = -FRAC_PI_2 + std::f64::consts::PI * i as f64 / (rings - 1) as f64;
        for j in 0..per_ring {
            let lon = TAU * j as f64 / per_ring as f64;
            let x = rx * lat.cos() * lon.cos();
            let z = rz * lat.cos() * lon.sin();
            let y = ry * lat.sin();
            points.push(Vertex::from_coords(
                center[0] + x * cos_yaw - z * sin_yaw,
                center[1] + y,
                center[2] + x * sin_yaw + z * cos_yaw,
            ));
        }
    }
    points
}

/// The reference foot: 27 cm × 10 cm × 10 cm, sitting on a floor at
/// `y = 0.10`.
pub(crate) fn reference_foot(yaw: f64) -> Vec<Vertex> {
    ellipsoid([0.0, 0.15, 0.0], 0.27, 0.10, 0.10, 15, 32, yaw)
}
