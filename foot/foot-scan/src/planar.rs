//! Horizontal-plane helpers shared by aggregation and measurement.

use foot_types::{Point2, Vertex};

/// Axis-aligned bounds of points projected onto the `(x, z)` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlanarBounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl PlanarBounds {
    /// Bounds of a point set, or `None` when empty.
    pub fn of(points: &[Vertex]) -> Option<Self> {
        let first = points.first()?.planar();
        let init = Self {
            min: first,
            max: first,
        };
        Some(points.iter().skip(1).fold(init, |mut b, v| {
            let p = v.planar();
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
            b
        }))
    }

    /// Span along world x.
    pub fn extent_x(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Span along world z.
    pub fn extent_z(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Mean `(x, z)` of a point set. `None` when empty.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn planar_centroid(points: &[Vertex]) -> Option<Point2<f64>> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sz) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sz), v| (sx + v.x(), sz + v.z()));
    Some(Point2::new(sx / n, sz / n))
}
