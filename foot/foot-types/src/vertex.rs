//! World-space vertex type.

use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::GroundReference;

/// A point delivered by the depth sensor, in world coordinates (metres).
///
/// Vertices carry no identity and are never mutated after capture. The
/// sensor hands over `f32` triples; they are widened to `f64` on entry so
/// that centroid and covariance sums do not lose precision.
///
/// # Example
///
/// ```
/// use foot_types::Vertex;
///
/// let v = Vertex::from([0.5f32, 0.25, -1.0]);
/// assert!((v.x() - 0.5).abs() < 1e-6);
/// assert!((v.planar().y + 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in world space.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Create a vertex from a position.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position }
    }

    /// Create a vertex from coordinates.
    #[inline]
    #[must_use]
    pub const fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    /// X coordinate.
    #[inline]
    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Vertical (up) coordinate.
    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Z coordinate.
    #[inline]
    #[must_use]
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Projection onto the horizontal plane as `(x, z)`.
    #[inline]
    #[must_use]
    pub fn planar(&self) -> Point2<f64> {
        Point2::new(self.position.x, self.position.z)
    }

    /// Signed height of this vertex above the ground surface.
    ///
    /// Negative values are below the floor.
    #[inline]
    #[must_use]
    pub fn height_above(&self, ground: &GroundReference) -> f64 {
        self.position.y - ground.ground_y()
    }

    /// True when every coordinate is finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::from_coords(f64::from(x), f64::from(y), f64::from(z))
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
