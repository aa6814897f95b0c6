//! Ground plane reference.

use nalgebra::Matrix4;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World transform of a detected horizontal plane.
///
/// Only the vertical component of the translation is meaningful for
/// scanning; rotation and the horizontal offset are ignored.
///
/// # Example
///
/// ```
/// use foot_types::GroundTransform;
///
/// let t = GroundTransform::from_translation(1.0, 0.1, -2.0);
/// assert!((t.ground_y() - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundTransform {
    matrix: Matrix4<f64>,
}

impl GroundTransform {
    /// Wrap a 4×4 homogeneous world matrix.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// Pure translation transform.
    #[must_use]
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        let mut matrix = Matrix4::identity();
        matrix[(0, 3)] = x;
        matrix[(1, 3)] = y;
        matrix[(2, 3)] = z;
        Self { matrix }
    }

    /// Build from column-major `f32` columns, as handed over by mobile AR
    /// frameworks.
    #[must_use]
    pub fn from_f32_columns(columns: [[f32; 4]; 4]) -> Self {
        let matrix = Matrix4::from_fn(|row, col| f64::from(columns[col][row]));
        Self { matrix }
    }

    /// The wrapped matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Vertical component of the translation.
    #[must_use]
    pub fn ground_y(&self) -> f64 {
        self.matrix[(1, 3)]
    }
}

/// Height of the detected support surface.
///
/// Established at most once per scan session: the first detection wins and
/// later detections are ignored until the reference is cleared.
///
/// # Example
///
/// ```
/// use foot_types::GroundReference;
///
/// let mut ground = GroundReference::default();
/// assert!(!ground.is_established());
///
/// assert!(ground.establish(0.10));
/// assert!(!ground.establish(0.50));
/// assert!((ground.ground_y() - 0.10).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundReference {
    ground_y: f64,
    established: bool,
}

impl GroundReference {
    /// An already-established reference at `ground_y`.
    #[must_use]
    pub const fn at(ground_y: f64) -> Self {
        Self {
            ground_y,
            established: true,
        }
    }

    /// Whether a ground plane has been detected.
    #[must_use]
    pub const fn is_established(&self) -> bool {
        self.established
    }

    /// World up-coordinate of the surface. Zero until established.
    #[must_use]
    pub const fn ground_y(&self) -> f64 {
        self.ground_y
    }

    /// The surface height, if established.
    #[must_use]
    pub const fn height(&self) -> Option<f64> {
        if self.established {
            Some(self.ground_y)
        } else {
            None
        }
    }

    /// Record the surface height unless one is already set.
    ///
    /// Returns `true` if this call established the reference. A non-finite
    /// height is never recorded.
    pub fn establish(&mut self, ground_y: f64) -> bool {
        if self.established || !ground_y.is_finite() {
            return false;
        }
        self.ground_y = ground_y;
        self.established = true;
        true
    }

    /// Forget the surface.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
