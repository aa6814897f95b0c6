//! Oriented foot measurement from accumulated points.
//!
//! The foot is not assumed to be aligned with world x/z, so extents are
//! measured along the principal axes of the horizontal point distribution:
//!
//! 1. Keep points inside the height band above the floor (when known).
//! 2. Compute the planar centroid and the 2×2 covariance of `(x, z)`.
//! 3. Take the larger eigenvalue in closed form and its eigenvector as the
//!    length axis; its perpendicular is the width axis.
//! 4. Project every point onto both axes; the spans are length and width.
//!
//! An axis-aligned box would overestimate both spans whenever the foot is
//! rotated in the scanning plane; the principal-axis spans do not change.

use foot_types::{FootMeasurement, FootSide, GroundReference, Point2, Vector2, Vertex};
use nalgebra::Matrix2;
use tracing::{debug, warn};

use crate::aggregator::PointSnapshot;
use crate::error::{ScanError, ScanResult};
use crate::params::ScanParams;
use crate::planar::planar_centroid;

const CM_PER_M: f64 = 100.0;

/// Length and width directions in the horizontal `(x, z)` plane.
///
/// Vector components are `(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    /// Unit direction of greatest variance (heel to toe).
    pub major: Vector2<f64>,
    /// Unit direction perpendicular to `major`.
    pub minor: Vector2<f64>,
    /// Variance along `major`.
    pub major_variance: f64,
    /// True when the covariance had no dominant direction and world axes
    /// were substituted (z for length, x for width).
    pub degenerate: bool,
}

impl PrincipalAxes {
    /// World z as length, world x as width.
    #[must_use]
    pub fn world() -> Self {
        Self {
            major: Vector2::new(0.0, 1.0),
            minor: Vector2::new(1.0, 0.0),
            major_variance: 0.0,
            degenerate: true,
        }
    }

    /// Principal axes of a symmetric 2×2 covariance matrix.
    ///
    /// Uses the half-trace/discriminant closed form for the larger
    /// eigenvalue. If the resulting eigenvector has a norm below `epsilon`
    /// the world axes are returned instead.
    #[must_use]
    pub fn from_covariance(cov: &Matrix2<f64>, epsilon: f64) -> Self {
        let (a, b, c) = (cov[(0, 0)], cov[(0, 1)], cov[(1, 1)]);
        let half_trace = 0.5 * (a + c);
        // sqrt(half_trace² - det), written without the cancellation.
        let disc = (0.5 * (a - c)).hypot(b);
        let lambda = half_trace + disc;

        // Both rows of (cov - λI) give an eigenvector; take the better
        // conditioned one.
        let v1 = Vector2::new(lambda - c, b);
        let v2 = Vector2::new(b, lambda - a);
        let v = if v1.norm_squared() >= v2.norm_squared() { v1 } else { v2 };

        let norm = v.norm();
        if !norm.is_finite() || norm < epsilon {
            return Self {
                major_variance: lambda.max(0.0),
                ..Self::world()
            };
        }

        let major = v / norm;
        Self {
            major,
            minor: Vector2::new(major.y, -major.x),
            major_variance: lambda,
            degenerate: false,
        }
    }
}

/// A successful extraction with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The validated measurement.
    pub measurement: FootMeasurement,
    /// Points left after the height band filter.
    pub points_used: usize,
    /// Planar centroid of those points.
    pub centroid: Point2<f64>,
    /// Axes the spans were measured along.
    pub axes: PrincipalAxes,
}

impl Extraction {
    /// Whether the world-axis fallback was used.
    #[must_use]
    pub const fn degenerate_axis(&self) -> bool {
        self.axes.degenerate
    }

    /// Diagnostic describing the fallback, if it happened.
    #[must_use]
    pub fn degeneracy(&self) -> Option<ScanError> {
        self.axes.degenerate.then(|| {
            ScanError::DegenerateGeometry(format!(
                "no dominant horizontal direction across {} points; measured along world z/x",
                self.points_used
            ))
        })
    }
}

/// Turns accumulated points into a validated [`FootMeasurement`].
///
/// Extraction is pure: it reads an immutable [`PointSnapshot`] and never
/// touches session state, so it may run on any thread.
#[derive(Debug, Clone)]
pub struct MeasurementExtractor {
    params: ScanParams,
}

impl MeasurementExtractor {
    /// Create an extractor.
    #[must_use]
    pub const fn new(params: ScanParams) -> Self {
        Self { params }
    }

    /// Active parameters.
    #[must_use]
    pub const fn params(&self) -> &ScanParams {
        &self.params
    }

    /// Measure the foot in `snapshot`.
    ///
    /// # Errors
    ///
    /// - [`ScanError::InsufficientInput`] if fewer than `min_total_points`
    ///   points remain after height filtering.
    /// - [`ScanError::OutOfBounds`] if length or width is outside the
    ///   plausible foot ranges.
    pub fn extract(
        &self,
        snapshot: &PointSnapshot,
        ground: &GroundReference,
        foot_side: FootSide,
    ) -> ScanResult<Extraction> {
        let p = &self.params;
        let points = self.height_band(snapshot.points(), ground);
        if points.len() < p.min_total_points {
            return Err(ScanError::insufficient(
                "measurable points",
                p.min_total_points,
                points.len(),
            ));
        }

        let centroid = planar_centroid(&points)
            .ok_or_else(|| ScanError::insufficient("measurable points", 1, 0))?;
        let cov = planar_covariance(&points, &centroid);
        let axes = PrincipalAxes::from_covariance(&cov, p.degenerate_epsilon);
        if axes.degenerate {
            warn!(
                points = points.len(),
                "no dominant horizontal direction; falling back to world axes"
            );
        }

        let (length_m, width_m) = spans(&points, &centroid, &axes);
        let length_cm = length_m * CM_PER_M;
        let width_cm = width_m * CM_PER_M;

        let arch_height_cm = ground.height().and_then(|ground_y| {
            let top = points.iter().map(Vertex::y).fold(f64::NEG_INFINITY, f64::max);
            let arch = (top - ground_y) * CM_PER_M;
            (arch > 0.0).then_some(arch)
        });

        debug!(
            length_cm,
            width_cm,
            ?arch_height_cm,
            points = points.len(),
            "foot extents computed"
        );

        if !(p.min_length_cm..=p.max_length_cm).contains(&length_cm) {
            return Err(ScanError::out_of_bounds(
                "foot length",
                length_cm,
                p.min_length_cm,
                p.max_length_cm,
                "cm",
            ));
        }
        if !(p.min_width_cm..=p.max_width_cm).contains(&width_cm) {
            return Err(ScanError::out_of_bounds(
                "foot width",
                width_cm,
                p.min_width_cm,
                p.max_width_cm,
                "cm",
            ));
        }

        Ok(Extraction {
            measurement: FootMeasurement::new(
                length_cm,
                width_cm,
                arch_height_cm,
                snapshot.batch_count(),
                foot_side,
            ),
            points_used: points.len(),
            centroid,
            axes,
        })
    }

    /// Points above the floor noise and below ankle height. Without a floor
    /// only non-finite points are dropped.
    fn height_band(&self, points: &[Vertex], ground: &GroundReference) -> Vec<Vertex> {
        let p = &self.params;
        points
            .iter()
            .filter(|v| v.is_finite())
            .filter(|v| {
                if !ground.is_established() {
                    return true;
                }
                let h = v.height_above(ground);
                h > p.min_distance_from_floor && h <= p.max_height_above_floor
            })
            .copied()
            .collect()
    }
}

/// Population covariance of `(x, z)` about `centroid`.
#[allow(clippy::cast_precision_loss)]
fn planar_covariance(points: &[Vertex], centroid: &Point2<f64>) -> Matrix2<f64> {
    let mut cov = Matrix2::zeros();
    for v in points {
        let d = v.planar() - centroid;
        cov[(0, 0)] += d.x * d.x;
        cov[(0, 1)] += d.x * d.y;
        cov[(1, 1)] += d.y * d.y;
    }
    cov[(1, 0)] = cov[(0, 1)];
    cov / points.len() as f64
}

/// Spans of `points` along the major and minor axes, in metres.
fn spans(points: &[Vertex], centroid: &Point2<f64>, axes: &PrincipalAxes) -> (f64, f64) {
    let init = (
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    );
    let (u_min, u_max, w_min, w_max) =
        points.iter().fold(init, |(u_min, u_max, w_min, w_max), v| {
            let d = v.planar() - centroid;
            let u = d.dot(&axes.major);
            let w = d.dot(&axes.minor);
            (u_min.min(u), u_max.max(u), w_min.min(w), w_max.max(w))
        });
    (u_max - u_min, w_max - w_min)
}
