//! Parameters for scan aggregation and measurement.
//!
//! The thresholds here are empirical. They have not been derived from a
//! sensor model and should be calibrated against real captures rather than
//! re-guessed; every one can be overridden.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ScanError, ScanResult};

/// Tuning parameters for a scan session.
///
/// World distances are in metres; foot bounds are in centimetres.
///
/// # Example
///
/// ```
/// use foot_scan::ScanParams;
///
/// let params = ScanParams::default();
/// assert_eq!(params.min_batches, 3);
///
/// let strict = ScanParams::default()
///     .with_drift_tolerance(0.1)
///     .with_min_batches(6);
/// assert!(strict.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanParams {
    /// Batches with fewer raw points are rejected outright.
    pub min_raw_points: usize,

    /// Points this close to (or below) the floor are floor noise, in metres.
    pub min_distance_from_floor: f64,

    /// After floor filtering a batch must keep more than this many points.
    pub min_filtered_points: usize,

    /// Largest planar extent a single batch may span, in metres.
    pub max_batch_extent: f64,

    /// Largest planar distance between a batch centroid and the reference
    /// centroid, in metres.
    pub drift_tolerance: f64,

    /// Minimum points needed for measurement after the height band filter.
    pub min_total_points: usize,

    /// Points higher than this above the floor belong to the leg, in metres.
    pub max_height_above_floor: f64,

    /// Accepted batches needed before a scan may finish.
    pub min_batches: usize,

    /// Shortest plausible foot, in centimetres.
    pub min_length_cm: f64,

    /// Longest plausible foot, in centimetres.
    pub max_length_cm: f64,

    /// Narrowest plausible foot, in centimetres.
    pub min_width_cm: f64,

    /// Widest plausible foot, in centimetres.
    pub max_width_cm: f64,

    /// Eigenvector norm below which the principal axis is undefined.
    pub degenerate_epsilon: f64,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            min_raw_points: 50,
            min_distance_from_floor: 0.005, // 5 mm
            min_filtered_points: 30,
            max_batch_extent: 0.60,
            drift_tolerance: 0.20,
            min_total_points: 200,
            max_height_above_floor: 0.30,
            min_batches: 3,
            min_length_cm: 15.0,
            max_length_cm: 45.0,
            min_width_cm: 5.0,
            max_width_cm: 15.0,
            degenerate_epsilon: 1e-12,
        }
    }
}

impl ScanParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for children's feet: shorter plausible lengths and a
    /// tighter drift bound.
    #[must_use]
    pub fn for_children() -> Self {
        Self {
            drift_tolerance: 0.15,
            min_length_cm: 9.0,
            max_length_cm: 25.0,
            min_width_cm: 3.5,
            max_width_cm: 10.0,
            ..Self::default()
        }
    }

    /// Set the minimum raw points per batch.
    #[must_use]
    pub const fn with_min_raw_points(mut self, count: usize) -> Self {
        self.min_raw_points = count;
        self
    }

    /// Set the floor noise band.
    #[must_use]
    pub const fn with_min_distance_from_floor(mut self, distance: f64) -> Self {
        self.min_distance_from_floor = distance;
        self
    }

    /// Set the post-filter point threshold.
    #[must_use]
    pub const fn with_min_filtered_points(mut self, count: usize) -> Self {
        self.min_filtered_points = count;
        self
    }

    /// Set the per-batch extent ceiling.
    #[must_use]
    pub const fn with_max_batch_extent(mut self, extent: f64) -> Self {
        self.max_batch_extent = extent;
        self
    }

    /// Set the drift tolerance.
    #[must_use]
    pub const fn with_drift_tolerance(mut self, tolerance: f64) -> Self {
        self.drift_tolerance = tolerance;
        self
    }

    /// Set the minimum points for measurement.
    #[must_use]
    pub const fn with_min_total_points(mut self, count: usize) -> Self {
        self.min_total_points = count;
        self
    }

    /// Set the height band ceiling.
    #[must_use]
    pub const fn with_max_height_above_floor(mut self, height: f64) -> Self {
        self.max_height_above_floor = height;
        self
    }

    /// Set the batches required to finish.
    #[must_use]
    pub const fn with_min_batches(mut self, count: usize) -> Self {
        self.min_batches = count;
        self
    }

    /// Set the plausible length range in centimetres.
    #[must_use]
    pub const fn with_length_range(mut self, min_cm: f64, max_cm: f64) -> Self {
        self.min_length_cm = min_cm;
        self.max_length_cm = max_cm;
        self
    }

    /// Set the plausible width range in centimetres.
    #[must_use]
    pub const fn with_width_range(mut self, min_cm: f64, max_cm: f64) -> Self {
        self.min_width_cm = min_cm;
        self.max_width_cm = max_cm;
        self
    }

    /// Check that every threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidParams`] for non-positive distances,
    /// inverted ranges, or a post-filter threshold above the raw threshold.
    #[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN bounds must fail
    pub fn validate(&self) -> ScanResult<()> {
        let positive = [
            ("min_distance_from_floor", self.min_distance_from_floor),
            ("max_batch_extent", self.max_batch_extent),
            ("drift_tolerance", self.drift_tolerance),
            ("max_height_above_floor", self.max_height_above_floor),
            ("min_length_cm", self.min_length_cm),
            ("min_width_cm", self.min_width_cm),
            ("degenerate_epsilon", self.degenerate_epsilon),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScanError::invalid_params(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.max_height_above_floor <= self.min_distance_from_floor {
            return Err(ScanError::invalid_params(
                "max_height_above_floor must exceed min_distance_from_floor",
            ));
        }
        if !(self.max_length_cm > self.min_length_cm) {
            return Err(ScanError::invalid_params("length range is empty"));
        }
        if !(self.max_width_cm > self.min_width_cm) {
            return Err(ScanError::invalid_params("width range is empty"));
        }
        if self.min_filtered_points > self.min_raw_points {
            return Err(ScanError::invalid_params(
                "min_filtered_points cannot exceed min_raw_points",
            ));
        }
        if self.min_batches == 0 {
            return Err(ScanError::invalid_params("min_batches must be at least 1"));
        }
        Ok(())
    }
}
