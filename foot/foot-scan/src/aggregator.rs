//! Batch filtering and point accumulation.
//!
//! Each sensor batch is judged as a whole. Rules run in order and the first
//! failure rejects the batch:
//!
//! 1. The batch must carry at least `min_raw_points` points.
//! 2. Non-finite points are dropped; once a floor is known, points within
//!    `min_distance_from_floor` of it (or below it) are dropped too. More
//!    than `min_filtered_points` must survive.
//! 3. The survivors' planar extent must stay under `max_batch_extent` on
//!    both horizontal axes.
//! 4. The first accepted batch fixes the reference centroid; later batches
//!    must have their planar centroid within `drift_tolerance` of it.
//!
//! Accepted survivors are appended to the [`AccumulatedPointSet`]. Rejected
//! points are discarded, never buffered.

use std::sync::Arc;

use foot_types::{GroundReference, Point2, Vertex};
use nalgebra::distance;
use tracing::debug;

use crate::error::ScanError;
use crate::params::ScanParams;
use crate::planar::{PlanarBounds, planar_centroid};

/// Immutable copy of the accumulated points, safe to hand to another thread.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSnapshot {
    points: Arc<[Vertex]>,
    batch_count: usize,
}

impl PointSnapshot {
    /// Wrap points gathered elsewhere.
    #[must_use]
    pub fn new(points: impl Into<Arc<[Vertex]>>, batch_count: usize) -> Self {
        Self {
            points: points.into(),
            batch_count,
        }
    }

    /// The points.
    #[must_use]
    pub fn points(&self) -> &[Vertex] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no points were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Accepted batches that contributed.
    #[must_use]
    pub const fn batch_count(&self) -> usize {
        self.batch_count
    }
}

/// Append-only set of accepted, filtered points for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccumulatedPointSet {
    points: Vec<Vertex>,
    batch_count: usize,
    reference_centroid: Option<Point2<f64>>,
}

impl AccumulatedPointSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted points in arrival order.
    #[must_use]
    pub fn points(&self) -> &[Vertex] {
        &self.points
    }

    /// Number of accepted points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True before the first accepted batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of accepted batches.
    #[must_use]
    pub const fn batch_count(&self) -> usize {
        self.batch_count
    }

    /// Planar centroid of the first accepted batch.
    #[must_use]
    pub const fn reference_centroid(&self) -> Option<Point2<f64>> {
        self.reference_centroid
    }

    /// Copy the current points for measurement.
    #[must_use]
    pub fn snapshot(&self) -> PointSnapshot {
        PointSnapshot::new(self.points.as_slice(), self.batch_count)
    }

    /// Drop everything, including the reference centroid.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn append(&mut self, survivors: Vec<Vertex>, centroid: Point2<f64>) {
        if self.reference_centroid.is_none() {
            self.reference_centroid = Some(centroid);
        }
        self.batch_count += 1;
        self.points.extend(survivors);
    }
}

/// Outcome of offering one batch to the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub enum AcceptResult {
    /// Batch was kept.
    Accepted {
        /// Points that survived filtering and were appended.
        kept: usize,
        /// Planar centroid of the kept points.
        centroid: Point2<f64>,
    },
    /// Batch was dropped; nothing changed.
    Rejected(ScanError),
}

impl AcceptResult {
    /// Whether the batch was kept.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Why the batch was dropped.
    #[must_use]
    pub const fn reason(&self) -> Option<&ScanError> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Filters incoming batches and accumulates the clean ones.
///
/// # Example
///
/// ```
/// use foot_scan::{ScanParams, VertexAggregator};
/// use foot_types::{GroundReference, Vertex};
///
/// let mut aggregator = VertexAggregator::new(ScanParams::default());
/// let ground = GroundReference::at(0.0);
///
/// // A 10 cm patch of points 2 cm above the floor.
/// let batch: Vec<Vertex> = (0..100)
///     .map(|i| Vertex::from_coords(f64::from(i % 10) * 0.01, 0.02, f64::from(i / 10) * 0.01))
///     .collect();
///
/// assert!(aggregator.accept(&batch, &ground).is_accepted());
/// assert_eq!(aggregator.points().batch_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct VertexAggregator {
    params: ScanParams,
    set: AccumulatedPointSet,
}

impl VertexAggregator {
    /// Create an aggregator with an empty point set.
    #[must_use]
    pub fn new(params: ScanParams) -> Self {
        Self {
            params,
            set: AccumulatedPointSet::new(),
        }
    }

    /// Active parameters.
    #[must_use]
    pub const fn params(&self) -> &ScanParams {
        &self.params
    }

    /// Points accepted so far.
    #[must_use]
    pub const fn points(&self) -> &AccumulatedPointSet {
        &self.set
    }

    /// Forget all accepted points and the reference centroid.
    pub fn reset(&mut self) {
        self.set.clear();
    }

    /// Offer a batch. On acceptance its surviving points are appended.
    pub fn accept(&mut self, batch: &[Vertex], ground: &GroundReference) -> AcceptResult {
        match self.evaluate(batch, ground) {
            Ok((survivors, centroid)) => {
                let kept = survivors.len();
                self.set.append(survivors, centroid);
                debug!(
                    raw = batch.len(),
                    kept,
                    batch_count = self.set.batch_count(),
                    total = self.set.len(),
                    "batch accepted"
                );
                AcceptResult::Accepted { kept, centroid }
            }
            Err(reason) => {
                debug!(raw = batch.len(), %reason, "batch rejected");
                AcceptResult::Rejected(reason)
            }
        }
    }

    fn evaluate(
        &self,
        batch: &[Vertex],
        ground: &GroundReference,
    ) -> Result<(Vec<Vertex>, Point2<f64>), ScanError> {
        let p = &self.params;

        if batch.len() < p.min_raw_points {
            return Err(ScanError::insufficient("raw points", p.min_raw_points, batch.len()));
        }

        let survivors: Vec<Vertex> = batch
            .iter()
            .filter(|v| v.is_finite())
            .filter(|v| {
                !ground.is_established() || v.height_above(ground) > p.min_distance_from_floor
            })
            .copied()
            .collect();
        if survivors.len() <= p.min_filtered_points {
            return Err(ScanError::insufficient(
                "points above the floor",
                p.min_filtered_points.saturating_add(1),
                survivors.len(),
            ));
        }

        let bounds = PlanarBounds::of(&survivors)
            .ok_or_else(|| ScanError::insufficient("points above the floor", 1, 0))?;
        for (what, extent) in [
            ("batch x extent", bounds.extent_x()),
            ("batch z extent", bounds.extent_z()),
        ] {
            if extent > p.max_batch_extent {
                return Err(ScanError::out_of_bounds(what, extent, 0.0, p.max_batch_extent, "m"));
            }
        }

        let centroid = planar_centroid(&survivors)
            .ok_or_else(|| ScanError::insufficient("points above the floor", 1, 0))?;
        if let Some(reference) = self.set.reference_centroid() {
            let drift = distance(&reference, &centroid);
            if drift > p.drift_tolerance {
                return Err(ScanError::DriftRejected {
                    distance: drift,
                    tolerance: p.drift_tolerance,
                });
            }
        }

        Ok((survivors, centroid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// A `side × side` grid of points at height `y`, centred on `(cx, cz)`.
    fn patch(cx: f64, cz: f64, y: f64, side: usize, spacing: f64) -> Vec<Vertex> {
        let half = (side as f64 - 1.0) * spacing / 2.0;
        (0..side * side)
            .map(|i| {
                let x = cx - half + (i % side) as f64 * spacing;
                let z = cz - half + (i / side) as f64 * spacing;
                Vertex::from_coords(x, y, z)
            })
            .collect()
    }

    fn aggregator() -> VertexAggregator {
        VertexAggregator::new(ScanParams::default())
    }

    #[test]
    fn first_batch_sets_reference() {
        let mut agg = aggregator();
        let result = agg.accept(&patch(0.3, -0.2, 0.05, 10, 0.01), &GroundReference::default());
        assert!(result.is_accepted());
        let reference = agg.points().reference_centroid().unwrap();
        assert_relative_eq!(reference.x, 0.3, epsilon = 1e-12);
        assert_relative_eq!(reference.y, -0.2, epsilon = 1e-12);
        assert_eq!(agg.points().len(), 100);
    }

    #[test]
    fn huge_survivor_threshold_rejects_without_overflow() {
        let params = ScanParams::default().with_min_filtered_points(usize::MAX);
        let mut agg = VertexAggregator::new(params);
        let result = agg.accept(&patch(0.0, 0.0, 0.05, 10, 0.01), &GroundReference::default());
        assert!(matches!(
            result.reason(),
            Some(ScanError::InsufficientInput { required: usize::MAX, actual: 100, .. })
        ));
    }

    #[test]
    fn sparse_batch_rejected() {
        let mut agg = aggregator();
        let result = agg.accept(&patch(0.0, 0.0, 0.05, 7, 0.01), &GroundReference::default());
        assert!(matches!(
            result.reason(),
            Some(ScanError::InsufficientInput { required: 50, actual: 49, .. })
        ));
        assert!(agg.points().is_empty());
    }

    #[test]
    fn floor_points_are_dropped() {
        let mut agg = aggregator();
        let ground = GroundReference::at(0.10);
        let mut batch = patch(0.0, 0.0, 0.13, 8, 0.01); // 64 above
        batch.extend(patch(0.0, 0.0, 0.102, 8, 0.01)); // 64 floor noise
        batch.extend(patch(0.0, 0.0, 0.05, 3, 0.01)); // 9 below the floor

        let result = agg.accept(&batch, &ground);
        assert_eq!(result.reason(), None);
        assert_eq!(agg.points().len(), 64);
        assert!(agg.points().points().iter().all(|v| v.y() > 0.105));
    }

    #[test]
    fn mostly_floor_batch_rejected() {
        let mut agg = aggregator();
        let ground = GroundReference::at(0.0);
        let mut batch = patch(0.0, 0.0, 0.001, 10, 0.01);
        batch.extend(patch(0.0, 0.0, 0.05, 5, 0.01)); // 25 survivors, need > 30

        let result = agg.accept(&batch, &ground);
        assert!(matches!(
            result.reason(),
            Some(ScanError::InsufficientInput { required: 31, actual: 25, .. })
        ));
        assert!(agg.points().is_empty());
    }

    #[test]
    fn floor_filter_needs_ground() {
        let mut agg = aggregator();
        // All points sit at y = 0.001 but no floor is known yet.
        let result = agg.accept(&patch(0.0, 0.0, 0.001, 10, 0.01), &GroundReference::default());
        assert!(result.is_accepted());
    }

    #[test]
    fn non_finite_points_dropped() {
        let mut agg = aggregator();
        let mut batch = patch(0.0, 0.0, 0.05, 8, 0.01);
        batch.push(Vertex::from_coords(f64::NAN, 0.05, 0.0));
        batch.push(Vertex::from_coords(0.0, 0.05, f64::INFINITY));

        assert!(agg.accept(&batch, &GroundReference::default()).is_accepted());
        assert_eq!(agg.points().len(), 64);
    }

    #[test]
    fn oversized_batch_rejected() {
        let mut agg = aggregator();
        let result = agg.accept(&patch(0.0, 0.0, 0.05, 10, 0.1), &GroundReference::default());
        assert!(matches!(
            result.reason(),
            Some(ScanError::OutOfBounds { what: "batch x extent", .. })
        ));
    }

    #[test]
    fn drifted_batch_rejected_without_side_effects() {
        let mut agg = aggregator();
        let ground = GroundReference::default();
        assert!(agg.accept(&patch(0.0, 0.0, 0.05, 10, 0.01), &ground).is_accepted());
        let before = agg.points().clone();

        let result = agg.accept(&patch(0.5, 0.0, 0.05, 10, 0.01), &ground);
        match result.reason() {
            Some(ScanError::DriftRejected { distance, tolerance }) => {
                assert_relative_eq!(*distance, 0.5, epsilon = 1e-9);
                assert_relative_eq!(*tolerance, 0.2);
            }
            other => panic!("expected drift rejection, got {other:?}"),
        }
        assert_eq!(agg.points(), &before);
    }

    #[test]
    fn nearby_batch_accepted() {
        let mut agg = aggregator();
        let ground = GroundReference::default();
        assert!(agg.accept(&patch(0.0, 0.0, 0.05, 10, 0.01), &ground).is_accepted());
        assert!(agg.accept(&patch(0.1, 0.1, 0.05, 10, 0.01), &ground).is_accepted());
        assert_eq!(agg.points().batch_count(), 2);
        assert_eq!(agg.points().len(), 200);

        // Reference stays at the first batch.
        let reference = agg.points().reference_centroid().unwrap();
        assert_relative_eq!(reference.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rejected_first_batch_does_not_fix_reference() {
        let mut agg = aggregator();
        let ground = GroundReference::default();
        assert!(!agg.accept(&patch(5.0, 5.0, 0.05, 7, 0.01), &ground).is_accepted());
        assert!(agg.points().reference_centroid().is_none());
        assert!(agg.accept(&patch(5.0, 5.0, 0.05, 10, 0.01), &ground).is_accepted());
    }

    #[test]
    fn snapshot_is_detached() {
        let mut agg = aggregator();
        let ground = GroundReference::default();
        assert!(agg.accept(&patch(0.0, 0.0, 0.05, 10, 0.01), &ground).is_accepted());
        let snapshot = agg.points().snapshot();
        assert!(agg.accept(&patch(0.0, 0.0, 0.06, 10, 0.01), &ground).is_accepted());

        assert_eq!(snapshot.len(), 100);
        assert_eq!(snapshot.batch_count(), 1);
        assert_eq!(agg.points().len(), 200);
    }

    #[test]
    fn reset_clears_everything() {
        let mut agg = aggregator();
        assert!(agg.accept(&patch(0.0, 0.0, 0.05, 10, 0.01), &GroundReference::default()).is_accepted());
        agg.reset();
        assert!(agg.points().is_empty());
        assert_eq!(agg.points().batch_count(), 0);
        assert!(agg.points().reference_centroid().is_none());
    }
}
