//! Scan session state machine.
//!
//! ```text
//! Idle ──start──▶ Scanning ──finish──▶ Finished(measurement)
//!                    │   ▲        └──▶ Failed(reason)
//!           ingest / ground           │
//!                                      restart ──▶ Idle
//! ```
//!
//! `start` and `abandon` are accepted in every phase and discard all
//! accumulated state. Every transition appends a [`ScanEvent`] to the
//! session's log. `start` clears the log, and it never holds more than
//! [`EVENT_LOG_CAPACITY`] events; the oldest half goes first.

use std::fmt;

use foot_sizing::{AllSizes, MeasurementSizing, SizeFormat, SizeGender};
use foot_types::{FootMeasurement, FootSide, GroundReference, GroundTransform, Vertex};
use tracing::{debug, info, warn};

use crate::aggregator::{AcceptResult, AccumulatedPointSet, VertexAggregator};
use crate::error::{ScanError, ScanResult};
use crate::extract::MeasurementExtractor;
use crate::params::ScanParams;
use crate::status::{MSG_POINT_AT_FLOOR, PhaseKind, SessionStatus, status_message};

const MSG_COMPLETE: &str = "Scan complete";

/// Events kept before the oldest half is discarded.
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// Why a finish attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Too few batches were accepted; extraction was not attempted.
    InsufficientData,
    /// Extraction ran and rejected the geometry.
    CouldNotCalculate,
}

/// A failed finish, with the underlying cause.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFailure {
    /// Failure category.
    pub kind: FailureKind,
    /// What went wrong.
    pub cause: ScanError,
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::InsufficientData => write!(f, "Insufficient data: {}", self.cause),
            FailureKind::CouldNotCalculate => {
                write!(f, "Could not calculate measurements: {}", self.cause)
            }
        }
    }
}

/// Current phase of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanPhase {
    /// Not scanning.
    Idle,
    /// Accepting batches.
    Scanning,
    /// Completed with a measurement.
    Finished(FootMeasurement),
    /// Finish failed; restart or start again.
    Failed(ScanFailure),
}

impl ScanPhase {
    /// The phase without its payload.
    #[must_use]
    pub const fn kind(&self) -> PhaseKind {
        match self {
            Self::Idle => PhaseKind::Idle,
            Self::Scanning => PhaseKind::Scanning,
            Self::Finished(_) => PhaseKind::Finished,
            Self::Failed(_) => PhaseKind::Failed,
        }
    }
}

/// Something that happened to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// Session entered `Scanning` with fresh state.
    Started,
    /// Floor recorded.
    GroundDetected {
        /// World up-coordinate of the floor.
        ground_y: f64,
    },
    /// A batch was accepted.
    BatchAccepted {
        /// Accepted batches including this one.
        batch_count: usize,
        /// Points kept from this batch.
        points_kept: usize,
    },
    /// A batch was dropped.
    BatchRejected {
        /// Why.
        reason: ScanError,
    },
    /// Extraction succeeded but needs attention, e.g. a degenerate axis.
    Diagnostic(ScanError),
    /// Scan completed.
    Finished(FootMeasurement),
    /// Finish failed.
    Failed(ScanFailure),
    /// Finished or failed session returned to `Idle`.
    Restarted,
    /// Session abandoned to `Idle`.
    Abandoned,
}

/// One foot scan: ground reference, accumulated points and result.
///
/// Not designed for concurrent mutation; see
/// [`ScanWorker`](crate::ScanWorker) for a single-writer wrapper.
///
/// # Example
///
/// ```
/// use foot_scan::{PhaseKind, ScanSession};
/// use foot_types::{FootSide, GroundTransform};
///
/// let mut session = ScanSession::default();
/// session.start();
/// assert_eq!(session.phase().kind(), PhaseKind::Scanning);
///
/// assert!(session.on_ground_detected(&GroundTransform::from_translation(0.0, 0.1, 0.0)).unwrap());
/// assert_eq!(session.status_message(), "Ground detected! Scan your foot");
///
/// // Finishing without foot data fails but leaves the session restartable.
/// assert!(session.finish(FootSide::Left).is_err());
/// assert_eq!(session.phase().kind(), PhaseKind::Failed);
/// session.restart().unwrap();
/// assert_eq!(session.phase().kind(), PhaseKind::Idle);
/// ```
#[derive(Debug, Clone)]
pub struct ScanSession {
    phase: ScanPhase,
    ground: GroundReference,
    aggregator: VertexAggregator,
    extractor: MeasurementExtractor,
    status_message: String,
    events: Vec<ScanEvent>,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::with_params(ScanParams::default())
    }
}

impl ScanSession {
    /// Create an idle session.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidParams`] if `params` fail validation.
    pub fn new(params: ScanParams) -> ScanResult<Self> {
        params.validate()?;
        Ok(Self::with_params(params))
    }

    fn with_params(params: ScanParams) -> Self {
        Self {
            phase: ScanPhase::Idle,
            ground: GroundReference::default(),
            aggregator: VertexAggregator::new(params.clone()),
            extractor: MeasurementExtractor::new(params),
            status_message: MSG_POINT_AT_FLOOR.to_string(),
            events: Vec::new(),
        }
    }

    /// Begin a new scan from any phase, discarding previous state and
    /// undrained events.
    pub fn start(&mut self) {
        self.reset();
        self.events.clear();
        self.phase = ScanPhase::Scanning;
        self.record(ScanEvent::Started);
        info!("scan started");
    }

    /// Record the floor from a detected horizontal plane.
    ///
    /// Only the first detection in a session counts; later calls return
    /// `Ok(false)` and change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPhase`] unless scanning, or
    /// [`ScanError::InvalidParams`] if the transform's height is not finite.
    /// The floor is left unchanged in both cases.
    pub fn on_ground_detected(&mut self, transform: &GroundTransform) -> ScanResult<bool> {
        self.require_scanning("record the ground plane")?;
        let ground_y = transform.ground_y();
        if !ground_y.is_finite() {
            warn!(ground_y, "ignoring ground plane with non-finite height");
            return Err(ScanError::invalid_params(format!(
                "ground plane height must be finite, got {ground_y}"
            )));
        }
        if !self.ground.establish(ground_y) {
            debug!(ground_y, "ground already established; ignoring");
            return Ok(false);
        }
        self.refresh_status();
        self.record(ScanEvent::GroundDetected { ground_y });
        info!(ground_y, "ground plane detected");
        Ok(true)
    }

    /// Offer a batch of world-space points.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPhase`] unless scanning. A rejected batch
    /// is not an error: it is reported as [`AcceptResult::Rejected`].
    pub fn ingest_batch(&mut self, batch: &[Vertex]) -> ScanResult<AcceptResult> {
        self.require_scanning("ingest a batch")?;
        let result = self.aggregator.accept(batch, &self.ground);
        match &result {
            AcceptResult::Accepted { kept, .. } => {
                self.refresh_status();
                self.record(ScanEvent::BatchAccepted {
                    batch_count: self.aggregator.points().batch_count(),
                    points_kept: *kept,
                });
            }
            AcceptResult::Rejected(reason) => {
                self.record(ScanEvent::BatchRejected {
                    reason: reason.clone(),
                });
            }
        }
        Ok(result)
    }

    /// Stop scanning and measure.
    ///
    /// With fewer than `min_batches` accepted batches the session fails with
    /// [`FailureKind::InsufficientData`] without measuring. Otherwise the
    /// accumulated points are snapshotted and measured; a rejected
    /// measurement fails with [`FailureKind::CouldNotCalculate`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPhase`] unless scanning (the phase is
    /// unchanged), or the failure cause after moving to `Failed`.
    pub fn finish(&mut self, foot_side: FootSide) -> ScanResult<FootMeasurement> {
        self.require_scanning("finish")?;

        let batches = self.aggregator.points().batch_count();
        let min_batches = self.aggregator.params().min_batches;
        if batches < min_batches {
            let cause = ScanError::insufficient("accepted batches", min_batches, batches);
            return Err(self.fail(FailureKind::InsufficientData, cause));
        }

        let snapshot = self.aggregator.points().snapshot();
        match self.extractor.extract(&snapshot, &self.ground, foot_side) {
            Ok(extraction) => {
                if let Some(diagnostic) = extraction.degeneracy() {
                    self.record(ScanEvent::Diagnostic(diagnostic));
                }
                let measurement = extraction.measurement;
                info!(
                    length_cm = measurement.length_cm(),
                    width_cm = measurement.width_cm(),
                    side = measurement.foot_side().as_str(),
                    batches,
                    "scan finished"
                );
                self.status_message = MSG_COMPLETE.to_string();
                self.record(ScanEvent::Finished(measurement.clone()));
                self.phase = ScanPhase::Finished(measurement.clone());
                Ok(measurement)
            }
            Err(cause) => Err(self.fail(FailureKind::CouldNotCalculate, cause)),
        }
    }

    /// Return a finished or failed session to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPhase`] while idle or scanning.
    pub fn restart(&mut self) -> ScanResult<()> {
        if !matches!(self.phase, ScanPhase::Finished(_) | ScanPhase::Failed(_)) {
            return Err(ScanError::invalid_phase("restart", self.phase.kind().as_str()));
        }
        self.reset();
        self.record(ScanEvent::Restarted);
        info!("scan restarted");
        Ok(())
    }

    /// Drop everything and return to `Idle`, from any phase.
    pub fn abandon(&mut self) {
        self.reset();
        self.record(ScanEvent::Abandoned);
        info!("scan abandoned");
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &ScanPhase {
        &self.phase
    }

    /// Active parameters.
    #[must_use]
    pub const fn params(&self) -> &ScanParams {
        self.aggregator.params()
    }

    /// Floor reference.
    #[must_use]
    pub const fn ground(&self) -> &GroundReference {
        &self.ground
    }

    /// Whether the floor has been detected.
    #[must_use]
    pub const fn ground_established(&self) -> bool {
        self.ground.is_established()
    }

    /// Points accepted so far.
    #[must_use]
    pub const fn points(&self) -> &AccumulatedPointSet {
        self.aggregator.points()
    }

    /// Accepted batches so far.
    #[must_use]
    pub const fn accepted_batch_count(&self) -> usize {
        self.aggregator.points().batch_count()
    }

    /// Latest progress or failure message.
    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// The measurement, once finished.
    #[must_use]
    pub const fn measurement(&self) -> Option<&FootMeasurement> {
        match &self.phase {
            ScanPhase::Finished(m) => Some(m),
            _ => None,
        }
    }

    /// The failure, once failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&ScanFailure> {
        match &self.phase {
            ScanPhase::Failed(f) => Some(f),
            _ => None,
        }
    }

    /// Snapshot for a progress display.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            phase: self.phase.kind(),
            message: self.status_message.clone(),
            accepted_batch_count: self.accepted_batch_count(),
            accepted_point_count: self.points().len(),
            ground_established: self.ground_established(),
            ready_to_finish: self.accepted_batch_count() >= self.params().min_batches,
        }
    }

    /// Labelled size for the finished measurement, e.g. `"US Men's 9"`.
    #[must_use]
    pub fn formatted_size(&self, format: SizeFormat, gender: SizeGender) -> Option<String> {
        self.measurement().map(|m| m.formatted_size(format, gender))
    }

    /// Every size column for the finished measurement.
    #[must_use]
    pub fn all_formats(&self, gender: SizeGender) -> Option<AllSizes> {
        self.measurement().map(|m| m.all_sizes(gender))
    }

    /// Events logged since the last drain.
    #[must_use]
    pub fn events(&self) -> &[ScanEvent] {
        &self.events
    }

    /// Take the event log.
    pub fn drain_events(&mut self) -> Vec<ScanEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, event: ScanEvent) {
        if self.events.len() >= EVENT_LOG_CAPACITY {
            self.events.drain(..EVENT_LOG_CAPACITY / 2);
        }
        self.events.push(event);
    }

    fn require_scanning(&self, operation: &'static str) -> ScanResult<()> {
        if matches!(self.phase, ScanPhase::Scanning) {
            Ok(())
        } else {
            Err(ScanError::invalid_phase(operation, self.phase.kind().as_str()))
        }
    }

    fn fail(&mut self, kind: FailureKind, cause: ScanError) -> ScanError {
        let failure = ScanFailure {
            kind,
            cause: cause.clone(),
        };
        warn!(%failure, "scan failed");
        self.status_message = failure.to_string();
        self.record(ScanEvent::Failed(failure.clone()));
        self.phase = ScanPhase::Failed(failure);
        cause
    }

    fn refresh_status(&mut self) {
        self.status_message = status_message(
            self.ground.is_established(),
            self.aggregator.points().batch_count(),
            self.aggregator.params().min_batches,
        );
    }

    fn reset(&mut self) {
        self.phase = ScanPhase::Idle;
        self.ground.clear();
        self.aggregator.reset();
        self.status_message = MSG_POINT_AT_FLOOR.to_string();
    }
}
