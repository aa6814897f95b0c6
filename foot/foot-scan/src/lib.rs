//! Incremental foot scanning and measurement.
//!
//! Turns a stream of world-space point batches from a depth sensor into a
//! heel-to-toe length, a width and an arch height:
//!
//! - [`VertexAggregator`] - Filters each batch and accumulates the clean ones
//! - [`MeasurementExtractor`] - Measures along the principal horizontal axes
//! - [`ScanSession`] - Phase state machine tying the two together
//! - [`ScanWorker`] - Runs a session on its own thread behind a channel
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Rendering,
//! sensor capture and persistence belong to the host.
//!
//! # Pipeline
//!
//! ```text
//! ground plane ─▶ GroundReference ─┐
//!                                  ▼
//! batch ─▶ VertexAggregator ─▶ AccumulatedPointSet ─snapshot─▶ MeasurementExtractor ─▶ FootMeasurement
//! ```
//!
//! # Example
//!
//! ```
//! use foot_scan::{PhaseKind, ScanSession};
//! use foot_sizing::{SizeFormat, SizeGender};
//! use foot_types::{FootSide, GroundTransform, Vertex};
//!
//! // A 26 × 10 cm sole patch, 2–6 cm above a floor at y = 0.
//! fn batch() -> Vec<Vertex> {
//!     let mut points = Vec::new();
//!     for i in 0..=26 {
//!         for j in 0..=10 {
//!             for k in 0..2 {
//!                 points.push(Vertex::from_coords(
//!                     f64::from(j) * 0.01,
//!                     0.02 + f64::from(k) * 0.04,
//!                     f64::from(i) * 0.01,
//!                 ));
//!             }
//!         }
//!     }
//!     points
//! }
//!
//! let mut session = ScanSession::default();
//! session.start();
//! session.on_ground_detected(&GroundTransform::from_translation(0.0, 0.0, 0.0)).unwrap();
//! for _ in 0..3 {
//!     assert!(session.ingest_batch(&batch()).unwrap().is_accepted());
//! }
//!
//! let m = session.finish(FootSide::Right).unwrap();
//! assert!((m.length_cm() - 26.0).abs() < 1e-6);
//! assert!((m.width_cm() - 10.0).abs() < 1e-6);
//! assert_eq!(session.phase().kind(), PhaseKind::Finished);
//! assert_eq!(
//!     session.formatted_size(SizeFormat::Us, SizeGender::Mens).as_deref(),
//!     Some("US Men's 9")
//! );
//! ```
//!
//! # Logging
//!
//! Batch verdicts are logged at `debug`, phase transitions at `info` and
//! failures or degenerate geometry at `warn`, through [`tracing`].

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod aggregator;
mod error;
mod extract;
mod params;
mod planar;
mod session;
mod status;
mod worker;

#[cfg(test)]
mod test_utils;

pub use aggregator::{AcceptResult, AccumulatedPointSet, PointSnapshot, VertexAggregator};
pub use error::{ScanError, ScanResult};
pub use extract::{Extraction, MeasurementExtractor, PrincipalAxes};
pub use params::ScanParams;
pub use session::{
    EVENT_LOG_CAPACITY, FailureKind, ScanEvent, ScanFailure, ScanPhase, ScanSession,
};
pub use status::{
    MSG_GROUND_FOUND, MSG_KEEP_SCANNING, MSG_POINT_AT_FLOOR, PhaseKind, SessionStatus,
    status_message,
};
pub use worker::{ScanHandle, ScanWorker};
