//! User-facing scan progress.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shown until a floor has been detected.
pub const MSG_POINT_AT_FLOOR: &str = "Point camera at the floor";

/// Shown once the floor is known but no foot geometry has been accepted.
pub const MSG_GROUND_FOUND: &str = "Ground detected! Scan your foot";

/// Shown while too few sections have been captured to finish.
pub const MSG_KEEP_SCANNING: &str = "Scanning... move slowly around your foot";

/// Progress message for the current scan state.
///
/// Ordered policy: no floor, then floor without batches, then fewer than
/// `min_batches` batches, then a section count once finishing is possible.
#[must_use]
pub fn status_message(ground_established: bool, batch_count: usize, min_batches: usize) -> String {
    if !ground_established {
        MSG_POINT_AT_FLOOR.to_string()
    } else if batch_count == 0 {
        MSG_GROUND_FOUND.to_string()
    } else if batch_count < min_batches {
        MSG_KEEP_SCANNING.to_string()
    } else {
        format!("{batch_count} sections captured")
    }
}

/// Coarse session phase, without the attached result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PhaseKind {
    /// Not scanning.
    Idle,
    /// Accepting batches.
    Scanning,
    /// Measurement produced.
    Finished,
    /// Finish failed; restart required.
    Failed,
}

impl PhaseKind {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Finished => "finished",
            Self::Failed => "failed",
        }
    }
}

/// Read-only view of a session for live progress display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionStatus {
    /// Current phase.
    pub phase: PhaseKind,
    /// Current progress or failure message.
    pub message: String,
    /// Accepted batches so far.
    pub accepted_batch_count: usize,
    /// Accepted points so far.
    pub accepted_point_count: usize,
    /// Whether the floor has been detected.
    pub ground_established: bool,
    /// Whether enough batches have been accepted to finish.
    pub ready_to_finish: bool,
}
