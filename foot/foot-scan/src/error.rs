//! Error types for scan aggregation and measurement.

use thiserror::Error;

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while scanning.
///
/// Every variant is local and non-fatal: a rejected batch leaves the session
/// untouched, and a failed finish leaves it restartable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// Too few points or batches to proceed.
    #[error("insufficient input: need at least {required} {what}, got {actual}")]
    InsufficientInput {
        /// What was counted.
        what: &'static str,
        /// Minimum required.
        required: usize,
        /// Actual count.
        actual: usize,
    },

    /// Batch centroid is too far from the session's reference centroid.
    #[error("batch drifted {distance:.3} m from the reference centroid (tolerance {tolerance:.3} m)")]
    DriftRejected {
        /// Planar distance from the reference centroid, in metres.
        distance: f64,
        /// Allowed distance, in metres.
        tolerance: f64,
    },

    /// An extent lies outside its plausible range.
    #[error("{what} {value:.2} {unit} is outside [{min:.2}, {max:.2}]")]
    OutOfBounds {
        /// Which extent.
        what: &'static str,
        /// Observed value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Unit of all three numbers.
        unit: &'static str,
    },

    /// Point cluster has near-zero planar variance.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Operation issued in a phase that does not allow it.
    #[error("cannot {operation} while {phase}")]
    InvalidPhase {
        /// The rejected operation.
        operation: &'static str,
        /// The current phase.
        phase: &'static str,
    },

    /// Parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// The thread owning the session has exited.
    #[error("scan worker has stopped")]
    WorkerStopped,
}

impl ScanError {
    /// Create an insufficient input error.
    #[must_use]
    pub const fn insufficient(what: &'static str, required: usize, actual: usize) -> Self {
        Self::InsufficientInput {
            what,
            required,
            actual,
        }
    }

    /// Create an out-of-bounds error.
    #[must_use]
    pub const fn out_of_bounds(
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
        unit: &'static str,
    ) -> Self {
        Self::OutOfBounds {
            what,
            value,
            min,
            max,
            unit,
        }
    }

    /// Create an invalid phase error.
    #[must_use]
    pub const fn invalid_phase(operation: &'static str, phase: &'static str) -> Self {
        Self::InvalidPhase { operation, phase }
    }

    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }

    /// Short machine-friendly name of the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientInput { .. } => "insufficient_input",
            Self::DriftRejected { .. } => "drift_rejected",
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::DegenerateGeometry(_) => "degenerate_geometry",
            Self::InvalidPhase { .. } => "invalid_phase",
            Self::InvalidParams(_) => "invalid_params",
            Self::WorkerStopped => "worker_stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScanError::insufficient("raw points", 50, 12);
        assert_eq!(
            format!("{err}"),
            "insufficient input: need at least 50 raw points, got 12"
        );

        let err = ScanError::DriftRejected {
            distance: 0.5,
            tolerance: 0.2,
        };
        assert_eq!(
            format!("{err}"),
            "batch drifted 0.500 m from the reference centroid (tolerance 0.200 m)"
        );

        let err = ScanError::out_of_bounds("foot length", 50.0, 15.0, 45.0, "cm");
        assert_eq!(format!("{err}"), "foot length 50.00 cm is outside [15.00, 45.00]");

        let err = ScanError::invalid_phase("ingest a batch", "idle");
        assert_eq!(format!("{err}"), "cannot ingest a batch while idle");

        let err = ScanError::invalid_params("drift tolerance must be positive");
        assert!(format!("{err}").contains("drift tolerance"));

        assert_eq!(format!("{}", ScanError::WorkerStopped), "scan worker has stopped");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(ScanError::insufficient("batches", 3, 1).kind(), "insufficient_input");
        assert_eq!(
            ScanError::DegenerateGeometry("flat".to_string()).kind(),
            "degenerate_geometry"
        );
        assert_eq!(ScanError::WorkerStopped.kind(), "worker_stopped");
    }
}
