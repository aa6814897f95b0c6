//! Error types for size chart construction.

use thiserror::Error;

/// Result type alias for sizing operations.
pub type SizingResult<T> = Result<T, SizingError>;

/// Errors that can occur when building a size chart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    /// Chart has no rows.
    #[error("size chart is empty")]
    EmptyChart,

    /// Rows are not in ascending heel-to-toe order.
    #[error("size chart row {index} ({length_cm} cm) is not longer than the previous row")]
    NotAscending {
        /// Offending row index.
        index: usize,
        /// Its heel-to-toe length.
        length_cm: f64,
    },

    /// A row has a non-finite or non-positive length.
    #[error("size chart row {index} has invalid length {length_cm}")]
    InvalidLength {
        /// Offending row index.
        index: usize,
        /// Its heel-to-toe length.
        length_cm: f64,
    },
}
