//! Completed foot measurement.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FootSide, Timestamp};

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Result of a successful scan.
///
/// Created once when a scan session completes and never mutated
/// afterwards, so all fields are read through accessors.
///
/// # Example
///
/// ```
/// use foot_types::{FootMeasurement, FootSide};
///
/// let m = FootMeasurement::new(26.5, 10.2, None, 15, FootSide::Left);
/// assert_eq!(m.formatted_width(), "10.2 cm (4.0\")");
/// assert_eq!(m.formatted_arch_height(), "Not measured");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FootMeasurement {
    length_cm: f64,
    width_cm: f64,
    arch_height_cm: Option<f64>,
    timestamp: Timestamp,
    source_batch_count: usize,
    foot_side: FootSide,
}

impl FootMeasurement {
    /// Create a measurement stamped with the current time.
    #[must_use]
    pub fn new(
        length_cm: f64,
        width_cm: f64,
        arch_height_cm: Option<f64>,
        source_batch_count: usize,
        foot_side: FootSide,
    ) -> Self {
        Self {
            length_cm,
            width_cm,
            arch_height_cm,
            timestamp: Timestamp::now(),
            source_batch_count,
            foot_side,
        }
    }

    /// Replace the timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Heel-to-toe length along the principal axis, in centimetres.
    #[must_use]
    pub const fn length_cm(&self) -> f64 {
        self.length_cm
    }

    /// Width across the principal axis, in centimetres.
    #[must_use]
    pub const fn width_cm(&self) -> f64 {
        self.width_cm
    }

    /// Highest point above the floor, in centimetres, when a floor was known.
    #[must_use]
    pub const fn arch_height_cm(&self) -> Option<f64> {
        self.arch_height_cm
    }

    /// When the measurement was produced.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Number of accepted sensor batches that contributed.
    #[must_use]
    pub const fn source_batch_count(&self) -> usize {
        self.source_batch_count
    }

    /// Which foot was scanned.
    #[must_use]
    pub const fn foot_side(&self) -> FootSide {
        self.foot_side
    }

    /// Length in inches.
    #[must_use]
    pub fn length_inches(&self) -> f64 {
        self.length_cm / CM_PER_INCH
    }

    /// Width in inches.
    #[must_use]
    pub fn width_inches(&self) -> f64 {
        self.width_cm / CM_PER_INCH
    }

    /// Arch height in inches.
    #[must_use]
    pub fn arch_height_inches(&self) -> Option<f64> {
        self.arch_height_cm.map(|cm| cm / CM_PER_INCH)
    }

    /// Length as `"26.5 cm (10.4\")"`.
    #[must_use]
    pub fn formatted_length(&self) -> String {
        format_cm_inches(self.length_cm)
    }

    /// Width as `"10.2 cm (4.0\")"`.
    #[must_use]
    pub fn formatted_width(&self) -> String {
        format_cm_inches(self.width_cm)
    }

    /// Arch height, or `"Not measured"` when no floor was known.
    #[must_use]
    pub fn formatted_arch_height(&self) -> String {
        self.arch_height_cm
            .map_or_else(|| "Not measured".to_string(), format_cm_inches)
    }
}

fn format_cm_inches(cm: f64) -> String {
    format!("{cm:.1} cm ({:.1}\")", cm / CM_PER_INCH)
}
