//! Shoe size chart lookup.
//!
//! Maps a heel-to-toe foot length to a shoe size label using a fixed,
//! ascending chart of reference lengths.
//!
//! # Lookup rule
//!
//! 1. Take the first chart row whose heel-to-toe length is at least the
//!    foot length.
//! 2. If that row has no label for the requested format and gender, keep
//!    scanning to the next row that does.
//! 3. If no row is long enough, return the last available label with a
//!    `+` suffix to signal an off-chart foot.
//! 4. If the combination has no available label anywhere, return
//!    [`SIZE_NOT_FOUND`].
//!
//! # Example
//!
//! ```
//! use foot_sizing::{SizeChart, SizeFormat, SizeGender};
//!
//! let chart = SizeChart::standard();
//! assert_eq!(chart.lookup(26.2, SizeFormat::Us, SizeGender::Mens), "9");
//! assert_eq!(chart.lookup(40.0, SizeFormat::Us, SizeGender::Mens), "20+");
//! assert_eq!(
//!     chart.formatted_size(26.2, SizeFormat::Eu, SizeGender::Mens),
//!     "EU 42⅔"
//! );
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod catalog;
mod chart;
mod error;
mod format;
mod recommend;

pub use chart::{
    OFF_CHART_MARKER, SIZE_NOT_FOUND, SizeChart, SizeChartEntry, SizeMatch, UNAVAILABLE,
};
pub use error::{SizingError, SizingResult};
pub use format::{SizeFormat, SizeGender, SizeSlot};
pub use recommend::{AllSizes, MeasurementSizing};
