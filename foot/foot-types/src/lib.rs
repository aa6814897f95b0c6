//! Core types for foot scanning.
//!
//! This crate provides the foundational types shared by the scanning and
//! sizing crates:
//!
//! - [`Vertex`] - A world-space point delivered by the depth sensor
//! - [`GroundReference`] - Height of the detected support surface
//! - [`GroundTransform`] - 4×4 world transform of a detected horizontal plane
//! - [`FootSide`] - Which foot was scanned
//! - [`FootMeasurement`] - Immutable result of a completed scan
//! - [`Timestamp`] - Nanosecond wall-clock timestamp
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - Mobile hosts through FFI
//! - CLI tools
//! - Servers
//!
//! # Units
//!
//! World-space coordinates are **metres**. Measurements are reported in
//! **centimetres**, matching shoe size charts.
//!
//! # Coordinate System
//!
//! Uses the sensor's world frame:
//! - X: horizontal
//! - Y: up (vertical)
//! - Z: horizontal
//!
//! The horizontal plane is therefore `(x, z)`.
//!
//! # Example
//!
//! ```
//! use foot_types::{FootMeasurement, FootSide, GroundReference, Vertex};
//!
//! let v = Vertex::from_coords(0.1, 0.15, -0.2);
//! let ground = GroundReference::at(0.10);
//! assert!((v.height_above(&ground) - 0.05).abs() < 1e-12);
//!
//! let m = FootMeasurement::new(26.5, 10.2, Some(4.5), 15, FootSide::Left);
//! assert_eq!(m.formatted_length(), "26.5 cm (10.4\")");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod ground;
mod measurement;
mod side;
mod time;
mod vertex;

pub use ground::{GroundReference, GroundTransform};
pub use measurement::{CM_PER_INCH, FootMeasurement};
pub use side::FootSide;
pub use time::Timestamp;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2};
