//! # Config Crate
//!
//! Centralized configuration constants for the halftone relief pipeline.
//! All magic numbers and tunable parameters are defined here so the image,
//! mesh and command-line crates agree on defaults.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_SIDES, PACKING_FACTOR, SCREEN_ANGLE_DEGREES};
//!
//! // A fully dark pixel produces a dot of radius PACKING_FACTOR.
//! let radius = 1.0 * PACKING_FACTOR;
//! assert!(radius < 1.0);
//!
//! assert!(DEFAULT_SIDES >= 3);
//! assert_eq!(SCREEN_ANGLE_DEGREES, 45.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Print Oriented**: Units are millimetres as understood by slicers
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
