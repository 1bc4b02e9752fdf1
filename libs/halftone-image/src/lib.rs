//! # Halftone Image
//!
//! Image side of the halftone relief: decoding, BT.601 luma, anti-aliased
//! downscale, inversion to ink density and screen-angle rotation, ending in
//! an [`IntensityField`](halftone_mesh::IntensityField) ready for
//! [`HalftoneBuilder`](halftone_mesh::HalftoneBuilder).
//!
//! Also renders the grey-bar calibration [`testcard`].

pub mod error;
pub mod prepare;
pub mod testcard;

pub use error::ImageError;
pub use prepare::{prepare, ImageParams};
pub use testcard::TestCardParams;
