//! # Configuration Constants
//!
//! Centralized constants for the halftone relief pipeline. All geometry
//! defaults, image preparation weights and precision values are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Halftone**: Dot tessellation and packing
//! - **Relief**: Default heights and downscale factor
//! - **Image**: Luma weights and screen angle
//! - **Limits**: Maximum values for safety bounds
//! - **Test Card**: Geometry of the calibration image

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Area below which a triangle is reported as degenerate.
///
/// Used by mesh validation. Smaller than [`EPSILON`] because the caps of
/// faint dots are legitimately tiny.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// HALFTONE CONSTANTS
// =============================================================================

/// Default number of lateral subdivisions of a halftone dot.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_SIDES, MIN_SIDES};
///
/// let user_sides: Option<u32> = None;
/// let sides = user_sides.unwrap_or(DEFAULT_SIDES);
/// assert!(sides >= MIN_SIDES);
/// ```
pub const DEFAULT_SIDES: u32 = 10;

/// Minimum number of lateral subdivisions for a disc-cylinder.
///
/// Fewer than three points cannot enclose an area.
pub const MIN_SIDES: u32 = 3;

/// Maximum number of lateral subdivisions for a disc-cylinder.
///
/// Keeps `2 * sides + 2` vertex indices well inside `u32`.
pub const MAX_SIDES: u32 = 1 << 16;

/// Ratio between pixel intensity and dot radius.
///
/// Dots sit on a unit pixel grid. Each dot is its own closed shell, so
/// neighbours that meet at full intensity still export as valid solids.
///
/// # Example
///
/// ```rust
/// use config::constants::PACKING_FACTOR;
///
/// let intensity = 0.5;
/// assert_eq!(intensity * PACKING_FACTOR, 0.375);
/// ```
pub const PACKING_FACTOR: f64 = 0.75;

// =============================================================================
// RELIEF CONSTANTS
// =============================================================================

/// Default substrate (base plate) height in millimetres.
pub const DEFAULT_SUBSTRATE_HEIGHT: f64 = 1.0;

/// Default halftone dot height in millimetres.
pub const DEFAULT_HALFTONE_HEIGHT: f64 = 0.2;

/// Default integer downscale divisor applied to the source image.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SCALE;
///
/// let (rows, cols) = (640u32, 480u32);
/// assert_eq!((rows / DEFAULT_SCALE, cols / DEFAULT_SCALE), (160, 120));
/// ```
pub const DEFAULT_SCALE: u32 = 4;

/// File name suffix of the halftone STL.
pub const MASK_SUFFIX: &str = "-mask.stl";

/// File name suffix of the substrate STL.
pub const SUBSTRATE_SUFFIX: &str = "-subs.stl";

// =============================================================================
// IMAGE CONSTANTS
// =============================================================================

/// BT.601 weights used to convert RGB to luma (R, G, B).
///
/// # Example
///
/// ```rust
/// use config::constants::LUMA_WEIGHTS;
///
/// let [r, g, b] = LUMA_WEIGHTS;
/// let white = 255.0 * r + 255.0 * g + 255.0 * b;
/// assert!((white - 255.0).abs() < 0.1);
/// ```
pub const LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Maximum channel value of an 8-bit image.
pub const CHANNEL_MAX: f64 = 255.0;

/// Halftone screen angle in degrees.
///
/// The source image is rotated by this angle before sampling and the dot
/// mesh is rotated back by its negation, so the dot rows never line up
/// with the pixel grid.
pub const SCREEN_ANGLE_DEGREES: f64 = 45.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum vertex count of a single mesh.
///
/// Triangle indices are stored as `u32`.
pub const MAX_VERTICES: usize = u32::MAX as usize;

/// Maximum triangle count of a single mesh.
///
/// Binary STL stores the triangle count as a `u32`.
pub const MAX_TRIANGLES: usize = u32::MAX as usize;

/// Size of the binary STL header in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one binary STL triangle record in bytes.
pub const STL_TRIANGLE_SIZE: usize = 50;

// =============================================================================
// TEST CARD CONSTANTS
// =============================================================================

/// Edge length of the square calibration image in pixels.
pub const TESTCARD_SIZE: u32 = 640;

/// Gap between neighbouring grey bars in pixels.
pub const TESTCARD_BORDER: u32 = 4;

/// Number of grey bars.
pub const TESTCARD_DIVS: u32 = 20;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
