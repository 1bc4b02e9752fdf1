//! # Transforms
//!
//! Rigid transforms applied in place to a vertex buffer: rotate about Z,
//! translate, and orient (center the bounding box on selected axes).

use crate::bounds::Bounds;
use crate::error::MeshError;
use glam::{DMat3, DVec3};
use tracing::trace;

/// Selects which axes [`orient`] centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisMask {
    /// Center along X
    pub x: bool,
    /// Center along Y
    pub y: bool,
    /// Center along Z
    pub z: bool,
}

impl AxisMask {
    /// All three axes.
    pub const ALL: Self = Self::new(true, true, true);
    /// The horizontal plane only.
    pub const XY: Self = Self::new(true, true, false);

    /// Creates a mask from per-axis flags.
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    fn as_factors(self) -> DVec3 {
        DVec3::new(
            f64::from(u8::from(self.x)),
            f64::from(u8::from(self.y)),
            f64::from(u8::from(self.z)),
        )
    }
}

/// One step of an ordered transform list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// Rotation about the Z axis through the origin, in degrees
    RotateZ(f64),
    /// Translation by a vector
    Translate(DVec3),
    /// Bounding-box centering on the masked axes
    Orient(AxisMask),
}

// =============================================================================
// ROTATE
// =============================================================================

/// Rotates vertices about the Z axis through the world origin.
///
/// Applies `[[cos, -sin, 0], [sin, cos, 0], [0, 0, 1]]`, so positive angles
/// turn counter-clockwise seen from +Z.
///
/// # Example
///
/// ```rust
/// use halftone_mesh::transform::rotate_z;
/// use glam::DVec3;
///
/// let mut v = [DVec3::X];
/// rotate_z(&mut v, 90.0);
/// assert!((v[0] - DVec3::Y).length() < 1e-12);
/// ```
pub fn rotate_z(vertices: &mut [DVec3], angle_degrees: f64) {
    let matrix = DMat3::from_rotation_z(angle_degrees.to_radians());
    for v in vertices.iter_mut() {
        *v = matrix * *v;
    }
}

// =============================================================================
// TRANSLATE
// =============================================================================

/// Adds `offset` to every vertex.
pub fn translate(vertices: &mut [DVec3], offset: DVec3) {
    for v in vertices.iter_mut() {
        *v += offset;
    }
}

// =============================================================================
// ORIENT
// =============================================================================

/// Centers the bounding box of `vertices` on each enabled axis.
///
/// Disabled axes are left untouched. Returns the offset that was applied.
///
/// # Example
///
/// ```rust
/// use halftone_mesh::transform::{orient, AxisMask};
/// use glam::DVec3;
///
/// let mut v = [DVec3::new(2.0, 2.0, 2.0), DVec3::new(4.0, 6.0, 3.0)];
/// orient(&mut v, AxisMask::XY).unwrap();
/// assert_eq!(v[0], DVec3::new(-1.0, -2.0, 2.0));
/// ```
pub fn orient(vertices: &mut [DVec3], axes: AxisMask) -> Result<DVec3, MeshError> {
    let bounds = Bounds::from_vertices(vertices)?;
    let offset = -bounds.center() * axes.as_factors();
    trace!(?axes, ?offset, "orient");
    translate(vertices, offset);
    Ok(offset)
}

/// Applies transform operations in list order.
pub fn apply(vertices: &mut [DVec3], ops: &[TransformOp]) -> Result<(), MeshError> {
    for op in ops {
        match *op {
            TransformOp::RotateZ(angle) => rotate_z(vertices, angle),
            TransformOp::Translate(offset) => translate(vertices, offset),
            TransformOp::Orient(axes) => {
                orient(vertices, axes)?;
            }
        }
    }
    Ok(())
}
