//! # Halftone Builder
//!
//! Turns an intensity field into a mesh of disc-cylinder dots, one per
//! pixel, whose radius follows the pixel's ink density.
//!
//! ## Coordinates
//!
//! Pixel `(row, col)` lands at `(col, rows - row)`: columns run along +X
//! and rows are flipped so the top of the image ends up at +Y.
//!
//! ## Screen angle
//!
//! The image collaborator rotates the source by [`ScreenAngle::image_rotation`]
//! before sampling so dot rows do not alias with the pixel grid. After all
//! dots are stamped the mesh is rotated by [`ScreenAngle::mesh_compensation`],
//! the exact negation, which puts the print back on its axes.

use crate::error::MeshError;
use crate::field::IntensityField;
use crate::instance::{InstanceBatch, Placement};
use crate::mesh::Mesh;
use crate::primitives::Primitive;
use config::constants::{
    DEFAULT_HALFTONE_HEIGHT, DEFAULT_SIDES, PACKING_FACTOR, SCREEN_ANGLE_DEGREES,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Rotation shared between image preparation and halftone building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenAngle(pub f64);

impl ScreenAngle {
    /// No screen rotation.
    pub const NONE: Self = Self(0.0);

    /// Angle in degrees the source image is rotated by, counter-clockwise
    /// as displayed.
    #[inline]
    pub fn image_rotation(self) -> f64 {
        self.0
    }

    /// Angle in degrees the dot mesh is rotated by about Z.
    ///
    /// # Example
    ///
    /// ```rust
    /// use halftone_mesh::ScreenAngle;
    ///
    /// let screen = ScreenAngle(45.0);
    /// assert_eq!(screen.image_rotation() + screen.mesh_compensation(), 0.0);
    /// ```
    #[inline]
    pub fn mesh_compensation(self) -> f64 {
        -self.0
    }
}

impl Default for ScreenAngle {
    fn default() -> Self {
        Self(SCREEN_ANGLE_DEGREES)
    }
}

/// Parameters of the dot mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalftoneParams {
    /// Height of every dot
    pub dot_height: f64,
    /// Lateral subdivisions per dot
    pub sides: u32,
    /// Intensity to radius factor
    pub packing: f64,
    /// Screen rotation, see module docs
    pub screen: ScreenAngle,
    /// Stamp dots on the rayon pool
    pub parallel: bool,
}

impl HalftoneParams {
    /// Default parameters with the given dot height.
    pub fn with_height(dot_height: f64) -> Self {
        Self {
            dot_height,
            ..Self::default()
        }
    }
}

impl Default for HalftoneParams {
    fn default() -> Self {
        Self {
            dot_height: DEFAULT_HALFTONE_HEIGHT,
            sides: DEFAULT_SIDES,
            packing: PACKING_FACTOR,
            screen: ScreenAngle::default(),
            parallel: false,
        }
    }
}

/// Builds halftone dot meshes.
#[derive(Debug, Clone, Default)]
pub struct HalftoneBuilder {
    params: HalftoneParams,
}

impl HalftoneBuilder {
    /// Creates a builder.
    pub fn new(params: HalftoneParams) -> Self {
        Self { params }
    }

    /// The builder's parameters.
    pub fn params(&self) -> &HalftoneParams {
        &self.params
    }

    /// The dot primitive.
    pub fn primitive(&self) -> Primitive {
        Primitive::DiscCylinder {
            sides: self.params.sides,
            height: self.params.dot_height,
        }
    }

    /// Placement of the dot for pixel `(row, col)` of a field with `rows` rows.
    #[inline]
    pub fn placement(&self, rows: usize, row: usize, col: usize, intensity: f64) -> Placement {
        Placement::new(
            intensity * self.params.packing,
            col as f64,
            (rows - row) as f64,
            0.0,
        )
    }

    /// Stamps one dot per pixel without the screen compensation.
    ///
    /// Capacity equals the pixel count; zero-intensity pixels are skipped.
    pub fn stamp(&self, field: &IntensityField) -> Result<InstanceBatch, MeshError> {
        if !(self.params.packing > 0.0 && self.params.packing.is_finite()) {
            return Err(MeshError::degenerate(format!(
                "Packing factor must be positive: {}",
                self.params.packing
            )));
        }

        let rows = field.rows();
        let mut batch = InstanceBatch::new(field.len(), self.primitive())?;

        if self.params.parallel {
            let placements: Vec<Placement> = (0..field.cols())
                .flat_map(|col| (0..rows).map(move |row| (row, col)))
                .map(|(row, col)| self.placement(rows, row, col, field.get(row, col)))
                .collect();
            batch.extend_parallel(&placements)?;
        } else {
            for col in 0..field.cols() {
                for row in 0..rows {
                    batch.add_placement(self.placement(rows, row, col, field.get(row, col)))?;
                }
            }
        }

        debug!(
            pixels = field.len(),
            dots = batch.instances(),
            "stamped halftone dots"
        );
        Ok(batch)
    }

    /// Builds the dot mesh, rotated back by the screen compensation.
    pub fn build(&self, field: &IntensityField) -> Result<Mesh, MeshError> {
        info!(rows = field.rows(), cols = field.cols(), "building halftone...");
        let mut mesh = self.stamp(field)?.into_mesh()?;
        mesh.rotate_z(self.params.screen.mesh_compensation());
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::DVec3;

    fn unrotated(dot_height: f64, sides: u32) -> HalftoneBuilder {
        HalftoneBuilder::new(HalftoneParams {
            dot_height,
            sides,
            screen: ScreenAngle::NONE,
            ..HalftoneParams::default()
        })
    }

    #[test]
    fn test_full_field_makes_one_dot_per_pixel() {
        let field = IntensityField::filled(2, 2, 1.0).unwrap();
        let builder = unrotated(1.0, 10);
        let batch = builder.stamp(&field).unwrap();
        assert_eq!(batch.v_off(), 4 * batch.v_len());
        assert_eq!(batch.instances(), 4);
    }

    #[test]
    fn test_empty_field_makes_no_dots() {
        let field = IntensityField::filled(2, 2, 0.0).unwrap();
        let batch = unrotated(1.0, 10).stamp(&field).unwrap();
        assert_eq!(batch.v_off(), 0);
        assert!(batch.into_mesh().unwrap().is_empty());
    }

    #[test]
    fn test_pixel_mapping_transposes_and_flips() {
        let builder = unrotated(1.0, 10);
        let p = builder.placement(5, 1, 3, 1.0);
        assert_eq!(p.position, DVec3::new(3.0, 4.0, 0.0));
        assert_abs_diff_eq!(p.radius, PACKING_FACTOR);
    }

    #[test]
    fn test_radius_follows_intensity() {
        let field = IntensityField::new(1, 1, vec![0.5]).unwrap();
        let builder = unrotated(1.0, 6);
        let batch = builder.stamp(&field).unwrap();
        let rim = batch.finalized_vertices()[0];
        let center = batch.finalized_vertices()[12];
        assert_abs_diff_eq!((rim - center).length(), 0.5 * PACKING_FACTOR, epsilon = 1e-12);
    }

    #[test]
    fn test_dots_keep_full_height() {
        let field = IntensityField::filled(3, 2, 0.3).unwrap();
        let mesh = unrotated(0.2, 10).build(&field).unwrap();
        let bounds = mesh.bounds().unwrap();
        assert_abs_diff_eq!(bounds.origin.z, 0.0);
        assert_abs_diff_eq!(bounds.extent.z, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_build_applies_compensation() {
        let field = IntensityField::new(1, 1, vec![1.0]).unwrap();
        let params = HalftoneParams {
            dot_height: 1.0,
            screen: ScreenAngle(90.0),
            ..HalftoneParams::default()
        };
        let mesh = HalftoneBuilder::new(params).build(&field).unwrap();
        // Dot at (0, 1) turned by -90 degrees lands on (1, 0)
        let center = mesh.vertex(2 * DEFAULT_SIDES);
        assert_abs_diff_eq!(center.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(center.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let data: Vec<f64> = (0..48).map(|i| (i % 6) as f64 / 5.0).collect();
        let field = IntensityField::new(6, 8, data).unwrap();
        let sequential = HalftoneBuilder::default().build(&field).unwrap();
        let parallel = HalftoneBuilder::new(HalftoneParams {
            parallel: true,
            ..HalftoneParams::default()
        })
        .build(&field)
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_halftone_is_closed() {
        let data: Vec<f64> = (0..20).map(|i| i as f64 / 19.0).collect();
        let field = IntensityField::new(4, 5, data).unwrap();
        let mesh = HalftoneBuilder::default().build(&field).unwrap();
        assert!(crate::validate::check(&mesh).is_closed());
    }

    #[test]
    fn test_invalid_sides_fail_fast() {
        let field = IntensityField::filled(1, 1, 1.0).unwrap();
        assert!(unrotated(1.0, 2).build(&field).is_err());
    }
}
