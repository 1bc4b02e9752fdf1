//! # Substrate Builder
//!
//! Builds the flat base plate the halftone mounts on.

use crate::error::MeshError;
use crate::instance::InstanceBatch;
use crate::mesh::Mesh;
use crate::primitives::Primitive;
use tracing::info;

/// Builds square substrate plates.
#[derive(Debug, Clone, Copy)]
pub struct SubstrateBuilder {
    height: f64,
}

impl SubstrateBuilder {
    /// Creates a builder for plates of the given height.
    pub fn new(height: f64) -> Self {
        Self { height }
    }

    /// Builds one cuboid at the origin whose half-size in X and Y is
    /// `max(half_width, half_height)`.
    ///
    /// The plate is square so it covers the halftone footprint whichever
    /// side is longer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use halftone_mesh::SubstrateBuilder;
    ///
    /// let plate = SubstrateBuilder::new(1.0).build(3.0, 5.0).unwrap();
    /// let bounds = plate.bounds().unwrap();
    /// assert_eq!(bounds.extent.x, 10.0);
    /// assert_eq!(bounds.extent.y, 10.0);
    /// ```
    pub fn build(&self, half_width: f64, half_height: f64) -> Result<Mesh, MeshError> {
        let half_size = half_width.max(half_height);
        if !(half_size > 0.0 && half_size.is_finite()) {
            return Err(MeshError::degenerate(format!(
                "Substrate half extents must be positive: {half_width} x {half_height}"
            )));
        }

        info!(half_size, height = self.height, "building substrate...");
        let mut batch = InstanceBatch::new(1, Primitive::Cuboid { height: self.height })?;
        batch.add(half_size, 0.0, 0.0, 0.0)?;
        batch.into_mesh()
    }
}
