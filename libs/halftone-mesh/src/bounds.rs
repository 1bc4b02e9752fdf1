//! # Mesh Bounds
//!
//! Axis-aligned bounding box expressed as origin plus extent.

use crate::error::MeshError;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Componentwise minimum
    pub origin: DVec3,
    /// Componentwise `max - origin`
    pub extent: DVec3,
}

impl Bounds {
    /// Measures a vertex set.
    ///
    /// An empty set is a precondition violation and yields
    /// [`MeshError::EmptyMesh`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use halftone_mesh::Bounds;
    /// use glam::DVec3;
    ///
    /// let bounds = Bounds::from_vertices(&[DVec3::ZERO, DVec3::new(2.0, 4.0, 1.0)]).unwrap();
    /// assert_eq!(bounds.center(), DVec3::new(1.0, 2.0, 0.5));
    /// ```
    pub fn from_vertices(vertices: &[DVec3]) -> Result<Self, MeshError> {
        let (first, rest) = vertices.split_first().ok_or(MeshError::EmptyMesh)?;

        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));

        Ok(Self {
            origin: min,
            extent: max - min,
        })
    }

    /// Componentwise maximum.
    #[inline]
    pub fn max(&self) -> DVec3 {
        self.origin + self.extent
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> DVec3 {
        self.origin + self.extent / 2.0
    }

    /// Half of the extent in X and Y.
    #[inline]
    pub fn half_footprint(&self) -> (f64, f64) {
        (self.extent.x / 2.0, self.extent.y / 2.0)
    }
}
