//! # Primitives
//!
//! Unit-scale vertex/face templates for the two shapes a relief is built
//! from: the disc-capped cylinder used for halftone dots and the cuboid used
//! for the substrate.
//!
//! Templates are stamped many times by [`InstanceBatch`](crate::InstanceBatch),
//! so the per-instance vertex and face counts are known from the variant
//! alone, before any template is generated.

pub mod cuboid;
pub mod cylinder;

pub use cuboid::create_cuboid;
pub use cylinder::create_disc_cylinder;

use crate::error::MeshError;
use glam::DVec3;

/// The closed set of primitive shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Cylinder on the unit circle with fan-triangulated end caps.
    DiscCylinder {
        /// Number of lateral subdivisions (>= 3)
        sides: u32,
        /// Extent along Z
        height: f64,
    },
    /// Box spanning `[-1, 1]` in X and Y and `[0, height]` in Z.
    Cuboid {
        /// Extent along Z
        height: f64,
    },
}

impl Primitive {
    /// Number of vertices in one instance of this primitive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use halftone_mesh::Primitive;
    ///
    /// let dot = Primitive::DiscCylinder { sides: 10, height: 1.0 };
    /// assert_eq!(dot.vertex_len(), 22);
    /// assert_eq!(Primitive::Cuboid { height: 1.0 }.vertex_len(), 8);
    /// ```
    pub fn vertex_len(&self) -> usize {
        match *self {
            Primitive::DiscCylinder { sides, .. } => 2 * sides as usize + 2,
            Primitive::Cuboid { .. } => cuboid::CUBOID_VERTICES,
        }
    }

    /// Number of triangles in one instance of this primitive.
    pub fn face_len(&self) -> usize {
        match *self {
            Primitive::DiscCylinder { sides, .. } => 4 * sides as usize,
            Primitive::Cuboid { .. } => cuboid::CUBOID_FACES,
        }
    }

    /// Generates the unit-scale template for this primitive.
    pub fn template(&self) -> Result<Template, MeshError> {
        match *self {
            Primitive::DiscCylinder { sides, height } => create_disc_cylinder(sides, height),
            Primitive::Cuboid { height } => create_cuboid(height),
        }
    }
}

/// Vertex and face lists of one primitive in its local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Vertex positions, radius 1 in X/Y
    pub vertices: Vec<DVec3>,
    /// Counter-clockwise (outward) triangles indexing `vertices`
    pub faces: Vec<[u32; 3]>,
}

pub(crate) fn check_height(height: f64, shape: &str) -> Result<(), MeshError> {
    if !(height > 0.0 && height.is_finite()) {
        return Err(MeshError::degenerate(format!(
            "{shape} height must be positive: {height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_match_templates() {
        for primitive in [
            Primitive::DiscCylinder { sides: 3, height: 1.0 },
            Primitive::DiscCylinder { sides: 10, height: 0.2 },
            Primitive::DiscCylinder { sides: 64, height: 5.0 },
            Primitive::Cuboid { height: 2.0 },
        ] {
            let template = primitive.template().unwrap();
            assert_eq!(template.vertices.len(), primitive.vertex_len());
            assert_eq!(template.faces.len(), primitive.face_len());
        }
    }

    #[test]
    fn test_template_rejects_bad_height() {
        assert!(Primitive::Cuboid { height: 0.0 }.template().is_err());
        assert!(Primitive::DiscCylinder { sides: 8, height: -1.0 }
            .template()
            .is_err());
        assert!(Primitive::Cuboid { height: f64::NAN }.template().is_err());
    }
}
