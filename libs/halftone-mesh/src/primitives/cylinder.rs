//! # Disc-Cylinder Primitive
//!
//! Generates the template for one halftone dot.

use super::{check_height, Template};
use crate::error::MeshError;
use config::constants::{MAX_SIDES, MIN_SIDES};
use glam::DVec3;
use std::f64::consts::PI;

/// Creates a disc-capped cylinder template on the unit circle.
///
/// Vertex layout:
///
/// ```text
/// 0 .. sides            rim at z = 0
/// sides .. 2*sides      rim at z = height
/// 2*sides               bottom centre
/// 2*sides + 1           top centre
/// ```
///
/// Faces (`4 * sides` triangles): bottom fan, top fan, then the two lateral
/// strips. All triangles wind counter-clockwise seen from outside.
///
/// # Arguments
///
/// * `sides` - Number of rim points, at angle `2*PI*i/sides`
/// * `height` - Extent along Z
///
/// # Example
///
/// ```rust
/// use halftone_mesh::primitives::create_disc_cylinder;
///
/// let dot = create_disc_cylinder(10, 1.0).unwrap();
/// assert_eq!(dot.vertices.len(), 22);
/// assert_eq!(dot.faces.len(), 40);
/// ```
pub fn create_disc_cylinder(sides: u32, height: f64) -> Result<Template, MeshError> {
    if sides < MIN_SIDES {
        return Err(MeshError::degenerate(format!(
            "Cylinder sides must be at least {MIN_SIDES}: {sides}"
        )));
    }
    if sides > MAX_SIDES {
        return Err(MeshError::degenerate(format!(
            "Cylinder sides must be at most {MAX_SIDES}: {sides}"
        )));
    }
    check_height(height, "Cylinder")?;

    let n = sides as usize;
    let mut vertices = vec![DVec3::ZERO; 2 * n + 2];

    for i in 0..n {
        let theta = 2.0 * PI * i as f64 / sides as f64;
        let (sin, cos) = theta.sin_cos();
        vertices[i] = DVec3::new(cos, sin, 0.0);
        vertices[i + n] = DVec3::new(cos, sin, height);
    }
    vertices[2 * n] = DVec3::ZERO;
    vertices[2 * n + 1] = DVec3::new(0.0, 0.0, height);

    let bottom_center = 2 * sides;
    let top_center = 2 * sides + 1;
    let mut faces = vec![[0u32; 3]; 4 * n];

    for i in 0..sides {
        let j = (i + 1) % sides;
        let k = i as usize;

        faces[k] = [bottom_center, j, i];
        faces[n + k] = [top_center, i + sides, j + sides];
        faces[2 * n + k] = [i, j, j + sides];
        faces[3 * n + k] = [i, j + sides, i + sides];
    }

    Ok(Template { vertices, faces })
}
