//! # Instance Batch
//!
//! Stamps many scaled and translated copies of one primitive into a single
//! pair of flat vertex/face buffers.
//!
//! The buffers are sized once, at construction, for the declared instance
//! capacity. Each stamp writes exactly one template's worth of vertices and
//! faces at the current offsets, with face indices shifted by the vertex
//! offset, so the written prefix is always a valid indexed mesh. Zero-radius
//! placements are skipped and never advance the offsets; only the
//! `[0, v_off)` / `[0, f_off)` prefix is meaningful.

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::primitives::{Primitive, Template};
use config::constants::{MAX_TRIANGLES, MAX_VERTICES};
use glam::DVec3;
use rayon::prelude::*;
use tracing::debug;

/// Radius and position of one primitive instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Scale applied to the template's X and Y
    pub radius: f64,
    /// Translation applied after scaling
    pub position: DVec3,
}

impl Placement {
    /// Creates a placement.
    pub fn new(radius: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            radius,
            position: DVec3::new(x, y, z),
        }
    }

    /// Zero-radius placements produce no geometry.
    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.radius == 0.0
    }

    fn check(&self) -> Result<(), MeshError> {
        if !(self.radius >= 0.0 && self.radius.is_finite()) {
            return Err(MeshError::degenerate(format!(
                "Instance radius must be finite and non-negative: {}",
                self.radius
            )));
        }
        if !self.position.is_finite() {
            return Err(MeshError::degenerate(format!(
                "Instance position must be finite: {}",
                self.position
            )));
        }
        Ok(())
    }
}

/// Pre-allocated container of instances of one primitive.
///
/// # Example
///
/// ```rust
/// use halftone_mesh::{InstanceBatch, Primitive};
///
/// let dot = Primitive::DiscCylinder { sides: 10, height: 1.0 };
/// let mut batch = InstanceBatch::new(3, dot).unwrap();
/// batch.add(0.5, 0.0, 0.0, 0.0).unwrap();
/// batch.add(0.0, 1.0, 0.0, 0.0).unwrap(); // skipped
/// assert_eq!(batch.instances(), 1);
/// assert_eq!(batch.finalized_vertices().len(), dot.vertex_len());
/// ```
#[derive(Debug, Clone)]
pub struct InstanceBatch {
    primitive: Primitive,
    template: Template,
    capacity: usize,
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
    v_off: usize,
    f_off: usize,
    v_len: usize,
    f_len: usize,
}

impl InstanceBatch {
    /// Creates a batch holding at most `capacity` instances of `primitive`.
    ///
    /// Backing storage for the full capacity is reserved here; the batch
    /// never reallocates afterwards.
    pub fn new(capacity: usize, primitive: Primitive) -> Result<Self, MeshError> {
        let v_len = primitive.vertex_len();
        let f_len = primitive.face_len();

        // One instance must be indexable even when the batch is empty
        if v_len > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: v_len,
                max: MAX_VERTICES,
            });
        }
        if f_len > MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles {
                count: f_len,
                max: MAX_TRIANGLES,
            });
        }

        let vertex_total = capacity
            .checked_mul(v_len)
            .filter(|&n| n <= MAX_VERTICES)
            .ok_or(MeshError::TooManyVertices {
                count: capacity.saturating_mul(v_len),
                max: MAX_VERTICES,
            })?;
        let face_total = capacity
            .checked_mul(f_len)
            .filter(|&n| n <= MAX_TRIANGLES)
            .ok_or(MeshError::TooManyTriangles {
                count: capacity.saturating_mul(f_len),
                max: MAX_TRIANGLES,
            })?;

        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(vertex_total)
            .map_err(|_| MeshError::AllocationFailed {
                what: "vertices",
                count: vertex_total,
            })?;
        vertices.resize(vertex_total, DVec3::ZERO);

        let mut faces = Vec::new();
        faces
            .try_reserve_exact(face_total)
            .map_err(|_| MeshError::AllocationFailed {
                what: "faces",
                count: face_total,
            })?;
        faces.resize(face_total, [0; 3]);

        let template = primitive.template()?;

        debug!(capacity, vertex_total, face_total, ?primitive, "allocated instance batch");

        Ok(Self {
            primitive,
            template,
            capacity,
            vertices,
            faces,
            v_off: 0,
            f_off: 0,
            v_len,
            f_len,
        })
    }

    /// Stamps one instance scaled by `radius` in X/Y and moved to `(x, y, z)`.
    ///
    /// A zero radius is a no-op. Fails with [`MeshError::CapacityExceeded`]
    /// once `capacity` instances have been written; nothing is written on
    /// failure.
    pub fn add(&mut self, radius: f64, x: f64, y: f64, z: f64) -> Result<(), MeshError> {
        self.add_placement(Placement::new(radius, x, y, z))
    }

    /// Stamps one [`Placement`]. See [`InstanceBatch::add`].
    pub fn add_placement(&mut self, placement: Placement) -> Result<(), MeshError> {
        placement.check()?;
        if placement.is_skipped() {
            return Ok(());
        }
        if self.instances() == self.capacity {
            return Err(MeshError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let v_end = self.v_off + self.v_len;
        let f_end = self.f_off + self.f_len;
        stamp(
            &self.template,
            &placement,
            self.v_off,
            &mut self.vertices[self.v_off..v_end],
            &mut self.faces[self.f_off..f_end],
        );

        self.v_off = v_end;
        self.f_off = f_end;
        Ok(())
    }

    /// Stamps many placements on the rayon pool.
    ///
    /// Zero-radius entries are dropped first, then every remaining placement
    /// gets a disjoint slot computed from its position in the filtered list,
    /// so the result is identical to calling [`add_placement`] in order.
    /// Either all placements fit or nothing is written.
    ///
    /// Returns the number of instances written.
    ///
    /// [`add_placement`]: InstanceBatch::add_placement
    pub fn extend_parallel(&mut self, placements: &[Placement]) -> Result<usize, MeshError> {
        for placement in placements {
            placement.check()?;
        }
        let stamps: Vec<Placement> = placements
            .iter()
            .filter(|p| !p.is_skipped())
            .copied()
            .collect();

        if stamps.len() > self.remaining() {
            return Err(MeshError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let (v_len, f_len, base) = (self.v_len, self.f_len, self.v_off);
        let v_end = self.v_off + stamps.len() * v_len;
        let f_end = self.f_off + stamps.len() * f_len;
        let template = &self.template;

        self.vertices[self.v_off..v_end]
            .par_chunks_mut(v_len)
            .zip(self.faces[self.f_off..f_end].par_chunks_mut(f_len))
            .zip(stamps.par_iter())
            .enumerate()
            .for_each(|(k, ((vertices, faces), placement))| {
                stamp(template, placement, base + k * v_len, vertices, faces);
            });

        self.v_off = v_end;
        self.f_off = f_end;
        Ok(stamps.len())
    }

    /// The valid vertex prefix `[0, v_off)`.
    #[inline]
    pub fn finalized_vertices(&self) -> &[DVec3] {
        &self.vertices[..self.v_off]
    }

    /// The valid face prefix `[0, f_off)`.
    #[inline]
    pub fn finalized_faces(&self) -> &[[u32; 3]] {
        &self.faces[..self.f_off]
    }

    /// Consumes the batch, keeping only the written prefix.
    pub fn into_mesh(mut self) -> Result<Mesh, MeshError> {
        self.vertices.truncate(self.v_off);
        self.faces.truncate(self.f_off);
        Mesh::from_parts(self.vertices, self.faces)
    }

    /// The stamped primitive.
    #[inline]
    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    /// Number of instances written so far.
    #[inline]
    pub fn instances(&self) -> usize {
        self.v_off / self.v_len
    }

    /// Instances that still fit.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.instances()
    }

    /// Vertex write offset.
    #[inline]
    pub fn v_off(&self) -> usize {
        self.v_off
    }

    /// Face write offset.
    #[inline]
    pub fn f_off(&self) -> usize {
        self.f_off
    }

    /// Vertices per instance.
    #[inline]
    pub fn v_len(&self) -> usize {
        self.v_len
    }

    /// Faces per instance.
    #[inline]
    pub fn f_len(&self) -> usize {
        self.f_len
    }
}

/// Writes one scaled, translated copy of `template` into the given slots.
fn stamp(
    template: &Template,
    placement: &Placement,
    vertex_base: usize,
    vertices: &mut [DVec3],
    faces: &mut [[u32; 3]],
) {
    let scale = DVec3::new(placement.radius, placement.radius, 1.0);
    for (dst, src) in vertices.iter_mut().zip(&template.vertices) {
        *dst = *src * scale + placement.position;
    }

    // vertex_base fits u32: capacity was checked against MAX_VERTICES
    let base = vertex_base as u32;
    for (dst, src) in faces.iter_mut().zip(&template.faces) {
        *dst = src.map(|i| i + base);
    }
}

#[cfg(test)]
mod tests;
