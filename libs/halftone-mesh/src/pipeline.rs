//! # Relief Pipeline
//!
//! Builds the halftone and its substrate from one intensity field and
//! places both for printing:
//!
//! ```text
//! IntensityField → HalftoneBuilder → orient(xyz) → lift onto substrate
//!                                          ↓ bounds
//!                  SubstrateBuilder → orient(xyz) → rest on z = 0
//! ```
//!
//! Both meshes must pass the closed-mesh check before either is returned,
//! so callers never write one file without the other.

use std::fs;
use std::path::{Path, PathBuf};

use config::constants::{DEFAULT_SUBSTRATE_HEIGHT, MASK_SUFFIX, SUBSTRATE_SUFFIX};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::MeshError;
use crate::field::IntensityField;
use crate::halftone::{HalftoneBuilder, HalftoneParams};
use crate::mesh::Mesh;
use crate::stl;
use crate::substrate::SubstrateBuilder;
use crate::transform::{AxisMask, TransformOp};
use crate::validate::MeshReport;

/// Parameters of a full relief.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliefParams {
    /// Height of the base plate
    pub substrate_height: f64,
    /// Dot mesh parameters
    pub halftone: HalftoneParams,
}

impl Default for ReliefParams {
    fn default() -> Self {
        Self {
            substrate_height: DEFAULT_SUBSTRATE_HEIGHT,
            halftone: HalftoneParams::default(),
        }
    }
}

/// A validated halftone and substrate pair, positioned for printing.
#[derive(Debug, Clone)]
pub struct Relief {
    /// Dot mesh sitting on top of the substrate
    pub halftone: Mesh,
    /// Base plate from `z = 0` to `z = substrate_height`
    pub substrate: Mesh,
    /// Validation report of the dot mesh
    pub halftone_report: MeshReport,
    /// Validation report of the base plate
    pub substrate_report: MeshReport,
}

/// Encoded STL files of a relief.
#[derive(Debug, Clone)]
pub struct ReliefFiles {
    /// Halftone STL bytes
    pub mask: Vec<u8>,
    /// Substrate STL bytes
    pub substrate: Vec<u8>,
}

/// Builds the halftone, sizes a substrate to it and places both.
pub fn build_relief(field: &IntensityField, params: &ReliefParams) -> Result<Relief, MeshError> {
    let halftone = build_halftone(field, params)?;

    let (half_width, half_height) = halftone.bounds()?.half_footprint();
    let mut substrate = SubstrateBuilder::new(params.substrate_height).build(half_width, half_height)?;
    substrate.apply(&[
        TransformOp::Orient(AxisMask::ALL),
        TransformOp::Translate(DVec3::new(0.0, 0.0, params.substrate_height / 2.0)),
    ])?;

    let halftone_report = halftone.ensure_closed("halftone")?;
    let substrate_report = substrate.ensure_closed("substrate")?;

    info!(
        dots = halftone.triangle_count() / (4 * params.halftone.sides as usize),
        halftone_triangles = halftone.triangle_count(),
        substrate_triangles = substrate.triangle_count(),
        "relief ready"
    );

    Ok(Relief {
        halftone,
        substrate,
        halftone_report,
        substrate_report,
    })
}

/// Builds the dot mesh alone, centered in X/Y and lifted onto the substrate.
pub fn build_halftone(field: &IntensityField, params: &ReliefParams) -> Result<Mesh, MeshError> {
    let mut halftone = HalftoneBuilder::new(params.halftone).build(field)?;
    if halftone.is_empty() {
        return Err(MeshError::degenerate(
            "intensity field produced no dots (image is blank)",
        ));
    }

    halftone.apply(&[
        TransformOp::Orient(AxisMask::ALL),
        TransformOp::Translate(DVec3::new(
            0.0,
            0.0,
            params.substrate_height + params.halftone.dot_height / 2.0,
        )),
    ])?;
    Ok(halftone)
}

impl Relief {
    /// Encodes both meshes; fails before producing either if one fails.
    pub fn encode(&self, name: &str) -> Result<ReliefFiles, MeshError> {
        Ok(ReliefFiles {
            mask: stl::encode_binary(&self.halftone, &format!("{name}-mask"))?,
            substrate: stl::encode_binary(&self.substrate, &format!("{name}-subs"))?,
        })
    }
}

impl ReliefFiles {
    /// Writes both files beside `input`, named by [`output_paths`].
    ///
    /// Either both files end up on disk or neither does.
    pub fn write(&self, input: &Path) -> Result<(PathBuf, PathBuf), MeshError> {
        let (mask_path, substrate_path) = output_paths(input);
        let mask = stl::stage(&self.mask, &mask_path)?;
        let substrate = stl::stage(&self.substrate, &substrate_path)?;

        stl::commit(mask, &mask_path)?;
        if let Err(e) = stl::commit(substrate, &substrate_path) {
            if let Err(cleanup) = fs::remove_file(&mask_path) {
                warn!("failed to remove '{}': {cleanup}", mask_path.display());
            }
            return Err(e);
        }
        Ok((mask_path, substrate_path))
    }
}

/// Output paths for an input image: the extension is replaced by the mask
/// and substrate suffixes, in the same directory.
///
/// # Example
///
/// ```rust
/// use halftone_mesh::pipeline::output_paths;
/// use std::path::{Path, PathBuf};
///
/// let (mask, subs) = output_paths(Path::new("photos/cat.png"));
/// assert_eq!(mask, PathBuf::from("photos/cat-mask.stl"));
/// assert_eq!(subs, PathBuf::from("photos/cat-subs.stl"));
/// ```
pub fn output_paths(input: &Path) -> (PathBuf, PathBuf) {
    let stem = input.with_extension("");
    let with_suffix = |suffix: &str| {
        let mut name = stem.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    };
    (with_suffix(MASK_SUFFIX), with_suffix(SUBSTRATE_SUFFIX))
}
