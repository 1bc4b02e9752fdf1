//! # Halftone Mesh
//!
//! Mesh construction engine for 3D-printable halftone reliefs. Every pixel
//! of an intensity field becomes one small cylinder whose radius encodes the
//! pixel's ink density; the dots sit on a square substrate plate.
//!
//! ## Architecture
//!
//! ```text
//! Primitive (template) → InstanceBatch (stamping) → Mesh
//!                                                    ↓
//!                        transform / bounds / validate / stl
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use halftone_mesh::{build_relief, IntensityField, ReliefParams};
//!
//! let field = IntensityField::filled(4, 4, 0.5).unwrap();
//! let relief = build_relief(&field, &ReliefParams::default()).unwrap();
//! assert!(relief.halftone_report.is_closed());
//! assert_eq!(relief.substrate.vertex_count(), 8);
//! ```

pub mod bounds;
pub mod error;
pub mod field;
pub mod halftone;
pub mod instance;
pub mod mesh;
pub mod pipeline;
pub mod primitives;
pub mod stl;
pub mod substrate;
pub mod transform;
pub mod validate;

pub use bounds::Bounds;
pub use error::MeshError;
pub use field::IntensityField;
pub use halftone::{HalftoneBuilder, HalftoneParams, ScreenAngle};
pub use instance::{InstanceBatch, Placement};
pub use mesh::Mesh;
pub use pipeline::{build_relief, Relief, ReliefFiles, ReliefParams};
pub use primitives::{Primitive, Template};
pub use substrate::SubstrateBuilder;
pub use transform::{AxisMask, TransformOp};
pub use validate::MeshReport;
