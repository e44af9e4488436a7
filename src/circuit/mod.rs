//! Circuit parameters and validation.
//!
//! The circuit has a fixed topology: three meshes coupled through R4
//! (meshes 1–2), R5 (meshes 2–3) and R6 (meshes 1–3), with R1..R3 the
//! branch resistance owned by each mesh and V1..V3 the mesh sources.

mod params;
mod types;
mod validate;

pub use params::{CircuitParameters, Preset, RESIDENTIAL_DEFAULT, TEXTBOOK_EXAMPLE};
pub use types::*;
pub use validate::{validate_named, validate_parameters, validate_value};
