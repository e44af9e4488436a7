//! # Mesh Core
//!
//! Loop-current solver for a three-mesh residential wiring circuit.
//!
//! This library provides:
//! - Validation of the nine circuit inputs (R1..R6 in ohms, V1..V3 in volts)
//! - Assembly and LU solution of the fixed 3×3 mesh system A·I = B
//! - Classification of each mesh current by direction and load band
//! - A JSON/form request layer, TOML parameter files and an SVG schematic
//!
//! ## Architecture
//!
//! - [`circuit`] - Parameter types, presets and validation
//! - [`solver`] - Mesh matrix assembly and numerical solving
//! - [`interpret`] - Direction and load band of each current
//! - [`api`] - JSON and HTML form contracts for web front ends
//! - [`config`] - TOML parameter files
//! - [`diagram`] - SVG schematic rendering
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use mesh_core::{interpret::describe_currents, solver, RESIDENTIAL_DEFAULT};
//!
//! let solution = solver::solve(&RESIDENTIAL_DEFAULT)?;
//! for (label, text) in describe_currents(&solution.currents) {
//!     println!("{label}: {text}");
//! }
//! # Ok::<(), mesh_core::MeshError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! meshcalc solve --preset default --r4 18 --json
//! meshcalc diagram --file params.toml -o circuit.svg
//! ```
//!
//! ## Circuit
//!
//! ```text
//! A = [ R1+R4+R6   -R4        -R6      ]     B = [ V1 ]
//!     [ -R4         R2+R4+R5  -R5      ]         [ V2 ]
//!     [ -R6        -R5         R3+R5+R6]         [ V3 ]
//! ```
//!
//! Mesh 1 feeds the living/dining area, mesh 2 the kitchen/laundry and
//! mesh 3 the bedrooms.

pub mod api;
pub mod circuit;
pub mod config;
pub mod diagram;
pub mod error;
pub mod interpret;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{CircuitParameters, Preset, RESIDENTIAL_DEFAULT, TEXTBOOK_EXAMPLE};
pub use error::{MeshError, Result};
pub use solver::{MeshSolution, MeshSolver, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmMeshSolver;
