//! Mesh (loop current) solver.
//!
//! This module provides the numerical engine of the crate.
//!
//! ## Mesh Analysis
//!
//! Kirchhoff's voltage law around each of the three loops gives a system
//! A·I = B where:
//! - I contains the three mesh currents
//! - A holds the total resistance of each mesh on the diagonal and the
//!   negated shared resistance between two meshes off the diagonal
//! - B holds the source voltage driving each mesh
//!
//! The coupling is fixed: R4 is shared by meshes 1 and 2, R5 by meshes 2
//! and 3, and R6 by meshes 1 and 3.
//!
//! Solving checks |det(A)| against a threshold first, then uses LU
//! decomposition with partial pivoting.

mod mesh_solver;
mod system;

pub use mesh_solver::{solve, MeshCurrents, MeshSolution, MeshSolver, Notice, SolverConfig};
pub use system::{LuFactors, MeshSystem, MESH_COUNT};

/// Default determinant magnitude below which a system is singular.
pub const DEFAULT_SINGULAR_THRESHOLD: f64 = 1e-10;

/// Default current (amperes) above which a result is flagged as implausible.
pub const DEFAULT_MAX_PLAUSIBLE_CURRENT: f64 = 1000.0;
