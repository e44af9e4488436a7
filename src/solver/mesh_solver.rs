//! Main solver interface.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::{validate_parameters, CircuitParameters, Mesh};
use crate::error::{MeshError, Result};

use super::system::{MeshSystem, MESH_COUNT};
use super::{DEFAULT_MAX_PLAUSIBLE_CURRENT, DEFAULT_SINGULAR_THRESHOLD};

/// Configuration for the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Systems with |det(A)| below this are rejected as singular.
    pub singular_threshold: f64,
    /// Largest mesh current (amperes) accepted without a notice.
    pub max_plausible_current: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            singular_threshold: DEFAULT_SINGULAR_THRESHOLD,
            max_plausible_current: DEFAULT_MAX_PLAUSIBLE_CURRENT,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the determinant magnitude below which a system is singular.
    pub fn with_singular_threshold(mut self, threshold: f64) -> Self {
        self.singular_threshold = threshold;
        self
    }

    /// Set the current (in amperes) above which a notice is attached.
    ///
    /// Residential branches rarely carry more than a few tens of amperes;
    /// the default of 1000 A only flags results that are clearly unphysical.
    pub fn with_max_plausible_current(mut self, current: f64) -> Self {
        self.max_plausible_current = current;
        self
    }

    /// Check that both limits are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.singular_threshold.is_finite() || self.singular_threshold < 0.0 {
            return Err(MeshError::config(format!(
                "singular_threshold must be a non-negative number, got {}",
                self.singular_threshold
            )));
        }
        if !(self.max_plausible_current > 0.0) {
            return Err(MeshError::config(format!(
                "max_plausible_current must be positive, got {}",
                self.max_plausible_current
            )));
        }
        Ok(())
    }
}

/// The three mesh currents, in amperes. Positive means clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshCurrents {
    #[serde(rename = "I1")]
    pub i1: f64,
    #[serde(rename = "I2")]
    pub i2: f64,
    #[serde(rename = "I3")]
    pub i3: f64,
}

impl MeshCurrents {
    /// Create from `[I1, I2, I3]`.
    pub fn new(currents: [f64; MESH_COUNT]) -> Self {
        Self {
            i1: currents[0],
            i2: currents[1],
            i3: currents[2],
        }
    }

    /// Current of one mesh.
    pub fn get(&self, mesh: Mesh) -> f64 {
        match mesh {
            Mesh::First => self.i1,
            Mesh::Second => self.i2,
            Mesh::Third => self.i3,
        }
    }

    /// `[I1, I2, I3]`.
    pub fn as_array(&self) -> [f64; MESH_COUNT] {
        [self.i1, self.i2, self.i3]
    }

    /// Largest current magnitude.
    pub fn max_abs(&self) -> f64 {
        self.as_array().iter().fold(0.0, |acc: f64, i| acc.max(i.abs()))
    }
}

/// Non-fatal advisory attached to a successful solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    /// The largest current exceeds what a residential circuit can carry.
    HighCurrent { max_current: f64, limit: f64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::HighCurrent { max_current, limit } => write!(
                f,
                "Very high current detected: {:.2} A (limit {:.0} A)",
                max_current, limit
            ),
        }
    }
}

impl Serialize for Notice {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Output of one solve: currents, the system that produced them, and any
/// advisories.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSolution {
    pub currents: MeshCurrents,
    pub system: MeshSystem,
    pub determinant: f64,
    pub notices: Vec<Notice>,
}

impl MeshSolution {
    /// Whether any advisory was raised.
    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// The mesh solver.
#[derive(Debug, Clone, Default)]
pub struct MeshSolver {
    config: SolverConfig,
}

impl MeshSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Validate the parameters, then assemble and solve the mesh system.
    pub fn solve(&self, params: &CircuitParameters) -> Result<MeshSolution> {
        validate_parameters(params)?;
        self.solve_system(MeshSystem::build(params))
    }

    /// Solve an already assembled system.
    ///
    /// Performs the singularity check and plausibility check but no
    /// parameter validation.
    pub fn solve_system(&self, system: MeshSystem) -> Result<MeshSolution> {
        let determinant = system.determinant();
        tracing::debug!(determinant, "assembled mesh system");

        if !(determinant.abs() >= self.config.singular_threshold) {
            return Err(MeshError::SingularSystem { determinant });
        }

        let currents = MeshCurrents::new(system.solve()?);

        let mut notices = Vec::new();
        let max_current = currents.max_abs();
        if max_current > self.config.max_plausible_current {
            notices.push(Notice::HighCurrent {
                max_current,
                limit: self.config.max_plausible_current,
            });
        }

        tracing::debug!(
            i1 = currents.i1,
            i2 = currents.i2,
            i3 = currents.i3,
            notices = notices.len(),
            "solved mesh currents"
        );

        Ok(MeshSolution {
            currents,
            system,
            determinant,
            notices,
        })
    }
}

/// Solve with the default configuration.
pub fn solve(params: &CircuitParameters) -> Result<MeshSolution> {
    MeshSolver::new().solve(params)
}
