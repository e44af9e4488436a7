//! Qualitative interpretation of mesh currents.
//!
//! Each current is classified by direction (from its sign) and by a load
//! band (from its magnitude), and tagged with the residential zone its mesh
//! supplies.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::circuit::Mesh;
use crate::solver::MeshCurrents;

/// Circulation direction of a mesh current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Positive current
    Clockwise,
    /// Negative current
    CounterClockwise,
    /// Exactly zero
    None,
}

impl Direction {
    /// Direction of a signed current.
    pub fn of(current: f64) -> Self {
        if current > 0.0 {
            Direction::Clockwise
        } else if current < 0.0 {
            Direction::CounterClockwise
        } else {
            Direction::None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counter-clockwise",
            Direction::None => "no direction",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Magnitude band of a mesh current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadBand {
    /// Below 1 mA
    Negligible,
    /// Below 1 A
    Low,
    /// Below 10 A
    Normal,
    /// Below 50 A
    High,
    /// 50 A and above
    Critical,
}

impl LoadBand {
    /// Upper bounds (exclusive, amperes) of every band but the last.
    const BOUNDS: [(f64, LoadBand); 4] = [
        (0.001, LoadBand::Negligible),
        (1.0, LoadBand::Low),
        (10.0, LoadBand::Normal),
        (50.0, LoadBand::High),
    ];

    /// Classify a current magnitude (sign is ignored).
    pub fn of(current: f64) -> Self {
        let magnitude = current.abs();
        Self::BOUNDS
            .iter()
            .find(|(bound, _)| magnitude < *bound)
            .map(|(_, band)| *band)
            .unwrap_or(LoadBand::Critical)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadBand::Negligible => "negligible",
            LoadBand::Low => "low load",
            LoadBand::Normal => "normal load",
            LoadBand::High => "high load",
            LoadBand::Critical => "critical load",
        }
    }
}

impl fmt::Display for LoadBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of one mesh current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentInterpretation {
    #[serde(skip)]
    pub mesh: Mesh,
    pub zone: &'static str,
    pub current: f64,
    pub direction: Direction,
    pub band: LoadBand,
}

impl CurrentInterpretation {
    /// Classify the current of `mesh`.
    pub fn new(mesh: Mesh, current: f64) -> Self {
        Self {
            mesh,
            zone: mesh.zone(),
            current,
            direction: Direction::of(current),
            band: LoadBand::of(current),
        }
    }

    /// Absolute value of the current.
    pub fn magnitude(&self) -> f64 {
        self.current.abs()
    }
}

impl fmt::Display for CurrentInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (zone, dir, mag) = (self.zone, self.direction, self.magnitude());
        match self.band {
            LoadBand::Negligible => write!(f, "{}: negligible current (~0 A)", zone),
            LoadBand::Low => write!(f, "{}: {:.3} A ({}) - low load", zone, mag, dir),
            LoadBand::Normal => write!(f, "{}: {:.2} A ({}) - normal load", zone, mag, dir),
            LoadBand::High => write!(f, "{}: {:.1} A ({}) - high load", zone, mag, dir),
            LoadBand::Critical => write!(f, "{}: {:.1} A ({}) - ⚠️ CRITICAL LOAD", zone, mag, dir),
        }
    }
}

/// Classify all three mesh currents, in mesh order.
pub fn interpret_currents(currents: &MeshCurrents) -> [CurrentInterpretation; 3] {
    Mesh::ALL.map(|mesh| CurrentInterpretation::new(mesh, currents.get(mesh)))
}

/// Human-readable description of each current, keyed by `I1`, `I2`, `I3`.
pub fn describe_currents(currents: &MeshCurrents) -> BTreeMap<String, String> {
    interpret_currents(currents)
        .iter()
        .map(|i| (i.mesh.current_label().to_string(), i.to_string()))
        .collect()
}
