//! Core types for naming circuit parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::MeshError;

/// Inclusive range of accepted resistances, in ohms.
pub const RESISTANCE_RANGE: (f64, f64) = (0.01, 1000.0);

/// Inclusive range of accepted source voltages, in volts.
pub const VOLTAGE_RANGE: (f64, f64) = (1.0, 500.0);

/// The physical quantity a parameter represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Branch resistance (ohms)
    Resistance,
    /// Source voltage (volts)
    Voltage,
}

impl ParamKind {
    /// Classify a parameter key by its leading letter.
    ///
    /// Keys starting with `R` are resistances, keys starting with `V` are
    /// voltages, anything else has no domain range.
    pub fn from_key(key: &str) -> Option<Self> {
        if key.starts_with('R') {
            Some(ParamKind::Resistance)
        } else if key.starts_with('V') {
            Some(ParamKind::Voltage)
        } else {
            None
        }
    }

    /// Inclusive `(min, max)` range for this kind.
    pub fn range(&self) -> (f64, f64) {
        match self {
            ParamKind::Resistance => RESISTANCE_RANGE,
            ParamKind::Voltage => VOLTAGE_RANGE,
        }
    }

    /// Unit symbol used in messages and diagrams.
    pub fn unit(&self) -> &'static str {
        match self {
            ParamKind::Resistance => "Ω",
            ParamKind::Voltage => "V",
        }
    }
}

/// One of the nine named inputs of the three-mesh circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamName {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    V1,
    V2,
    V3,
}

impl ParamName {
    /// All parameters in declared order (R1..R6, V1..V3).
    pub const ALL: [ParamName; 9] = [
        ParamName::R1,
        ParamName::R2,
        ParamName::R3,
        ParamName::R4,
        ParamName::R5,
        ParamName::R6,
        ParamName::V1,
        ParamName::V2,
        ParamName::V3,
    ];

    /// The key used in forms, JSON bodies, and parameter files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamName::R1 => "R1",
            ParamName::R2 => "R2",
            ParamName::R3 => "R3",
            ParamName::R4 => "R4",
            ParamName::R5 => "R5",
            ParamName::R6 => "R6",
            ParamName::V1 => "V1",
            ParamName::V2 => "V2",
            ParamName::V3 => "V3",
        }
    }

    /// Whether this parameter is a resistance or a voltage.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamName::V1 | ParamName::V2 | ParamName::V3 => ParamKind::Voltage,
            _ => ParamKind::Resistance,
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MeshError::InvalidRequest {
                message: format!("unknown parameter '{}'", s),
            })
    }
}

/// Identifies one of the three meshes (loops) of the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mesh {
    /// Mesh 1, living/dining area
    First,
    /// Mesh 2, kitchen/laundry area
    Second,
    /// Mesh 3, bedrooms
    Third,
}

impl Mesh {
    /// All meshes in solution-vector order.
    pub const ALL: [Mesh; 3] = [Mesh::First, Mesh::Second, Mesh::Third];

    /// Index into the solution vector.
    pub fn index(&self) -> usize {
        match self {
            Mesh::First => 0,
            Mesh::Second => 1,
            Mesh::Third => 2,
        }
    }

    /// Current label used as key in results (`I1`, `I2`, `I3`).
    pub fn current_label(&self) -> &'static str {
        match self {
            Mesh::First => "I1",
            Mesh::Second => "I2",
            Mesh::Third => "I3",
        }
    }

    /// Residential zone served by this mesh.
    pub fn zone(&self) -> &'static str {
        match self {
            Mesh::First => "living/dining",
            Mesh::Second => "kitchen/laundry",
            Mesh::Third => "bedrooms",
        }
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mesh {}", self.index() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_key() {
        assert_eq!(ParamKind::from_key("R4"), Some(ParamKind::Resistance));
        assert_eq!(ParamKind::from_key("V2"), Some(ParamKind::Voltage));
        assert_eq!(ParamKind::from_key("I1"), None);
    }

    #[test]
    fn test_param_name_parse() {
        assert_eq!("r3".parse::<ParamName>().unwrap(), ParamName::R3);
        assert_eq!(" V1 ".parse::<ParamName>().unwrap(), ParamName::V1);
        assert!("R7".parse::<ParamName>().is_err());
    }

    #[test]
    fn test_declared_order() {
        let keys: Vec<&str> = ParamName::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(keys, ["R1", "R2", "R3", "R4", "R5", "R6", "V1", "V2", "V3"]);
        assert!(ParamName::ALL[..6].iter().all(|p| p.kind() == ParamKind::Resistance));
        assert!(ParamName::ALL[6..].iter().all(|p| p.kind() == ParamKind::Voltage));
    }
}
