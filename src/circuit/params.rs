//! The nine scalar inputs of the circuit and the built-in parameter sets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

use super::ParamName;

/// Six branch resistances (ohms) and three source voltages (volts).
///
/// Values are stored as given; use [`validate_parameters`](super::validate_parameters)
/// or the solver (which validates again) before trusting them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitParameters {
    #[serde(rename = "R1")]
    pub r1: f64,
    #[serde(rename = "R2")]
    pub r2: f64,
    #[serde(rename = "R3")]
    pub r3: f64,
    #[serde(rename = "R4")]
    pub r4: f64,
    #[serde(rename = "R5")]
    pub r5: f64,
    #[serde(rename = "R6")]
    pub r6: f64,
    #[serde(rename = "V1")]
    pub v1: f64,
    #[serde(rename = "V2")]
    pub v2: f64,
    #[serde(rename = "V3")]
    pub v3: f64,
}

impl CircuitParameters {
    /// Create a parameter set from resistances `[R1..R6]` and voltages `[V1..V3]`.
    pub const fn new(resistances: [f64; 6], voltages: [f64; 3]) -> Self {
        Self {
            r1: resistances[0],
            r2: resistances[1],
            r3: resistances[2],
            r4: resistances[3],
            r5: resistances[4],
            r6: resistances[5],
            v1: voltages[0],
            v2: voltages[1],
            v3: voltages[2],
        }
    }

    /// Build a parameter set by looking up every name.
    ///
    /// All missing names are reported together, in declared order.
    pub fn from_fn(mut lookup: impl FnMut(ParamName) -> Option<f64>) -> Result<Self> {
        let mut params = Self::new([0.0; 6], [0.0; 3]);
        let mut missing = Vec::new();

        for name in ParamName::ALL {
            match lookup(name) {
                Some(value) => params.set(name, value),
                None => missing.push(name.as_str().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(MeshError::MissingParameters { names: missing });
        }
        Ok(params)
    }

    /// Build a parameter set from a map keyed by `R1`..`V3`.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        Self::from_fn(|name| map.get(name.as_str()).copied())
    }

    /// Get a parameter by name.
    pub fn get(&self, name: ParamName) -> f64 {
        match name {
            ParamName::R1 => self.r1,
            ParamName::R2 => self.r2,
            ParamName::R3 => self.r3,
            ParamName::R4 => self.r4,
            ParamName::R5 => self.r5,
            ParamName::R6 => self.r6,
            ParamName::V1 => self.v1,
            ParamName::V2 => self.v2,
            ParamName::V3 => self.v3,
        }
    }

    /// Set a parameter by name.
    pub fn set(&mut self, name: ParamName, value: f64) {
        let slot = match name {
            ParamName::R1 => &mut self.r1,
            ParamName::R2 => &mut self.r2,
            ParamName::R3 => &mut self.r3,
            ParamName::R4 => &mut self.r4,
            ParamName::R5 => &mut self.r5,
            ParamName::R6 => &mut self.r6,
            ParamName::V1 => &mut self.v1,
            ParamName::V2 => &mut self.v2,
            ParamName::V3 => &mut self.v3,
        };
        *slot = value;
    }

    /// Return a copy with one parameter replaced.
    pub fn with(mut self, name: ParamName, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Iterate `(name, value)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamName, f64)> + '_ {
        ParamName::ALL.iter().map(move |&name| (name, self.get(name)))
    }

    /// Voltages `[V1..V3]`.
    pub fn voltages(&self) -> [f64; 3] {
        [self.v1, self.v2, self.v3]
    }
}

impl Default for CircuitParameters {
    fn default() -> Self {
        RESIDENTIAL_DEFAULT
    }
}

/// Typical residential installation: 12 AWG branch runs and shared loads,
/// fed by 120 V single-phase and 220 V kitchen supplies.
pub const RESIDENTIAL_DEFAULT: CircuitParameters =
    CircuitParameters::new([0.5, 0.7, 0.6, 20.0, 15.0, 25.0], [120.0, 220.0, 120.0]);

/// Worked textbook problem with a single 12 V source.
///
/// V2 and V3 are zero, so this set is meant for pre-filling forms and does
/// not pass validation as-is.
pub const TEXTBOOK_EXAMPLE: CircuitParameters =
    CircuitParameters::new([2.0, 4.0, 3.0, 6.0, 5.0, 2.0], [12.0, 0.0, 0.0]);

/// Named built-in parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// [`RESIDENTIAL_DEFAULT`]
    #[default]
    Residential,
    /// [`TEXTBOOK_EXAMPLE`]
    Textbook,
}

impl Preset {
    /// The parameter values of this preset.
    pub fn parameters(&self) -> CircuitParameters {
        match self {
            Preset::Residential => RESIDENTIAL_DEFAULT,
            Preset::Textbook => TEXTBOOK_EXAMPLE,
        }
    }

    /// Short name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Residential => "default",
            Preset::Textbook => "example",
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "residential" => Ok(Preset::Residential),
            "example" | "textbook" => Ok(Preset::Textbook),
            other => Err(MeshError::InvalidRequest {
                message: format!("unknown preset '{}' (expected 'default' or 'example')", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip_by_name() {
        let mut params = RESIDENTIAL_DEFAULT;
        params.set(ParamName::R5, 42.0);
        assert_eq!(params.get(ParamName::R5), 42.0);
        assert_eq!(params.r5, 42.0);
        assert_eq!(params.with(ParamName::V2, 110.0).v2, 110.0);
    }

    #[test]
    fn test_iter_declared_order() {
        let values: Vec<f64> = RESIDENTIAL_DEFAULT.iter().map(|(_, v)| v).collect();
        assert_eq!(values, [0.5, 0.7, 0.6, 20.0, 15.0, 25.0, 120.0, 220.0, 120.0]);
    }

    #[test]
    fn test_from_map_reports_missing_names() {
        let mut map = HashMap::new();
        map.insert("R1".to_string(), 1.0);
        map.insert("V2".to_string(), 10.0);

        match CircuitParameters::from_map(&map) {
            Err(MeshError::MissingParameters { names }) => {
                assert_eq!(names, ["R2", "R3", "R4", "R5", "R6", "V1", "V3"]);
            }
            other => panic!("expected missing parameters, got {:?}", other),
        }
    }

    #[test]
    fn test_from_map_complete() {
        let map: HashMap<String, f64> = TEXTBOOK_EXAMPLE
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        assert_eq!(CircuitParameters::from_map(&map).unwrap(), TEXTBOOK_EXAMPLE);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("default".parse::<Preset>().unwrap(), Preset::Residential);
        assert_eq!("Example".parse::<Preset>().unwrap(), Preset::Textbook);
        assert!("lab".parse::<Preset>().is_err());
        assert_eq!(Preset::default().parameters(), RESIDENTIAL_DEFAULT);
    }

    #[test]
    fn test_serde_uses_uppercase_keys() {
        let json = serde_json::to_value(RESIDENTIAL_DEFAULT).unwrap();
        assert_eq!(json["R4"], 20.0);
        assert_eq!(json["V2"], 220.0);
    }
}
