//! Parameter files.
//!
//! A parameter file is TOML with an optional base preset, any subset of the
//! nine circuit values, and optional solver limits:
//!
//! ```toml
//! preset = "default"
//!
//! [parameters]
//! R4 = 18.0
//! V2 = 230.0
//!
//! [solver]
//! max_plausible_current = 200.0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::circuit::{CircuitParameters, ParamName, Preset};
use crate::error::{MeshError, Result};
use crate::solver::SolverConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterFile {
    /// Base preset name (`default` or `example`)
    pub preset: Option<String>,
    /// Values overriding the preset, keyed `R1`..`V3`
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl ParameterFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| MeshError::FileReadError {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: Self = toml::from_str(content)
            .map_err(|e| MeshError::config(format!("invalid parameter file: {}", e)))?;
        file.validate()?;
        Ok(file)
    }

    /// Check names and solver limits without validating parameter values,
    /// which the solver does on its own.
    pub fn validate(&self) -> Result<()> {
        if let Some(preset) = &self.preset {
            preset.parse::<Preset>()?;
        }
        for key in self.parameters.keys() {
            key.parse::<ParamName>()
                .map_err(|_| MeshError::config(format!("unknown parameter '{}'", key)))?;
        }
        self.solver.validate()
    }

    /// Base preset of the file, or `fallback` when none is named.
    pub fn preset_or(&self, fallback: Preset) -> Result<Preset> {
        match &self.preset {
            Some(name) => name.parse(),
            None => Ok(fallback),
        }
    }

    /// Apply this file's overrides on top of `base`.
    pub fn apply_to(&self, base: CircuitParameters) -> Result<CircuitParameters> {
        let mut params = base;
        for (key, value) in &self.parameters {
            let name: ParamName = key
                .parse()
                .map_err(|_| MeshError::config(format!("unknown parameter '{}'", key)))?;
            params.set(name, *value);
        }
        Ok(params)
    }

    /// Resolve the complete parameter set: preset (or `fallback`) plus overrides.
    pub fn resolve(&self, fallback: Preset) -> Result<CircuitParameters> {
        self.apply_to(self.preset_or(fallback)?.parameters())
    }

    /// Resolve with command-line style precedence.
    ///
    /// The base is `preset` when given, else the file's preset, else the
    /// residential default. File overrides apply next and `overrides`
    /// last, so a value returned there always wins.
    pub fn resolve_with(
        &self,
        preset: Option<Preset>,
        overrides: impl Fn(ParamName) -> Option<f64>,
    ) -> Result<CircuitParameters> {
        let base = match preset {
            Some(preset) => preset,
            None => self.preset_or(Preset::default())?,
        };
        let mut params = self.apply_to(base.parameters())?;
        for name in ParamName::ALL {
            if let Some(value) = overrides(name) {
                params.set(name, value);
            }
        }

        tracing::debug!(preset = base.name(), ?params, "resolved circuit parameters");
        Ok(params)
    }
}
