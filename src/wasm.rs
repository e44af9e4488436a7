//! WASM bindings for Mesh Core.
//!
//! This module provides JavaScript-friendly bindings so a browser front end
//! can run the calculator without a server round trip. Inputs and outputs
//! are JSON strings using the same shapes as the HTTP API.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmMeshSolver } from 'mesh_core';
//!
//! await init();
//!
//! const solver = new WasmMeshSolver();
//! const response = JSON.parse(solver.calculate(JSON.stringify(formValues)));
//! if (response.success) {
//!   render(response.currents, response.interpretations);
//! } else {
//!   showError(response.error);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::api;
use crate::circuit::RESIDENTIAL_DEFAULT;
use crate::diagram;
use crate::solver::{MeshSolver, SolverConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible mesh solver.
#[wasm_bindgen]
pub struct WasmMeshSolver {
    solver: MeshSolver,
    last_status: u16,
}

#[wasm_bindgen]
impl WasmMeshSolver {
    /// Create a solver with default limits.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmMeshSolver {
        Self::with_config(
            crate::solver::DEFAULT_SINGULAR_THRESHOLD,
            crate::solver::DEFAULT_MAX_PLAUSIBLE_CURRENT,
        )
    }

    /// Create a solver with custom limits.
    ///
    /// # Arguments
    /// * `singular_threshold` - Smallest accepted |det(A)| (default: 1e-10)
    /// * `max_plausible_current` - Current in amperes above which a notice is
    ///   returned (default: 1000)
    #[wasm_bindgen]
    pub fn with_config(singular_threshold: f64, max_plausible_current: f64) -> WasmMeshSolver {
        let config = SolverConfig::new()
            .with_singular_threshold(singular_threshold)
            .with_max_plausible_current(max_plausible_current);
        WasmMeshSolver {
            solver: MeshSolver::with_config(config),
            last_status: 200,
        }
    }

    /// Run a calculation.
    ///
    /// # Arguments
    /// * `request_json` - Object with keys `R1`..`R6`, `V1`..`V3`
    ///
    /// # Returns
    /// The JSON response body; see [`last_status`](Self::last_status) for
    /// the matching HTTP-style status.
    #[wasm_bindgen]
    pub fn calculate(&mut self, request_json: &str) -> String {
        let response = api::calculate_with(request_json, &self.solver);
        self.last_status = response.status;
        response.body.to_string()
    }

    /// Status code of the most recent [`calculate`](Self::calculate) call.
    #[wasm_bindgen(getter)]
    pub fn last_status(&self) -> u16 {
        self.last_status
    }
}

impl Default for WasmMeshSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// The worked example parameters as JSON.
#[wasm_bindgen]
pub fn example_json() -> String {
    api::example().body.to_string()
}

/// Render the schematic for a JSON parameter object.
///
/// Each missing or non-numeric key falls back to its residential default.
#[wasm_bindgen]
pub fn render_svg(params_json: &str) -> String {
    let params = diagram::params_from_json(params_json, RESIDENTIAL_DEFAULT);
    diagram::render_svg(&params)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> serde_json::Value {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_render_svg_partial_params() {
        let svg = render_svg(r#"{"R1": 7.5}"#);
        assert!(svg.contains("R1=7.5Ω"));
        assert!(svg.contains("R2=0.7Ω"));
        assert!(svg.contains("V1=120V"));

        let svg = render_svg("");
        assert!(svg.contains("R1=0.5Ω"));
    }

    #[test]
    fn test_calculate_tracks_status() {
        let mut solver = WasmMeshSolver::new();
        let request = example_request(120.0);

        let body = parse(&solver.calculate(&request));
        assert_eq!(solver.last_status(), 200);
        assert_eq!(body["success"], true);
        assert!(body["currents"]["I1"].is_number());

        let body = parse(&solver.calculate(&example_request(0.5)));
        assert_eq!(solver.last_status(), 400);
        assert!(body.get("success").is_none());
        assert!(body["error"].as_str().unwrap().starts_with("V1"));

        solver.calculate(&request);
        assert_eq!(solver.last_status(), 200);
    }

    #[test]
    fn test_calculate_empty_body() {
        let mut solver = WasmMeshSolver::default();
        let body = parse(&solver.calculate("{}"));
        assert_eq!(solver.last_status(), 400);
        assert_eq!(body["error"], "No JSON data received");
    }

    fn example_request(v1: f64) -> String {
        serde_json::to_string(&RESIDENTIAL_DEFAULT.with(crate::circuit::ParamName::V1, v1)).unwrap()
    }
}
