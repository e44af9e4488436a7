//! Request/response layer for web front ends.
//!
//! These functions implement the JSON contract of the calculator endpoints
//! without tying the crate to an HTTP server: a handler passes the request
//! body in and writes the returned status and JSON body out.
//!
//! ```text
//! POST /api/calculate  {"R1": 0.5, ..., "V3": 120}
//!   200 {"success": true, "currents": {...}, "matrix_A": [[...]],
//!        "vector_B": [...], "interpretations": {...}, "notices": [...]}
//!   400 {"error": "<message>"}
//!   500 {"error": "Internal server error"}
//! GET  /api/example
//!   200 {"R1": 2.0, ..., "V3": 0.0}
//! ```

mod form;

pub use form::{parse_form, parse_number};

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::circuit::{CircuitParameters, TEXTBOOK_EXAMPLE};
use crate::error::{MeshError, Result};
use crate::interpret::describe_currents;
use crate::solver::{MeshCurrents, MeshSolution, MeshSolver, MeshSystem, Notice};

/// Status code and JSON body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Error response with the status the error maps to.
    ///
    /// Internal errors are reported with a generic message.
    pub fn from_error(err: &MeshError) -> Self {
        let status = err.status_code();
        let message = if status >= 500 {
            tracing::error!(error = %err, "internal error while handling request");
            "Internal server error".to_string()
        } else {
            tracing::warn!(error = %err, "rejected calculation request");
            err.to_string()
        };
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error message, when this is an error response.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

#[derive(Serialize)]
struct CalculateSuccess<'a> {
    success: bool,
    currents: MeshCurrents,
    #[serde(flatten)]
    system: &'a MeshSystem,
    interpretations: BTreeMap<String, String>,
    notices: &'a [Notice],
}

/// JSON document describing a successful solve.
pub fn solution_json(solution: &MeshSolution) -> Result<Value> {
    let body = CalculateSuccess {
        success: true,
        currents: solution.currents,
        system: &solution.system,
        interpretations: describe_currents(&solution.currents),
        notices: &solution.notices,
    };
    Ok(serde_json::to_value(body)?)
}

/// Extract the nine parameters from a JSON request body.
pub fn parse_request(body: &str) -> Result<CircuitParameters> {
    let value: Value = serde_json::from_str(body).map_err(|_| MeshError::EmptyRequest)?;
    let object: &Map<String, Value> = match value.as_object() {
        Some(object) if !object.is_empty() => object,
        _ => return Err(MeshError::EmptyRequest),
    };

    // Missing keys are reported together before any value is inspected.
    let missing: Vec<String> = crate::circuit::ParamName::ALL
        .iter()
        .filter(|name| !object.contains_key(name.as_str()))
        .map(|name| name.as_str().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(MeshError::MissingParameters { names: missing });
    }

    let mut params = CircuitParameters::default();
    for name in crate::circuit::ParamName::ALL {
        let value = object[name.as_str()]
            .as_f64()
            .ok_or_else(|| MeshError::invalid_value(name.as_str(), "must be a valid finite number"))?;
        params.set(name, value);
    }
    Ok(params)
}

/// Solve already parsed parameters and build the response.
pub fn respond(params: &CircuitParameters, solver: &MeshSolver) -> ApiResponse {
    let solution = match solver.solve(params) {
        Ok(solution) => solution,
        Err(err) => return ApiResponse::from_error(&err),
    };

    for notice in &solution.notices {
        tracing::warn!(%notice, "implausible result");
    }
    let c = solution.currents;
    tracing::info!("calculation succeeded: I1={:.3}A, I2={:.3}A, I3={:.3}A", c.i1, c.i2, c.i3);

    match solution_json(&solution) {
        Ok(body) => ApiResponse::ok(body),
        Err(err) => ApiResponse::from_error(&err),
    }
}

/// Handle a calculation request with a custom solver.
pub fn calculate_with(body: &str, solver: &MeshSolver) -> ApiResponse {
    match parse_request(body) {
        Ok(params) => respond(&params, solver),
        Err(err) => ApiResponse::from_error(&err),
    }
}

/// Handle a calculation request with the default solver.
pub fn calculate(body: &str) -> ApiResponse {
    calculate_with(body, &MeshSolver::new())
}

/// The worked example parameters.
pub fn example() -> ApiResponse {
    match serde_json::to_value(TEXTBOOK_EXAMPLE) {
        Ok(body) => ApiResponse::ok(body),
        Err(err) => ApiResponse::from_error(&err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::RESIDENTIAL_DEFAULT;
    use approx::assert_relative_eq;

    fn default_body() -> String {
        serde_json::to_string(&RESIDENTIAL_DEFAULT).unwrap()
    }

    #[test]
    fn test_calculate_success_shape() {
        let response = calculate(&default_body());
        assert_eq!(response.status, 200);

        let body = &response.body;
        assert_eq!(body["success"], true);
        assert_eq!(body["matrix_A"][0][0], 45.5);
        assert_eq!(body["matrix_A"][1][0], -20.0);
        assert_eq!(body["vector_B"], json!([120.0, 220.0, 120.0]));
        assert!(body["notices"].as_array().unwrap().is_empty());

        let expected = crate::solver::solve(&RESIDENTIAL_DEFAULT).unwrap().currents;
        assert_relative_eq!(body["currents"]["I2"].as_f64().unwrap(), expected.i2);
        assert!(body["interpretations"]["I3"]
            .as_str()
            .unwrap()
            .starts_with("bedrooms: "));
    }

    #[test]
    fn test_empty_or_malformed_body() {
        for body in ["", "{}", "[1, 2]", "not json"] {
            let response = calculate(body);
            assert_eq!(response.status, 400);
            assert_eq!(response.error_message(), Some("No JSON data received"));
        }
    }

    #[test]
    fn test_missing_parameters_listed() {
        let response = calculate(r#"{"R1": 1, "R2": 1, "R3": 1, "R4": 1, "R5": 1, "R6": 1, "V1": 10}"#);
        assert_eq!(response.status, 400);
        let message = response.error_message().unwrap();
        assert!(message.contains("V2") && message.contains("V3"));
        assert!(!message.contains("R1"));
    }

    #[test]
    fn test_non_numeric_value() {
        let mut value = serde_json::to_value(RESIDENTIAL_DEFAULT).unwrap();
        value["R3"] = json!("abc");
        let response = calculate(&value.to_string());
        assert_eq!(response.status, 400);
        assert!(response.error_message().unwrap().starts_with("R3:"));
    }

    #[test]
    fn test_validation_error_is_400() {
        let mut value = serde_json::to_value(RESIDENTIAL_DEFAULT).unwrap();
        value["V1"] = json!(0.5);
        let response = calculate(&value.to_string());
        assert_eq!(response.status, 400);
        assert!(!response.is_success());
    }

    #[test]
    fn test_example_endpoint() {
        let response = example();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["R1"], 2.0);
        assert_eq!(response.body["V2"], 0.0);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "secret path");
        let err = MeshError::FileReadError {
            path: "/etc/secret".to_string(),
            source: io,
        };
        let response = ApiResponse::from_error(&err);
        assert_eq!(response.status, 500);
        assert_eq!(response.error_message(), Some("Internal server error"));
    }
}
