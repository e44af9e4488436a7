//! Error types for the mesh solver.
//!
//! This module provides a unified error type [`MeshError`] that covers
//! all error conditions that can occur during parameter validation,
//! solving, and the request/response layers built on top of them.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Unified error type for all mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    // ============ Validation Errors ============
    /// Value is not a finite, strictly positive number
    #[error("{name}: {message}")]
    InvalidValue { name: String, message: String },

    /// Value is numeric but outside the physical range for its kind
    #[error("{name}: {value} is outside the allowed range {min}{unit} to {max}{unit}")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
        unit: &'static str,
    },

    // ============ Solver Errors ============
    /// Coefficient matrix is (nearly) singular
    #[error("Singular system: the resistances form an indeterminate circuit (det = {determinant:.3e})")]
    SingularSystem { determinant: f64 },

    /// Unexpected numeric failure inside the linear solve
    #[error("Failed to solve the mesh system: {message}")]
    SolveFailure { message: String },

    // ============ Request Errors ============
    /// One or more required parameters were not supplied
    #[error("Missing parameters: {names:?}")]
    MissingParameters { names: Vec<String> },

    /// Request body was empty or not a JSON object
    #[error("No JSON data received")]
    EmptyRequest,

    /// Request body could not be interpreted
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    // ============ Configuration / I/O Errors ============
    /// Parameter or solver configuration could not be parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Error reading a parameter file
    #[error("Failed to read parameter file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing output
    #[error("Failed to write output '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MeshError {
    /// Create an invalid value error
    pub fn invalid_value(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a solve failure error
    pub fn solve_failure(message: impl Into<String>) -> Self {
        Self::SolveFailure {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than
    /// by something going wrong internally.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidValue { .. }
                | Self::OutOfRange { .. }
                | Self::SingularSystem { .. }
                | Self::SolveFailure { .. }
                | Self::MissingParameters { .. }
                | Self::EmptyRequest
                | Self::InvalidRequest { .. }
                | Self::ConfigError { .. }
        )
    }

    /// HTTP status code a request boundary should report for this error.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(MeshError::invalid_value("R1", "must be positive").status_code(), 400);
        assert_eq!(MeshError::SingularSystem { determinant: 0.0 }.status_code(), 400);
        assert_eq!(MeshError::solve_failure("overflow").status_code(), 400);

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = MeshError::FileWriteError {
            path: "out.svg".to_string(),
            source: io,
        };
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_messages_name_the_parameter() {
        let err = MeshError::OutOfRange {
            name: "R4".to_string(),
            value: 5000.0,
            min: 0.01,
            max: 1000.0,
            unit: "Ω",
        };
        let msg = err.to_string();
        assert!(msg.starts_with("R4:"));
        assert!(msg.contains("5000"));
        assert!(msg.contains("1000Ω"));
    }
}
