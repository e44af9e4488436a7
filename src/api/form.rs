//! HTML form field parsing.

use std::collections::HashMap;

use crate::circuit::{validate_parameters, CircuitParameters, ParamName};
use crate::error::MeshError;

/// Parse one form field, accepting a decimal comma (`"0,5"`).
pub fn parse_number(name: &str, raw: &str) -> Result<f64, MeshError> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| MeshError::invalid_value(name, format!("'{}' is not a valid number", raw.trim())))
}

/// Merge submitted form fields into `defaults` and validate the result.
///
/// Blank or absent fields keep their default. The values gathered so far are
/// always returned so the form can be redisplayed next to the error.
pub fn parse_form(
    fields: &HashMap<String, String>,
    defaults: CircuitParameters,
) -> (CircuitParameters, Option<MeshError>) {
    let mut values = defaults;

    for name in ParamName::ALL {
        let raw = match fields.get(name.as_str()) {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => continue,
        };
        match parse_number(name.as_str(), raw) {
            Ok(value) => values.set(name, value),
            Err(err) => return (values, Some(err)),
        }
    }

    let error = validate_parameters(&values).err();
    (values, error)
}
