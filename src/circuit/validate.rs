//! Parameter validation.

use crate::error::{MeshError, Result};

use super::{CircuitParameters, ParamKind};

/// Validate a single named value.
///
/// Checks, in order:
/// - The value is finite (not NaN or infinite)
/// - The value is strictly positive
/// - Resistances (`R*`) and voltages (`V*`) lie within their inclusive range
pub fn validate_value(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MeshError::invalid_value(name, "must be a valid finite number"));
    }

    if value <= 0.0 {
        return Err(MeshError::invalid_value(name, "must be a positive value"));
    }

    if let Some(kind) = ParamKind::from_key(name) {
        let (min, max) = kind.range();
        if !(min..=max).contains(&value) {
            return Err(MeshError::OutOfRange {
                name: name.to_string(),
                value,
                min,
                max,
                unit: kind.unit(),
            });
        }
    }

    Ok(())
}

/// Validate arbitrary `(name, value)` pairs, stopping at the first failure.
pub fn validate_named<'a, I>(entries: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    for (name, value) in entries {
        validate_value(name, value)?;
    }
    Ok(())
}

/// Validate all nine circuit parameters in declared order (R1..R6, V1..V3).
pub fn validate_parameters(params: &CircuitParameters) -> Result<()> {
    validate_named(params.iter().map(|(name, value)| (name.as_str(), value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ParamName, RESIDENTIAL_DEFAULT, TEXTBOOK_EXAMPLE};

    fn assert_invalid(params: CircuitParameters, expected: &str) {
        match validate_parameters(&params) {
            Err(MeshError::InvalidValue { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected InvalidValue for {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_default_set_is_valid() {
        assert!(validate_parameters(&RESIDENTIAL_DEFAULT).is_ok());
    }

    #[test]
    fn test_rejects_non_finite_and_non_positive() {
        for name in ParamName::ALL {
            for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                assert_invalid(RESIDENTIAL_DEFAULT.with(name, bad), name.as_str());
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let err = validate_parameters(&RESIDENTIAL_DEFAULT.with(ParamName::R2, 5000.0)).unwrap_err();
        assert!(matches!(err, MeshError::OutOfRange { ref name, .. } if name == "R2"));

        let err = validate_parameters(&RESIDENTIAL_DEFAULT.with(ParamName::V3, 0.5)).unwrap_err();
        assert!(matches!(err, MeshError::OutOfRange { ref name, unit: "V", .. } if name == "V3"));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(validate_value("R1", 0.01).is_ok());
        assert!(validate_value("R1", 1000.0).is_ok());
        assert!(validate_value("V1", 1.0).is_ok());
        assert!(validate_value("V1", 500.0).is_ok());
        assert!(validate_value("R1", 1000.0001).is_err());
        assert!(validate_value("V1", 0.999).is_err());
    }

    #[test]
    fn test_first_failure_in_declared_order_is_reported() {
        let params = RESIDENTIAL_DEFAULT
            .with(ParamName::V1, -5.0)
            .with(ParamName::R3, 2000.0);
        let err = validate_parameters(&params).unwrap_err();
        assert!(matches!(err, MeshError::OutOfRange { ref name, .. } if name == "R3"));
    }

    #[test]
    fn test_textbook_example_fails_on_zero_voltage() {
        assert_invalid(TEXTBOOK_EXAMPLE, "V2");
    }

    #[test]
    fn test_unprefixed_names_only_need_positive() {
        assert!(validate_named([("gain", 5000.0)]).is_ok());
        assert!(validate_named([("gain", -1.0)]).is_err());
    }
}
