//! Preset parameter validation.
//!
//! Preset files name controls by their stable string id (`"decay"`,
//! `"low_cut"`, ...). Validation checks each key against the engine's
//! descriptor table and each value against the control's range. Unlike the
//! engine, which silently clamps, validation reports every problem so a
//! malformed preset is rejected instead of half-applied.
//!
//! # Example
//!
//! ```rust
//! use plateverb_config::{validate_param, ValidationError};
//!
//! assert!(validate_param("decay", 4.0).is_ok());
//! assert!(matches!(
//!     validate_param("decay", 40.0),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use plateverb_engine::{PARAMS, ReverbParams};
use thiserror::Error;

use crate::preset::ReverbPreset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Key does not name any control.
    #[error("unknown parameter '{param}'")]
    UnknownParameter {
        /// The unrecognized key.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// NaN or infinite value.
    #[error("parameter '{param}' is not a finite number")]
    NonFinite {
        /// Name of the parameter.
        param: String,
    },

    /// Invalid `key=value` assignment.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// The assignment or key as written.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check one `key = value` pair, returning the control's index.
pub fn validate_param(param: &str, value: f64) -> ValidationResult<usize> {
    let index = ReverbParams::index_of(param).ok_or_else(|| ValidationError::UnknownParameter {
        param: param.to_string(),
    })?;

    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            param: param.to_string(),
        });
    }

    // Compared in the engine's precision so that "0.1" passes a 0.1 minimum
    let desc = &PARAMS[index];
    let narrowed = value as f32;
    if narrowed < desc.min || narrowed > desc.max {
        return Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }

    Ok(index)
}

/// Check every parameter of a preset, collecting all failures.
pub fn validate_preset(preset: &ReverbPreset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = preset
        .params
        .iter()
        .filter_map(|(key, &value)| validate_param(key, value).err())
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Parse a command-line style `key=value` assignment.
///
/// The value must parse as a number; range checks are left to
/// [`validate_param`].
///
/// ```rust
/// use plateverb_config::parse_assignment;
///
/// assert_eq!(parse_assignment("mix = 0.5").unwrap(), ("mix".to_string(), 0.5));
/// assert!(parse_assignment("mix").is_err());
/// ```
pub fn parse_assignment(assignment: &str) -> ValidationResult<(String, f64)> {
    let Some((key, value)) = assignment.split_once('=') else {
        return Err(ValidationError::InvalidFormat {
            param: assignment.to_string(),
            reason: "expected key=value".to_string(),
        });
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::InvalidFormat {
            param: assignment.to_string(),
            reason: "empty parameter name".to_string(),
        });
    }

    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| ValidationError::InvalidFormat {
            param: key.to_string(),
            reason: e.to_string(),
        })?;

    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_params_in_range() {
        for desc in &PARAMS {
            let index = validate_param(desc.string_id, f64::from(desc.default)).unwrap();
            assert_eq!(PARAMS[index].string_id, desc.string_id);
            assert!(validate_param(desc.string_id, f64::from(desc.min)).is_ok());
            assert!(validate_param(desc.string_id, f64::from(desc.max)).is_ok());
        }
        // Decimal literals at the range edges
        assert!(validate_param("decay", 0.1).is_ok());
        assert!(validate_param("decay", 0.09).is_err());
    }

    #[test]
    fn test_unknown_param() {
        let err = validate_param("room_size", 0.5).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownParameter {
                param: "room_size".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_range_reports_bounds() {
        match validate_param("low_cut", 5.0) {
            Err(ValidationError::OutOfRange { min, max, value, .. }) => {
                assert_eq!((min, max), (10.0, 1000.0));
                assert_eq!(value, 5.0);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite() {
        assert!(matches!(
            validate_param("mix", f64::NAN),
            Err(ValidationError::NonFinite { .. })
        ));
        assert!(matches!(
            validate_param("size", f64::INFINITY),
            Err(ValidationError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_preset_collects_every_error() {
        let preset = ReverbPreset::new("Bad")
            .with_param("mix", 2.0)
            .with_param("shimmer", 1.0)
            .with_param("decay", 3.0);

        match validate_preset(&preset) {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 2);
                let msg = ValidationError::Multiple(errors).to_string();
                assert!(msg.contains("shimmer"));
                assert!(msg.contains("mix"));
            }
            other => panic!("expected Multiple, got {other:?}"),
        }

        let single = ReverbPreset::new("Bad").with_param("grit", -1.0);
        assert!(matches!(
            validate_preset(&single),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_preset(&ReverbPreset::new("Empty")).is_ok());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("decay=4.5").unwrap(),
            ("decay".to_string(), 4.5)
        );
        assert_eq!(
            parse_assignment("  low_cut =  120 ").unwrap(),
            ("low_cut".to_string(), 120.0)
        );
        assert!(matches!(
            parse_assignment("=3"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_assignment("mix=lots"),
            Err(ValidationError::InvalidFormat { ref param, .. }) if param == "mix"
        ));
    }
}
