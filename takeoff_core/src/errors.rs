//! # Error Types
//!
//! Structured error types for takeoff_core. Every calculator validates its
//! input before doing any arithmetic, so a bad field surfaces here instead of
//! as a `NaN` volume or an infinite bar count.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{CalcError, CalcResult};
//!
//! fn validate_spacing(spacing_mm: f64) -> CalcResult<()> {
//!     if spacing_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "bar_spacing_mm",
//!             spacing_mm.to_string(),
//!             "Spacing must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_spacing(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for quantity calculations.
///
/// Serializes as `{"type": "...", "details": {...}}` so front ends can show
/// a validation message next to the offending field.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, non-finite, unparseable, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing or blank
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if the error is about a single field
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } | CalcError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

/// Require a finite, strictly positive value.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

/// Require a finite value that is zero or greater.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

/// Require that a cover leaves a positive clear dimension on both faces.
pub(crate) fn require_clear_section(field: &str, cover_mm: f64, side_mm: f64, side_name: &str) -> CalcResult<()> {
    require_non_negative(field, cover_mm)?;
    if 2.0 * cover_mm >= side_mm {
        return Err(CalcError::invalid_input(
            field,
            cover_mm.to_string(),
            format!("Cover on both faces must be less than {side_name} ({side_mm} mm)"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("stirrup_spacing_mm", "0", "Value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("length").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::serialization("eof").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(CalcError::missing_field("width").field(), Some("width"));
        assert_eq!(CalcError::file_error("read", "a.json", "denied").field(), None);
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", -3.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_clear_section() {
        assert!(require_clear_section("cover", 25.0, 300.0, "width").is_ok());
        assert!(require_clear_section("cover", 0.0, 300.0, "width").is_ok());
        assert!(require_clear_section("cover", 150.0, 300.0, "width").is_err());
        assert!(require_clear_section("cover", -1.0, 300.0, "width").is_err());
    }
}
