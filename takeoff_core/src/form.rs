//! # Form Parsing
//!
//! Raw text as a form (or a terminal prompt) submits it, and the explicit
//! conversion of that text into calculator inputs. Nothing is coerced: a blank
//! field is [`CalcError::MissingField`], anything that is not a finite number
//! is [`CalcError::InvalidInput`].
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::footing::FootingInput;
//! use takeoff_core::form::{FormValues, FromForm};
//!
//! let form = FormValues::new()
//!     .with("length", "2000")
//!     .with("width", "1500")
//!     .with("depth", "300")
//!     .with("bar_diameter", "12")
//!     .with("bar_spacing", " 200 ");
//!
//! let input = FootingInput::from_form(&form).unwrap();
//! assert_eq!(input.bar_spacing_mm, 200.0);
//!
//! let blank = FormValues::new().with("length", "");
//! assert!(FootingInput::from_form(&blank).is_err());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Field name that carries the user label; optional on every form
pub const LABEL_FIELD: &str = "label";

/// A single form field: its key and the prompt shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// Key under which the raw text is stored
    pub name: &'static str,
    /// Human-readable prompt, including the unit
    pub prompt: &'static str,
}

impl FormField {
    pub const fn new(name: &'static str, prompt: &'static str) -> Self {
        FormField { name, prompt }
    }
}

/// Calculator inputs that can be built from submitted form text.
pub trait FromForm: Sized {
    /// Fields the form asks for, in display order
    const FIELDS: &'static [FormField];

    /// Parse and validate the raw text into an input record.
    fn from_form(form: &FormValues) -> CalcResult<Self>;
}

/// Raw form text keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    fields: BTreeMap<String, String>,
}

impl FormValues {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Store the raw text for a field, replacing any previous value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Raw text for a field, if present
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The optional label field, trimmed; empty when absent
    pub fn label(&self) -> String {
        self.get(LABEL_FIELD).map(str::trim).unwrap_or_default().to_string()
    }

    /// Parse a field as a finite number.
    pub fn number(&self, field: &str) -> CalcResult<f64> {
        let raw = self.get(field).map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(CalcError::missing_field(field));
        }
        let value: f64 = raw
            .parse()
            .map_err(|_| CalcError::invalid_input(field, raw, "Not a number"))?;
        if !value.is_finite() {
            return Err(CalcError::invalid_input(field, raw, "Value must be a finite number"));
        }
        Ok(value)
    }

    /// Parse a field as a whole, non-negative count (e.g. "4" or "4.0").
    pub fn count(&self, field: &str) -> CalcResult<u32> {
        let value = self.number(field)?;
        if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Count must be a whole number",
            ));
        }
        Ok(value as u32)
    }
}

/// Report a validation error against the form key the user filled in
/// (`length_mm` becomes `length`) when one of `fields` matches.
pub(crate) fn to_form_field(err: CalcError, fields: &[FormField]) -> CalcError {
    match err {
        CalcError::InvalidInput { field, value, reason } => {
            let key = field.strip_suffix("_mm").unwrap_or(&field);
            let renamed = fields.iter().find(|f| f.name == key).map(|f| f.name.to_string());
            CalcError::InvalidInput {
                field: renamed.unwrap_or(field),
                value,
                reason,
            }
        }
        other => other,
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormValues::new();
        for (k, v) in iter {
            form.set(k, v);
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parsing() {
        let form = FormValues::new().with("length", " 4000 ");
        assert_eq!(form.number("length").unwrap(), 4000.0);
    }

    #[test]
    fn test_blank_is_missing() {
        let form = FormValues::new().with("length", "   ");
        assert_eq!(form.number("length"), Err(CalcError::missing_field("length")));
        assert_eq!(form.number("width"), Err(CalcError::missing_field("width")));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let form = FormValues::new().with("length", "4 m");
        let err = form.number("length").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("length"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let form = FormValues::new().with("a", "NaN").with("b", "inf");
        assert!(form.number("a").is_err());
        assert!(form.number("b").is_err());
    }

    #[test]
    fn test_count_parsing() {
        let form = FormValues::new().with("n", "4").with("f", "4.0").with("x", "2.5").with("neg", "-1");
        assert_eq!(form.count("n").unwrap(), 4);
        assert_eq!(form.count("f").unwrap(), 4);
        assert!(form.count("x").is_err());
        assert!(form.count("neg").is_err());
    }

    #[test]
    fn test_to_form_field() {
        const FIELDS: &[FormField] = &[
            FormField::new("length", "Length (mm)"),
            FormField::new("main_bar_count", "Number of main bars"),
        ];
        let err = to_form_field(CalcError::invalid_input("length_mm", "0", "Value must be positive"), FIELDS);
        assert_eq!(err.field(), Some("length"));
        let err = to_form_field(CalcError::invalid_input("main_bar_count", "0", "none"), FIELDS);
        assert_eq!(err.field(), Some("main_bar_count"));
        let err = to_form_field(CalcError::invalid_input("height_mm", "0", "none"), FIELDS);
        assert_eq!(err.field(), Some("height_mm"));
        let err = to_form_field(CalcError::missing_field("width"), FIELDS);
        assert_eq!(err, CalcError::missing_field("width"));
    }

    #[test]
    fn test_from_iter_and_label() {
        let form: FormValues = [("label", " B-1 "), ("length", "1")].into_iter().collect();
        assert_eq!(form.label(), "B-1");
        assert_eq!(FormValues::new().label(), "");
    }
}
