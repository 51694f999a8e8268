//! # Beam Quantity Calculation
//!
//! Concrete volume and reinforcing steel for a rectangular beam with
//! longitudinal main bars and closed stirrups.
//!
//! ## Assumptions
//!
//! - Main bars run the full beam length (no laps, hooks or curtailment)
//! - Stirrups are closed rectangular loops at the clear perimeter inside the cover
//! - Stirrups are spaced from one end with a stirrup at both ends
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::beam::{BeamInput, calculate};
//!
//! let input = BeamInput {
//!     label: "B-1".to_string(),
//!     length_mm: 4000.0,
//!     width_mm: 300.0,
//!     depth_mm: 500.0,
//!     main_bar_diameter_mm: 16.0,
//!     main_bar_count: 4,
//!     stirrup_diameter_mm: 8.0,
//!     stirrup_spacing_mm: 150.0,
//!     stirrup_cover_mm: 25.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//!
//! assert!((result.summary.concrete_volume_m3 - 0.6).abs() < 1e-9);
//! assert_eq!(result.stirrups.count, 27);
//! println!("Steel: {:.2} kg", result.summary.steel_weight_kg);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_clear_section, require_positive, CalcError, CalcResult};
use crate::form::{to_form_field, FormField, FormValues, FromForm};
use crate::rebar::{checked_bar_count, loop_perimeter, BarGroup, QuantitySummary};
use crate::units::{CubicMeters, Meters, Millimeters};

/// Input parameters for a beam. All dimensions in millimeters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "length_mm": 4000.0,
///   "width_mm": 300.0,
///   "depth_mm": 500.0,
///   "main_bar_diameter_mm": 16.0,
///   "main_bar_count": 4,
///   "stirrup_diameter_mm": 8.0,
///   "stirrup_spacing_mm": 150.0,
///   "stirrup_cover_mm": 25.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// User label for this beam (e.g., "B-1", "Lintel over door")
    #[serde(default)]
    pub label: String,

    /// Beam length (mm)
    pub length_mm: f64,

    /// Beam width (mm)
    pub width_mm: f64,

    /// Overall beam depth (mm)
    pub depth_mm: f64,

    /// Main bar diameter (mm)
    pub main_bar_diameter_mm: f64,

    /// Number of main bars
    pub main_bar_count: u32,

    /// Stirrup bar diameter (mm)
    pub stirrup_diameter_mm: f64,

    /// Center-to-center stirrup spacing (mm)
    pub stirrup_spacing_mm: f64,

    /// Concrete cover to the stirrups (mm)
    pub stirrup_cover_mm: f64,
}

impl BeamInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_mm", self.length_mm)?;
        require_positive("width_mm", self.width_mm)?;
        require_positive("depth_mm", self.depth_mm)?;
        require_positive("main_bar_diameter_mm", self.main_bar_diameter_mm)?;
        if self.main_bar_count == 0 {
            return Err(CalcError::invalid_input(
                "main_bar_count",
                "0",
                "A beam needs at least one main bar",
            ));
        }
        require_positive("stirrup_diameter_mm", self.stirrup_diameter_mm)?;
        require_positive("stirrup_spacing_mm", self.stirrup_spacing_mm)?;
        require_clear_section("stirrup_cover_mm", self.stirrup_cover_mm, self.width_mm, "width")?;
        require_clear_section("stirrup_cover_mm", self.stirrup_cover_mm, self.depth_mm, "depth")?;
        Ok(())
    }

    /// Concrete volume of the beam
    pub fn concrete_volume(&self) -> CubicMeters {
        CubicMeters::of_block(
            Millimeters(self.length_mm),
            Millimeters(self.width_mm),
            Millimeters(self.depth_mm),
        )
    }
}

impl FromForm for BeamInput {
    const FIELDS: &'static [FormField] = &[
        FormField::new("length", "Length (mm)"),
        FormField::new("width", "Width (mm)"),
        FormField::new("depth", "Depth (mm)"),
        FormField::new("main_bar_diameter", "Main bar diameter (mm)"),
        FormField::new("main_bar_count", "Number of main bars"),
        FormField::new("stirrup_diameter", "Stirrup diameter (mm)"),
        FormField::new("stirrup_spacing", "Stirrup spacing (mm)"),
        FormField::new("stirrup_cover", "Concrete cover (mm)"),
    ];

    fn from_form(form: &FormValues) -> CalcResult<Self> {
        let input = BeamInput {
            label: form.label(),
            length_mm: form.number("length")?,
            width_mm: form.number("width")?,
            depth_mm: form.number("depth")?,
            main_bar_diameter_mm: form.number("main_bar_diameter")?,
            main_bar_count: form.count("main_bar_count")?,
            stirrup_diameter_mm: form.number("stirrup_diameter")?,
            stirrup_spacing_mm: form.number("stirrup_spacing")?,
            stirrup_cover_mm: form.number("stirrup_cover")?,
        };
        input.validate().map_err(|e| to_form_field(e, Self::FIELDS))?;
        Ok(input)
    }
}

/// Results from a beam calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "concrete_volume_m3": 0.6,
///   "steel_weight_kg": 40.21,
///   "steel_percentage": 0.85,
///   "main_bars": { "count": 4, "bar_length_m": 4.0, "total_length_m": 16.0,
///                  "unit_weight_kg_per_m": 1.58, "weight_kg": 25.28 },
///   "stirrups": { "count": 27, "bar_length_m": 1.4, "total_length_m": 37.8,
///                 "unit_weight_kg_per_m": 0.395, "weight_kg": 14.93 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResult {
    /// Concrete volume, total steel and steel percentage
    #[serde(flatten)]
    pub summary: QuantitySummary,

    /// Longitudinal main bars
    pub main_bars: BarGroup,

    /// Closed stirrups
    pub stirrups: BarGroup,
}

/// Calculate beam quantities.
///
/// # Arguments
///
/// * `input` - Beam geometry and reinforcement
///
/// # Returns
///
/// * `Ok(BeamResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &BeamInput) -> CalcResult<BeamResult> {
    input.validate()?;

    let volume = input.concrete_volume();
    let length: Meters = Millimeters(input.length_mm).into();

    let main_bars = BarGroup::new(input.main_bar_diameter_mm, input.main_bar_count, length);

    let perimeter = loop_perimeter(input.width_mm, input.depth_mm, input.stirrup_cover_mm);
    let stirrup_count = checked_bar_count("stirrup_spacing_mm", input.length_mm, input.stirrup_spacing_mm)?;
    let stirrups = BarGroup::new(input.stirrup_diameter_mm, stirrup_count, perimeter);

    let summary = QuantitySummary::new(volume, main_bars.weight() + stirrups.weight());

    debug!(
        label = %input.label,
        volume_m3 = summary.concrete_volume_m3,
        steel_kg = summary.steel_weight_kg,
        stirrups = stirrup_count,
        "beam calculated"
    );

    Ok(BeamResult {
        summary,
        main_bars,
        stirrups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_beam() -> BeamInput {
        BeamInput {
            label: "Test Beam".to_string(),
            length_mm: 4000.0,
            width_mm: 300.0,
            depth_mm: 500.0,
            main_bar_diameter_mm: 16.0,
            main_bar_count: 4,
            stirrup_diameter_mm: 8.0,
            stirrup_spacing_mm: 150.0,
            stirrup_cover_mm: 25.0,
        }
    }

    #[test]
    fn test_concrete_volume() {
        let result = calculate(&test_beam()).unwrap();
        assert!((result.summary.concrete_volume_m3 - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_main_bars() {
        let result = calculate(&test_beam()).unwrap();
        // (256 / 162) x 4 bars x 4 m
        assert_eq!(result.main_bars.count, 4);
        assert!((result.main_bars.total_length_m - 16.0).abs() < 1e-9);
        assert!((result.main_bars.weight_kg - 25.28).abs() < 0.01);
    }

    #[test]
    fn test_stirrups() {
        let result = calculate(&test_beam()).unwrap();
        // floor(4000 / 150) + 1 = 27 loops of 2 x (0.25 + 0.45) = 1.4 m
        assert_eq!(result.stirrups.count, 27);
        assert!((result.stirrups.bar_length_m - 1.4).abs() < 1e-9);
        assert!((result.stirrups.weight_kg - 14.93).abs() < 0.01);
    }

    #[test]
    fn test_totals() {
        let result = calculate(&test_beam()).unwrap();
        assert!((result.summary.steel_weight_kg - 40.21).abs() < 0.01);
        let expected_pct = 100.0 * result.summary.steel_weight_kg / (0.6 * 7850.0);
        assert!((result.summary.steel_percentage - expected_pct).abs() < 1e-9);
    }

    #[test]
    fn test_zero_spacing_rejected() {
        let mut beam = test_beam();
        beam.stirrup_spacing_mm = 0.0;
        let err = calculate(&beam).unwrap_err();
        assert_eq!(err.field(), Some("stirrup_spacing_mm"));
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let mut beam = test_beam();
        beam.width_mm = -300.0;
        assert!(calculate(&beam).is_err());
    }

    #[test]
    fn test_cover_too_large() {
        let mut beam = test_beam();
        beam.stirrup_cover_mm = 150.0;
        let err = calculate(&beam).unwrap_err();
        assert_eq!(err.field(), Some("stirrup_cover_mm"));
    }

    #[test]
    fn test_no_main_bars_rejected() {
        let mut beam = test_beam();
        beam.main_bar_count = 0;
        assert!(calculate(&beam).is_err());
    }

    #[test]
    fn test_from_form() {
        let form = FormValues::new()
            .with("label", "B-2")
            .with("length", "4000")
            .with("width", "300")
            .with("depth", "500")
            .with("main_bar_diameter", "16")
            .with("main_bar_count", "4")
            .with("stirrup_diameter", "8")
            .with("stirrup_spacing", "150")
            .with("stirrup_cover", "25");
        let input = BeamInput::from_form(&form).unwrap();
        assert_eq!(input.label, "B-2");
        assert_eq!(input.main_bar_count, 4);
        assert_eq!(calculate(&input).unwrap(), calculate(&test_beam()).unwrap());
    }

    #[test]
    fn test_from_form_reports_form_key() {
        let form = FormValues::new()
            .with("length", "4000")
            .with("width", "0")
            .with("depth", "500")
            .with("main_bar_diameter", "16")
            .with("main_bar_count", "4")
            .with("stirrup_diameter", "8")
            .with("stirrup_spacing", "150")
            .with("stirrup_cover", "25");
        let err = BeamInput::from_form(&form).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("width"));
    }

    #[test]
    fn test_serialization() {
        let beam = test_beam();
        let json = serde_json::to_string_pretty(&beam).unwrap();
        let roundtrip: BeamInput = serde_json::from_str(&json).unwrap();
        assert_eq!(beam, roundtrip);

        let result = calculate(&beam).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("concrete_volume_m3").is_some());
        assert_eq!(json["stirrups"]["count"], 27);
    }
}
