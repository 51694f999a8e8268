//! # Footing Quantity Calculation
//!
//! Concrete volume and bottom mesh steel for a rectangular pad footing.
//! One bar size at one spacing, placed in both plan directions.
//!
//! Bars counted along the length each span the footing width, and bars
//! counted along the width each span the length. Cover and hooks are
//! ignored, so bar lengths equal the footing dimensions.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::footing::{FootingInput, calculate};
//!
//! let input = FootingInput {
//!     label: "F-1".to_string(),
//!     length_mm: 2000.0,
//!     width_mm: 1500.0,
//!     depth_mm: 300.0,
//!     bar_diameter_mm: 12.0,
//!     bar_spacing_mm: 200.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.bars_along_length.count, 11);
//! assert_eq!(result.bars_along_width.count, 8);
//! assert!((result.total_bar_length_m - 32.5).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_positive, CalcResult};
use crate::form::{to_form_field, FormField, FormValues, FromForm};
use crate::rebar::{checked_bar_count, bar_unit_weight, BarGroup, QuantitySummary};
use crate::units::{CubicMeters, Meters, Millimeters};

/// Input parameters for a pad footing. All dimensions in millimeters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "F-1",
///   "length_mm": 2000.0,
///   "width_mm": 1500.0,
///   "depth_mm": 300.0,
///   "bar_diameter_mm": 12.0,
///   "bar_spacing_mm": 200.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingInput {
    /// User label for this footing
    #[serde(default)]
    pub label: String,

    /// Footing length (mm)
    pub length_mm: f64,

    /// Footing width (mm)
    pub width_mm: f64,

    /// Footing depth (mm)
    pub depth_mm: f64,

    /// Mesh bar diameter (mm)
    pub bar_diameter_mm: f64,

    /// Mesh bar spacing, same in both directions (mm)
    pub bar_spacing_mm: f64,
}

impl FootingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_mm", self.length_mm)?;
        require_positive("width_mm", self.width_mm)?;
        require_positive("depth_mm", self.depth_mm)?;
        require_positive("bar_diameter_mm", self.bar_diameter_mm)?;
        require_positive("bar_spacing_mm", self.bar_spacing_mm)?;
        Ok(())
    }

    /// Concrete volume of the footing
    pub fn concrete_volume(&self) -> CubicMeters {
        CubicMeters::of_block(
            Millimeters(self.length_mm),
            Millimeters(self.width_mm),
            Millimeters(self.depth_mm),
        )
    }
}

impl FromForm for FootingInput {
    const FIELDS: &'static [FormField] = &[
        FormField::new("length", "Length (mm)"),
        FormField::new("width", "Width (mm)"),
        FormField::new("depth", "Depth (mm)"),
        FormField::new("bar_diameter", "Bar diameter (mm)"),
        FormField::new("bar_spacing", "Bar spacing (mm)"),
    ];

    fn from_form(form: &FormValues) -> CalcResult<Self> {
        let input = FootingInput {
            label: form.label(),
            length_mm: form.number("length")?,
            width_mm: form.number("width")?,
            depth_mm: form.number("depth")?,
            bar_diameter_mm: form.number("bar_diameter")?,
            bar_spacing_mm: form.number("bar_spacing")?,
        };
        input.validate().map_err(|e| to_form_field(e, Self::FIELDS))?;
        Ok(input)
    }
}

/// Results from a footing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingResult {
    /// Concrete volume, total steel and steel percentage
    #[serde(flatten)]
    pub summary: QuantitySummary,

    /// Bars spaced along the length, each spanning the width
    pub bars_along_length: BarGroup,

    /// Bars spaced along the width, each spanning the length
    pub bars_along_width: BarGroup,

    /// Combined length of both directions (m)
    pub total_bar_length_m: f64,

    /// Mass per meter of the mesh bar (kg/m)
    pub unit_weight_kg_per_m: f64,
}

/// Calculate footing quantities.
///
/// # Returns
///
/// * `Ok(FootingResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &FootingInput) -> CalcResult<FootingResult> {
    input.validate()?;

    let volume = input.concrete_volume();
    let length: Meters = Millimeters(input.length_mm).into();
    let width: Meters = Millimeters(input.width_mm).into();

    let bars_along_length = BarGroup::new(
        input.bar_diameter_mm,
        checked_bar_count("bar_spacing_mm", input.length_mm, input.bar_spacing_mm)?,
        width,
    );
    let bars_along_width = BarGroup::new(
        input.bar_diameter_mm,
        checked_bar_count("bar_spacing_mm", input.width_mm, input.bar_spacing_mm)?,
        length,
    );

    let total_length = Meters(bars_along_length.total_length_m + bars_along_width.total_length_m);
    let unit_weight = bar_unit_weight(input.bar_diameter_mm);
    let summary = QuantitySummary::new(volume, unit_weight * total_length);

    debug!(
        label = %input.label,
        volume_m3 = summary.concrete_volume_m3,
        steel_kg = summary.steel_weight_kg,
        total_bar_length_m = total_length.0,
        "footing calculated"
    );

    Ok(FootingResult {
        summary,
        bars_along_length,
        bars_along_width,
        total_bar_length_m: total_length.0,
        unit_weight_kg_per_m: unit_weight.0,
    })
}
