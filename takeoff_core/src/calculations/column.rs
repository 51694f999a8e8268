//! # Column Quantity Calculation
//!
//! Concrete volume and reinforcing steel for a rectangular column with
//! vertical main bars and closed ties.
//!
//! ## Assumptions
//!
//! - `length_mm × width_mm` is the plan cross-section, `height_mm` the column height
//! - Main bars run the full height (no starter bars or laps)
//! - Ties wrap the clear cross-section inside the cover, with a tie at top and bottom
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::column::{ColumnInput, calculate};
//!
//! let input = ColumnInput {
//!     label: "C-1".to_string(),
//!     length_mm: 400.0,
//!     width_mm: 400.0,
//!     height_mm: 3000.0,
//!     main_bar_diameter_mm: 16.0,
//!     main_bar_count: 8,
//!     tie_diameter_mm: 8.0,
//!     tie_spacing_mm: 200.0,
//!     tie_cover_mm: 40.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.ties.count, 16);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_clear_section, require_positive, CalcError, CalcResult};
use crate::form::{to_form_field, FormField, FormValues, FromForm};
use crate::rebar::{checked_bar_count, loop_perimeter, BarGroup, QuantitySummary};
use crate::units::{CubicMeters, Meters, Millimeters};

/// Input parameters for a column. All dimensions in millimeters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "length_mm": 400.0,
///   "width_mm": 400.0,
///   "height_mm": 3000.0,
///   "main_bar_diameter_mm": 16.0,
///   "main_bar_count": 8,
///   "tie_diameter_mm": 8.0,
///   "tie_spacing_mm": 200.0,
///   "tie_cover_mm": 40.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    /// User label for this column (e.g., "C-1", "Corner Column")
    #[serde(default)]
    pub label: String,

    /// Cross-section length (mm)
    pub length_mm: f64,

    /// Cross-section width (mm)
    pub width_mm: f64,

    /// Column height (mm)
    pub height_mm: f64,

    /// Main bar diameter (mm)
    pub main_bar_diameter_mm: f64,

    /// Number of main bars
    pub main_bar_count: u32,

    /// Tie bar diameter (mm)
    pub tie_diameter_mm: f64,

    /// Vertical tie spacing (mm)
    pub tie_spacing_mm: f64,

    /// Concrete cover to the ties (mm)
    pub tie_cover_mm: f64,
}

impl ColumnInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_mm", self.length_mm)?;
        require_positive("width_mm", self.width_mm)?;
        require_positive("height_mm", self.height_mm)?;
        require_positive("main_bar_diameter_mm", self.main_bar_diameter_mm)?;
        if self.main_bar_count == 0 {
            return Err(CalcError::invalid_input(
                "main_bar_count",
                "0",
                "A column needs at least one main bar",
            ));
        }
        require_positive("tie_diameter_mm", self.tie_diameter_mm)?;
        require_positive("tie_spacing_mm", self.tie_spacing_mm)?;
        require_clear_section("tie_cover_mm", self.tie_cover_mm, self.width_mm, "width")?;
        require_clear_section("tie_cover_mm", self.tie_cover_mm, self.length_mm, "length")?;
        Ok(())
    }

    /// Concrete volume of the column
    pub fn concrete_volume(&self) -> CubicMeters {
        CubicMeters::of_block(
            Millimeters(self.length_mm),
            Millimeters(self.width_mm),
            Millimeters(self.height_mm),
        )
    }
}

impl FromForm for ColumnInput {
    const FIELDS: &'static [FormField] = &[
        FormField::new("length", "Length (mm)"),
        FormField::new("width", "Width (mm)"),
        FormField::new("height", "Height (mm)"),
        FormField::new("main_bar_diameter", "Main bar diameter (mm)"),
        FormField::new("main_bar_count", "Number of main bars"),
        FormField::new("tie_diameter", "Tie diameter (mm)"),
        FormField::new("tie_spacing", "Tie spacing (mm)"),
        FormField::new("tie_cover", "Concrete cover (mm)"),
    ];

    fn from_form(form: &FormValues) -> CalcResult<Self> {
        let input = ColumnInput {
            label: form.label(),
            length_mm: form.number("length")?,
            width_mm: form.number("width")?,
            height_mm: form.number("height")?,
            main_bar_diameter_mm: form.number("main_bar_diameter")?,
            main_bar_count: form.count("main_bar_count")?,
            tie_diameter_mm: form.number("tie_diameter")?,
            tie_spacing_mm: form.number("tie_spacing")?,
            tie_cover_mm: form.number("tie_cover")?,
        };
        input.validate().map_err(|e| to_form_field(e, Self::FIELDS))?;
        Ok(input)
    }
}

/// Results from a column calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnResult {
    /// Concrete volume, total steel and steel percentage
    #[serde(flatten)]
    pub summary: QuantitySummary,

    /// Vertical main bars
    pub main_bars: BarGroup,

    /// Closed ties
    pub ties: BarGroup,
}

/// Calculate column quantities.
///
/// # Returns
///
/// * `Ok(ColumnResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &ColumnInput) -> CalcResult<ColumnResult> {
    input.validate()?;

    let volume = input.concrete_volume();
    let height: Meters = Millimeters(input.height_mm).into();

    let main_bars = BarGroup::new(input.main_bar_diameter_mm, input.main_bar_count, height);

    let perimeter = loop_perimeter(input.width_mm, input.length_mm, input.tie_cover_mm);
    let tie_count = checked_bar_count("tie_spacing_mm", input.height_mm, input.tie_spacing_mm)?;
    let ties = BarGroup::new(input.tie_diameter_mm, tie_count, perimeter);

    let summary = QuantitySummary::new(volume, main_bars.weight() + ties.weight());

    debug!(
        label = %input.label,
        volume_m3 = summary.concrete_volume_m3,
        steel_kg = summary.steel_weight_kg,
        ties = tie_count,
        "column calculated"
    );

    Ok(ColumnResult {
        summary,
        main_bars,
        ties,
    })
}
