//! # Slab Quantity Calculation
//!
//! Concrete volume and two-way reinforcement for a rectangular slab: main bars
//! spanning the length, distribution bars spanning the width.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::slab::{SlabInput, calculate};
//!
//! let input = SlabInput {
//!     label: "S-1".to_string(),
//!     length_mm: 5000.0,
//!     width_mm: 4000.0,
//!     depth_mm: 150.0,
//!     main_bar_diameter_mm: 12.0,
//!     main_bar_spacing_mm: 150.0,
//!     dist_bar_diameter_mm: 10.0,
//!     dist_bar_spacing_mm: 200.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.main_bars.count, 27);
//! assert_eq!(result.distribution_bars.count, 26);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_positive, CalcResult};
use crate::form::{to_form_field, FormField, FormValues, FromForm};
use crate::rebar::{checked_bar_count, BarGroup, QuantitySummary};
use crate::units::{CubicMeters, Meters, Millimeters};

/// Input parameters for a slab. All dimensions in millimeters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "S-1",
///   "length_mm": 5000.0,
///   "width_mm": 4000.0,
///   "depth_mm": 150.0,
///   "main_bar_diameter_mm": 12.0,
///   "main_bar_spacing_mm": 150.0,
///   "dist_bar_diameter_mm": 10.0,
///   "dist_bar_spacing_mm": 200.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabInput {
    /// User label for this slab
    #[serde(default)]
    pub label: String,

    /// Slab length, the span of the main bars (mm)
    pub length_mm: f64,

    /// Slab width, the span of the distribution bars (mm)
    pub width_mm: f64,

    /// Slab thickness (mm)
    pub depth_mm: f64,

    /// Main bar diameter (mm)
    pub main_bar_diameter_mm: f64,

    /// Main bar spacing across the width (mm)
    pub main_bar_spacing_mm: f64,

    /// Distribution bar diameter (mm)
    pub dist_bar_diameter_mm: f64,

    /// Distribution bar spacing along the length (mm)
    pub dist_bar_spacing_mm: f64,
}

impl SlabInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_mm", self.length_mm)?;
        require_positive("width_mm", self.width_mm)?;
        require_positive("depth_mm", self.depth_mm)?;
        require_positive("main_bar_diameter_mm", self.main_bar_diameter_mm)?;
        require_positive("main_bar_spacing_mm", self.main_bar_spacing_mm)?;
        require_positive("dist_bar_diameter_mm", self.dist_bar_diameter_mm)?;
        require_positive("dist_bar_spacing_mm", self.dist_bar_spacing_mm)?;
        Ok(())
    }

    /// Concrete volume of the slab
    pub fn concrete_volume(&self) -> CubicMeters {
        CubicMeters::of_block(
            Millimeters(self.length_mm),
            Millimeters(self.width_mm),
            Millimeters(self.depth_mm),
        )
    }
}

impl FromForm for SlabInput {
    const FIELDS: &'static [FormField] = &[
        FormField::new("length", "Length (mm)"),
        FormField::new("width", "Width (mm)"),
        FormField::new("depth", "Thickness (mm)"),
        FormField::new("main_bar_diameter", "Main bar diameter (mm)"),
        FormField::new("main_bar_spacing", "Main bar spacing (mm)"),
        FormField::new("dist_bar_diameter", "Distribution bar diameter (mm)"),
        FormField::new("dist_bar_spacing", "Distribution bar spacing (mm)"),
    ];

    fn from_form(form: &FormValues) -> CalcResult<Self> {
        let input = SlabInput {
            label: form.label(),
            length_mm: form.number("length")?,
            width_mm: form.number("width")?,
            depth_mm: form.number("depth")?,
            main_bar_diameter_mm: form.number("main_bar_diameter")?,
            main_bar_spacing_mm: form.number("main_bar_spacing")?,
            dist_bar_diameter_mm: form.number("dist_bar_diameter")?,
            dist_bar_spacing_mm: form.number("dist_bar_spacing")?,
        };
        input.validate().map_err(|e| to_form_field(e, Self::FIELDS))?;
        Ok(input)
    }
}

/// Results from a slab calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabResult {
    /// Concrete volume, total steel and steel percentage
    #[serde(flatten)]
    pub summary: QuantitySummary,

    /// Main bars, spaced across the width and running the full length
    pub main_bars: BarGroup,

    /// Distribution bars, spaced along the length and running the full width
    pub distribution_bars: BarGroup,
}

/// Calculate slab quantities.
///
/// # Returns
///
/// * `Ok(SlabResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &SlabInput) -> CalcResult<SlabResult> {
    input.validate()?;

    let volume = input.concrete_volume();
    let length: Meters = Millimeters(input.length_mm).into();
    let width: Meters = Millimeters(input.width_mm).into();

    let main_bars = BarGroup::new(
        input.main_bar_diameter_mm,
        checked_bar_count("main_bar_spacing_mm", input.width_mm, input.main_bar_spacing_mm)?,
        length,
    );
    let distribution_bars = BarGroup::new(
        input.dist_bar_diameter_mm,
        checked_bar_count("dist_bar_spacing_mm", input.length_mm, input.dist_bar_spacing_mm)?,
        width,
    );

    let summary = QuantitySummary::new(volume, main_bars.weight() + distribution_bars.weight());

    debug!(
        label = %input.label,
        volume_m3 = summary.concrete_volume_m3,
        steel_kg = summary.steel_weight_kg,
        main_bars = main_bars.count,
        distribution_bars = distribution_bars.count,
        "slab calculated"
    );

    Ok(SlabResult {
        summary,
        main_bars,
        distribution_bars,
    })
}
