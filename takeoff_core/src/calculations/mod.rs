//! # Quantity Calculations
//!
//! This module contains the four element calculators. Each one follows the
//! pattern:
//!
//! - `*Input` - Input parameters in millimeters (JSON-serializable)
//! - `*Result` - Volume, steel and per-category breakdown (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! No calculator depends on another and none keeps state between calls.
//!
//! ## Available Calculations
//!
//! - [`beam`] - Main bars and stirrups
//! - [`column`] - Main bars and ties
//! - [`footing`] - Two-way bottom mesh
//! - [`slab`] - Main and distribution bars

pub mod beam;
pub mod column;
pub mod footing;
pub mod slab;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::form::{FormField, FormValues, FromForm};
use crate::rebar::QuantitySummary;

// Re-export commonly used types
pub use beam::{BeamInput, BeamResult};
pub use column::{ColumnInput, ColumnResult};
pub use footing::{FootingInput, FootingResult};
pub use slab::{SlabInput, SlabResult};

/// The four calculators, for front ends that pick one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatorKind {
    Beam,
    Column,
    Footing,
    Slab,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 4] = [
        CalculatorKind::Beam,
        CalculatorKind::Column,
        CalculatorKind::Footing,
        CalculatorKind::Slab,
    ];

    /// Display title, e.g. "Beam Calculator"
    pub fn title(self) -> &'static str {
        match self {
            CalculatorKind::Beam => "Beam Calculator",
            CalculatorKind::Column => "Column Calculator",
            CalculatorKind::Footing => "Footing Calculator",
            CalculatorKind::Slab => "Slab Calculator",
        }
    }

    /// One-line description for menus and help text
    pub fn description(self) -> &'static str {
        match self {
            CalculatorKind::Beam => "Concrete volume and steel for beams: main bars and stirrups",
            CalculatorKind::Column => "Concrete volume and steel for columns: main bars and ties",
            CalculatorKind::Footing => "Concrete volume and two-way mesh steel for pad footings",
            CalculatorKind::Slab => "Concrete volume and steel for slabs: main and distribution bars",
        }
    }

    /// Form fields in display order
    pub fn fields(self) -> &'static [FormField] {
        match self {
            CalculatorKind::Beam => BeamInput::FIELDS,
            CalculatorKind::Column => ColumnInput::FIELDS,
            CalculatorKind::Footing => FootingInput::FIELDS,
            CalculatorKind::Slab => SlabInput::FIELDS,
        }
    }

    /// Parse a submitted form for this calculator.
    pub fn parse_form(self, form: &FormValues) -> CalcResult<CalculationItem> {
        Ok(match self {
            CalculatorKind::Beam => CalculationItem::Beam(BeamInput::from_form(form)?),
            CalculatorKind::Column => CalculationItem::Column(ColumnInput::from_form(form)?),
            CalculatorKind::Footing => CalculationItem::Footing(FootingInput::from_form(form)?),
            CalculatorKind::Slab => CalculationItem::Slab(SlabInput::from_form(form)?),
        })
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalculatorKind::Beam => "Beam",
            CalculatorKind::Column => "Column",
            CalculatorKind::Footing => "Footing",
            CalculatorKind::Slab => "Slab",
        };
        f.write_str(name)
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beam" => Ok(CalculatorKind::Beam),
            "column" => Ok(CalculatorKind::Column),
            "footing" => Ok(CalculatorKind::Footing),
            "slab" => Ok(CalculatorKind::Slab),
            other => Err(CalcError::invalid_input(
                "calculator",
                other,
                "Expected one of: beam, column, footing, slab",
            )),
        }
    }
}

/// Enum wrapper for all calculation inputs.
///
/// Lets a batch file hold a mix of elements while keeping each input typed.
///
/// ```json
/// [
///   { "type": "Footing", "label": "F-1", "length_mm": 2000.0, "width_mm": 1500.0,
///     "depth_mm": 300.0, "bar_diameter_mm": 12.0, "bar_spacing_mm": 200.0 }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Beam(BeamInput),
    Column(ColumnInput),
    Footing(FootingInput),
    Slab(SlabInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Beam(b) => &b.label,
            CalculationItem::Column(c) => &c.label,
            CalculationItem::Footing(f) => &f.label,
            CalculationItem::Slab(s) => &s.label,
        }
    }

    /// Which calculator this item belongs to
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationItem::Beam(_) => CalculatorKind::Beam,
            CalculationItem::Column(_) => CalculatorKind::Column,
            CalculationItem::Footing(_) => CalculatorKind::Footing,
            CalculationItem::Slab(_) => CalculatorKind::Slab,
        }
    }

    /// Run the matching calculator.
    pub fn calculate(&self) -> CalcResult<CalculationOutput> {
        Ok(match self {
            CalculationItem::Beam(input) => CalculationOutput::Beam(beam::calculate(input)?),
            CalculationItem::Column(input) => CalculationOutput::Column(column::calculate(input)?),
            CalculationItem::Footing(input) => CalculationOutput::Footing(footing::calculate(input)?),
            CalculationItem::Slab(input) => CalculationOutput::Slab(slab::calculate(input)?),
        })
    }
}

/// Enum wrapper for all calculation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Beam(BeamResult),
    Column(ColumnResult),
    Footing(FootingResult),
    Slab(SlabResult),
}

impl CalculationOutput {
    /// Concrete volume, total steel and percentage of any result
    pub fn summary(&self) -> QuantitySummary {
        match self {
            CalculationOutput::Beam(r) => r.summary,
            CalculationOutput::Column(r) => r.summary,
            CalculationOutput::Footing(r) => r.summary,
            CalculationOutput::Slab(r) => r.summary,
        }
    }

    /// Which calculator produced this result
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationOutput::Beam(_) => CalculatorKind::Beam,
            CalculationOutput::Column(_) => CalculatorKind::Column,
            CalculationOutput::Footing(_) => CalculatorKind::Footing,
            CalculationOutput::Slab(_) => CalculatorKind::Slab,
        }
    }
}
