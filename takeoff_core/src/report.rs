//! # Text Reports
//!
//! Plain-text rendering of calculation results for terminals and logs.
//! Rounding matches what a site estimator reads off the sheet: volumes to
//! 3 decimals, weights, lengths and percentages to 2, unit weights to 3.

use std::fmt::{self, Write};

use crate::calculations::CalculationOutput;
use crate::rebar::{BarGroup, QuantitySummary};

const RULE: &str = "═══════════════════════════════════════";

/// Render options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Include the per-category steel breakdown
    pub show_breakdown: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions { show_breakdown: true }
    }
}

/// Render a result as a boxed text report.
///
/// ```rust
/// use takeoff_core::calculations::{CalculationItem, FootingInput};
/// use takeoff_core::report::{render, ReportOptions};
///
/// let item = CalculationItem::Footing(FootingInput {
///     label: "F-1".to_string(),
///     length_mm: 2000.0,
///     width_mm: 1500.0,
///     depth_mm: 300.0,
///     bar_diameter_mm: 12.0,
///     bar_spacing_mm: 200.0,
/// });
/// let output = item.calculate().unwrap();
/// let text = render(item.label(), &output, ReportOptions::default());
/// assert!(text.contains("0.900 m³"));
/// assert!(text.contains("28.89 kg"));
/// ```
pub fn render(label: &str, output: &CalculationOutput, options: ReportOptions) -> String {
    let mut out = String::new();
    write_report(&mut out, label, output, options).expect("writing to a String cannot fail");
    out
}

fn write_report<W: Write>(out: &mut W, label: &str, output: &CalculationOutput, options: ReportOptions) -> fmt::Result {
    let title = output.kind().title().to_uppercase();

    writeln!(out, "{RULE}")?;
    if label.is_empty() {
        writeln!(out, "  {title}")?;
    } else {
        writeln!(out, "  {title} - {label}")?;
    }
    writeln!(out, "{RULE}")?;
    write_summary(out, &output.summary())?;

    if options.show_breakdown {
        writeln!(out)?;
        writeln!(out, "Steel breakdown:")?;
        match output {
            CalculationOutput::Beam(r) => {
                write_group(out, "Main bars", &r.main_bars)?;
                write_group(out, "Stirrups", &r.stirrups)?;
            }
            CalculationOutput::Column(r) => {
                write_group(out, "Main bars", &r.main_bars)?;
                write_group(out, "Ties", &r.ties)?;
            }
            CalculationOutput::Footing(r) => {
                write_group(out, "Bars along length", &r.bars_along_length)?;
                write_group(out, "Bars along width", &r.bars_along_width)?;
                writeln!(out, "  Total bar length: {:.2} m", r.total_bar_length_m)?;
                writeln!(out, "  Weight per meter: {:.3} kg/m", r.unit_weight_kg_per_m)?;
            }
            CalculationOutput::Slab(r) => {
                write_group(out, "Main bars", &r.main_bars)?;
                write_group(out, "Distribution bars", &r.distribution_bars)?;
            }
        }
    }
    writeln!(out, "{RULE}")
}

fn write_summary<W: Write>(out: &mut W, summary: &QuantitySummary) -> fmt::Result {
    writeln!(out, "Concrete volume:  {:.3} m³", summary.concrete_volume_m3)?;
    writeln!(out, "Steel weight:     {:.2} kg", summary.steel_weight_kg)?;
    writeln!(out, "Steel percentage: {:.2} %", summary.steel_percentage)
}

fn write_group<W: Write>(out: &mut W, name: &str, group: &BarGroup) -> fmt::Result {
    writeln!(
        out,
        "  {name}: {} x {:.2} m = {:.2} m @ {:.3} kg/m -> {:.2} kg",
        group.count,
        group.bar_length_m,
        group.total_length_m,
        group.unit_weight_kg_per_m,
        group.weight_kg
    )
}
