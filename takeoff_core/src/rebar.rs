//! # Reinforcing Bar Helpers
//!
//! Shared arithmetic for every calculator: bar mass per meter, bar counts
//! from spacing, stirrup/tie loop perimeters, and the steel percentage of a
//! concrete element.
//!
//! ## Bar Unit Weight
//!
//! A round steel bar of diameter `d` (mm) weighs `d² / 162` kg per meter.
//! The divisor comes from `π/4 × d² × 7850 kg/m³ / 10⁶ ≈ d² / 162.2`, rounded
//! to the figure used on site.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::rebar::{bar_count, bar_unit_weight};
//!
//! // 12 mm bars at 200 mm across a 2 m footing
//! assert_eq!(bar_count(2000.0, 200.0), Some(11));
//! assert!((bar_unit_weight(12.0).0 - 0.8889).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{CubicMeters, KgPerMeter, Kilograms, Meters, Millimeters};

/// Density of reinforcing steel (kg/m³)
pub const STEEL_DENSITY_KG_M3: f64 = 7850.0;

/// Divisor in the `d² / 162` bar unit weight rule
pub const UNIT_WEIGHT_DIVISOR: f64 = 162.0;

/// Mass per meter of a bar with the given diameter in millimeters.
pub fn bar_unit_weight(diameter_mm: f64) -> KgPerMeter {
    KgPerMeter(diameter_mm * diameter_mm / UNIT_WEIGHT_DIVISOR)
}

/// Steel mass expressed as a percentage of the mass of an equal volume of steel.
///
/// `steel / (volume × 7850) × 100`
pub fn steel_percentage(steel: Kilograms, volume: CubicMeters) -> f64 {
    steel.0 / (volume.0 * STEEL_DENSITY_KG_M3) * 100.0
}

/// Number of bars placed at `spacing_mm` along `dimension_mm`, counting a bar
/// at both ends: `floor(dimension / spacing) + 1`.
///
/// Callers validate that both values are positive and finite. Returns `None`
/// when the count does not fit in a `u32`.
pub fn bar_count(dimension_mm: f64, spacing_mm: f64) -> Option<u32> {
    let spaces = (dimension_mm / spacing_mm).floor();
    if !spaces.is_finite() || spaces < 0.0 || spaces >= f64::from(u32::MAX) {
        return None;
    }
    Some(spaces as u32 + 1)
}

/// [`bar_count`] that reports an oversized count against the spacing field.
pub(crate) fn checked_bar_count(spacing_field: &str, dimension_mm: f64, spacing_mm: f64) -> CalcResult<u32> {
    bar_count(dimension_mm, spacing_mm).ok_or_else(|| {
        CalcError::invalid_input(
            spacing_field,
            spacing_mm.to_string(),
            format!("Spacing gives more than {} bars over {dimension_mm} mm", u32::MAX),
        )
    })
}

/// Perimeter of a closed stirrup or tie loop inside a `side_a × side_b`
/// section with `cover_mm` on every face.
pub fn loop_perimeter(side_a_mm: f64, side_b_mm: f64, cover_mm: f64) -> Meters {
    let clear_a: Meters = Millimeters(side_a_mm - 2.0 * cover_mm).into();
    let clear_b: Meters = Millimeters(side_b_mm - 2.0 * cover_mm).into();
    (clear_a + clear_b) * 2.0
}

/// One reinforcement category of an element (main bars, stirrups, ...).
///
/// ## JSON Example
///
/// ```json
/// {
///   "count": 27,
///   "bar_length_m": 1.4,
///   "total_length_m": 37.8,
///   "unit_weight_kg_per_m": 0.395,
///   "weight_kg": 14.93
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    /// Number of bars (or loops)
    pub count: u32,

    /// Length of a single bar or loop (m)
    pub bar_length_m: f64,

    /// Total bar length of the group (m)
    pub total_length_m: f64,

    /// Mass per meter of one bar (kg/m)
    pub unit_weight_kg_per_m: f64,

    /// Total mass of the group (kg)
    pub weight_kg: f64,
}

impl BarGroup {
    /// Build a group of `count` identical bars, each `bar_length` long.
    pub fn new(diameter_mm: f64, count: u32, bar_length: Meters) -> Self {
        let unit_weight = bar_unit_weight(diameter_mm);
        let total_length = bar_length * f64::from(count);
        let weight = unit_weight * total_length;
        BarGroup {
            count,
            bar_length_m: bar_length.0,
            total_length_m: total_length.0,
            unit_weight_kg_per_m: unit_weight.0,
            weight_kg: weight.0,
        }
    }

    /// Total mass as a typed value
    pub fn weight(&self) -> Kilograms {
        Kilograms(self.weight_kg)
    }
}

/// Headline quantities shared by every calculator result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantitySummary {
    /// Concrete volume (m³)
    pub concrete_volume_m3: f64,

    /// Total reinforcing steel mass (kg)
    pub steel_weight_kg: f64,

    /// Steel percentage (see [`steel_percentage`])
    pub steel_percentage: f64,
}

impl QuantitySummary {
    /// Combine a concrete volume with the steel it contains.
    pub fn new(volume: CubicMeters, steel: Kilograms) -> Self {
        QuantitySummary {
            concrete_volume_m3: volume.0,
            steel_weight_kg: steel.0,
            steel_percentage: steel_percentage(steel, volume),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_weight_formula() {
        assert!((bar_unit_weight(16.0).0 - 256.0 / 162.0).abs() < 1e-12);
        assert!((bar_unit_weight(8.0).0 - 64.0 / 162.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_weight_monotonic() {
        let sizes = [6.0, 8.0, 10.0, 12.0, 16.0, 20.0, 25.0, 32.0];
        for pair in sizes.windows(2) {
            assert!(bar_unit_weight(pair[0]).0 < bar_unit_weight(pair[1]).0);
        }
    }

    #[test]
    fn test_bar_count_inclusive_ends() {
        assert_eq!(bar_count(4000.0, 150.0), Some(27));
        assert_eq!(bar_count(1500.0, 200.0), Some(8));
        assert_eq!(bar_count(2000.0, 200.0), Some(11));
    }

    #[test]
    fn test_bar_count_spacing_larger_than_dimension() {
        assert_eq!(bar_count(100.0, 250.0), Some(1));
    }

    #[test]
    fn test_bar_count_overflow() {
        // 1e7 mm at 0.001 mm would be 1e10 + 1 bars
        assert_eq!(bar_count(1.0e7, 0.001), None);
        assert_eq!(bar_count(f64::from(u32::MAX) - 1.0, 1.0), Some(u32::MAX));
        assert_eq!(bar_count(f64::from(u32::MAX), 1.0), None);

        let err = checked_bar_count("bar_spacing_mm", 1.0e7, 0.001).unwrap_err();
        assert_eq!(err.field(), Some("bar_spacing_mm"));
    }

    #[test]
    fn test_loop_perimeter() {
        // 300 x 500 beam, 25 mm cover: 2 x (0.25 + 0.45)
        let p = loop_perimeter(300.0, 500.0, 25.0);
        assert!((p.0 - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_steel_percentage_identity() {
        let pct = steel_percentage(Kilograms(78.5), CubicMeters(1.0));
        assert!((pct - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bar_group() {
        let group = BarGroup::new(12.0, 11, Meters(1.5));
        assert_eq!(group.count, 11);
        assert!((group.total_length_m - 16.5).abs() < 1e-9);
        assert!((group.weight_kg - 144.0 / 162.0 * 16.5).abs() < 1e-9);
    }
}
