//! # Unit Types
//!
//! Type-safe wrappers for the handful of units a quantity takeoff needs.
//! They are plain `f64` newtypes so JSON stays clean (just numbers).
//!
//! ## SI Units
//!
//! - Input geometry and bar sizes: millimeters (mm)
//! - Bar lengths and element dimensions in formulas: meters (m)
//! - Concrete: cubic meters (m³)
//! - Steel: kilograms (kg), kilograms per meter (kg/m)
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{Meters, Millimeters};
//!
//! let length = Millimeters(4000.0);
//! let length_m: Meters = length.into();
//! assert_eq!(length_m.0, 4.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Millimeters in one meter
pub const MM_PER_M: f64 = 1000.0;

/// Convert a millimeter value to meters.
///
/// ```rust
/// assert_eq!(takeoff_core::units::to_meters(300.0), 0.3);
/// ```
pub fn to_meters(mm: f64) -> f64 {
    mm / MM_PER_M
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(to_meters(mm.0))
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * MM_PER_M)
    }
}

// ============================================================================
// Volume, Mass
// ============================================================================

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl CubicMeters {
    /// Volume of a rectangular block given its three sides in millimeters.
    pub fn of_block(a: Millimeters, b: Millimeters, c: Millimeters) -> Self {
        let (a, b, c): (Meters, Meters, Meters) = (a.into(), b.into(), c.into());
        CubicMeters(a.0 * b.0 * c.0)
    }
}

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Linear mass in kilograms per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerMeter(pub f64);

impl Mul<Meters> for KgPerMeter {
    type Output = Kilograms;
    fn mul(self, rhs: Meters) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(KgPerMeter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_m() {
        let m: Meters = Millimeters(1500.0).into();
        assert_eq!(m.0, 1.5);
        let back: Millimeters = m.into();
        assert_eq!(back.0, 1500.0);
    }

    #[test]
    fn test_block_volume() {
        let v = CubicMeters::of_block(Millimeters(4000.0), Millimeters(300.0), Millimeters(500.0));
        assert!((v.0 - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_linear_mass_times_length() {
        let w = KgPerMeter(2.0) * Meters(3.5);
        assert_eq!(w, Kilograms(7.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilograms(10.0);
        let b = Kilograms(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let v = CubicMeters(0.9);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "0.9");
    }
}
