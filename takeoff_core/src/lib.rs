//! # takeoff_core - Reinforced Concrete Quantity Estimation
//!
//! `takeoff_core` turns element dimensions and reinforcement details into the
//! quantities an estimator orders: concrete volume in cubic meters and
//! reinforcing steel in kilograms. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Validated**: Bad input is a structured error, never a `NaN` result
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::calculations::beam::{calculate, BeamInput};
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
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("steel_percentage"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Beam, column, footing and slab calculators
//! - [`rebar`] - Bar unit weight, bar counts, steel percentage
//! - [`units`] - Type-safe unit wrappers
//! - [`form`] - Explicit parsing of raw form text into calculator inputs
//! - [`report`] - Plain-text result rendering
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod form;
pub mod rebar;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput, CalculatorKind};
pub use errors::{CalcError, CalcResult};
pub use form::{FormValues, FromForm};
pub use rebar::{BarGroup, QuantitySummary};
