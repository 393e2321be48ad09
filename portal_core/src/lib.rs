//! # portal_core - Engineering Portal Engine
//!
//! `portal_core` is the computational heart of the CGM Engineering Portal:
//! the formula library behind the electrical, mechanical, RF and thermal
//! calculators, the BOM lifecycle lookup, and the localization tables. All
//! inputs and outputs are JSON-serializable so any shell (CLI, web, desktop)
//! can drive them.
//!
//! ## Design Philosophy
//!
//! - **Stateless calculators**: pure functions from input to result
//! - **Total lookups**: unknown parts and missing translation keys resolve
//!   to a value, never an error
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use portal_core::calculations::{Calculation, VoltageDividerInput};
//!
//! let result = VoltageDividerInput { vin_v: 12.0, r1_ohm: 1000.0, r2_ohm: 2000.0 }
//!     .evaluate()
//!     .unwrap();
//! assert!((result.vout_v - 8.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Validated calculators and the formula registry
//! - [`equations`] - Raw closed-form formulas
//! - [`bom`] - BOM ingestion, lifecycle lookup, analysis session and export
//! - [`i18n`] - Message tables and text direction
//! - [`preferences`] - Persisted language preference
//! - [`shell`] - Menu, theme and language state
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic writes and schema version checks

pub mod bom;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod i18n;
pub mod preferences;
pub mod shell;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{Calculation, CalculationItem, CalculationOutput, Domain, FieldMap, Formula};
pub use errors::{PortalError, PortalResult};
pub use i18n::{translate, Locale, TextDirection};
pub use preferences::{PreferenceStore, Preferences};
pub use shell::{ShellState, Theme};
