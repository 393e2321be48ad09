//! # Error Types
//!
//! Structured error types for portal_core. Calculators, BOM ingestion and the
//! preference store all report through [`PortalError`] so the shell can decide
//! how to surface a failure (silently drop it, or show a transient notice).
//!
//! Two outcomes are deliberately *not* errors: a part number missing from the
//! catalog resolves to `unknown`, and a missing translation key falls back to
//! the key itself.
//!
//! ## Example
//!
//! ```rust
//! use portal_core::errors::{PortalError, PortalResult};
//!
//! fn validate_resistance(ohms: f64) -> PortalResult<()> {
//!     if ohms <= 0.0 {
//!         return Err(PortalError::InvalidInput {
//!             field: "resistance_ohm".to_string(),
//!             value: ohms.to_string(),
//!             reason: "Resistance must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for portal_core operations
pub type PortalResult<T> = Result<T, PortalError>;

/// Structured error type for portal operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PortalError {
    /// An input value is invalid (non-numeric, zero divisor, out of domain)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field or column is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// BOM file extension is not one we can ingest
    #[error("Unsupported file format: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// BOM file exceeds the ingestion size limit
    #[error("File too large: '{path}' is {size_bytes} bytes (limit {limit_bytes})")]
    FileTooLarge {
        path: String,
        size_bytes: u64,
        limit_bytes: u64,
    },

    /// A BOM row failed validation at ingestion
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// Calculation produced no usable result (non-finite intermediate, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Analysis was triggered without a selected file
    #[error("No file selected - please select a BOM file first")]
    NoFileSelected,

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON or CSV serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl PortalError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PortalError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        PortalError::MissingField {
            field: field.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        PortalError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedRow error
    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        PortalError::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        PortalError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        PortalError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Whether the shell should show this as a transient, non-blocking notice.
    ///
    /// Calculator input errors are not notices: a rejected input simply
    /// produces no result.
    pub fn is_user_notice(&self) -> bool {
        matches!(
            self,
            PortalError::NoFileSelected
                | PortalError::UnsupportedFormat { .. }
                | PortalError::FileTooLarge { .. }
                | PortalError::MalformedRow { .. }
                | PortalError::MissingField { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PortalError::InvalidInput { .. } => "INVALID_INPUT",
            PortalError::MissingField { .. } => "MISSING_FIELD",
            PortalError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            PortalError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            PortalError::MalformedRow { .. } => "MALFORMED_ROW",
            PortalError::CalculationFailed { .. } => "CALCULATION_FAILED",
            PortalError::NoFileSelected => "NO_FILE_SELECTED",
            PortalError::FileError { .. } => "FILE_ERROR",
            PortalError::SerializationError { .. } => "SERIALIZATION_ERROR",
            PortalError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<csv::Error> for PortalError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => PortalError::malformed_row(pos.line() as usize, err.to_string()),
            None => PortalError::serialization(err.to_string()),
        }
    }
}
