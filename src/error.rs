//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only [`EngineError::ZeroDuration`] can be triggered by calculation inputs;
//! the remaining variants come from loading configuration or from request
//! validation performed before a calculation starts.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A payroll input field failed validation.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The withholding table rows are malformed.
    #[error("Invalid tax table row {row}: {message}")]
    InvalidTaxTable {
        /// Zero-based index of the offending row.
        row: usize,
        /// A description of the problem.
        message: String,
    },

    /// The weighted hour denominator is zero, so no hourly wage exists.
    #[error(
        "Weighted total hours is zero (standard hours {standard_hours}, weighted overtime hours {weighted_overtime_hours}); cannot derive an hourly wage"
    )]
    ZeroDuration {
        /// Monthly standard hours that entered the denominator.
        standard_hours: Decimal,
        /// Overtime hours after weighting that entered the denominator.
        weighted_overtime_hours: Decimal,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
