//! Error types for the Freelance Rate Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while deriving or adjusting rates.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Freelance Rate Engine.
///
/// The calculation functions never swallow these errors; the caller decides
/// whether to fall back, retry a lookup or surface the problem to the user.
///
/// # Example
///
/// ```
/// use freelance_rate_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// The tax percentage makes the gross-up division non-finite or negative.
    #[error("Invalid tax rate {tax_percent}%: must be below 100%")]
    InvalidTaxRate {
        /// The rejected tax percentage.
        tax_percent: Decimal,
    },

    /// The work schedule leaves no billable time in the year.
    #[error("Invalid schedule: {message}")]
    InvalidSchedule {
        /// A description of what made the schedule unusable.
        message: String,
    },

    /// An input value is outside its allowed domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The currency conversion rate is not a positive number.
    #[error("Invalid exchange rate {rate}: must be greater than zero")]
    InvalidExchangeRate {
        /// The rejected exchange rate.
        rate: Decimal,
    },

    /// The location record lacks the developer rate data needed for an adjustment.
    #[error("Missing location data for {city}, {country}: {message}")]
    MissingLocationData {
        /// The city of the incomplete record.
        city: String,
        /// The country of the incomplete record.
        country: String,
        /// Which piece of data is missing.
        message: String,
    },

    /// No location record exists for the given city and country.
    #[error("Location not found: {city}, {country}")]
    LocationNotFound {
        /// The requested city.
        city: String,
        /// The requested country.
        country: String,
    },

    /// Profession key was not found in the reference data.
    #[error("Profession not found: {key}")]
    ProfessionNotFound {
        /// The profession key that was not found.
        key: String,
    },

    /// State code was not found in the reference data.
    #[error("State not found: {code}")]
    StateNotFound {
        /// The state code that was not found.
        code: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
