//! Error types for the absence mock generator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every misuse the generator rejects.

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for the absence mock generator.
///
/// # Example
///
/// ```
/// use absence_mocks::error::MockError;
///
/// let error = MockError::ConfigNotFound {
///     path: "/missing/absence_mocks.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/absence_mocks.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum MockError {
    /// The requested date window ends before it starts.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// The lower bound of the window.
        from: NaiveDateTime,
        /// The upper bound of the window.
        to: NaiveDateTime,
    },

    /// The duplicate allowance for random dates must be at least one.
    #[error("max_duplicates must be at least 1")]
    InvalidMaxDuplicates,

    /// The batch is too large to draw its raw dates.
    #[error("Cannot generate {count} absences: count is too large")]
    CountTooLarge {
        /// The requested number of absences.
        count: usize,
    },

    /// Pairing needs an even number of dates.
    #[error("Cannot pair an odd number of dates ({count})")]
    OddDateCount {
        /// The number of dates that were supplied.
        count: usize,
    },

    /// A configured probability is outside `[0, 1]`.
    #[error("Probability '{name}' must be between 0 and 1, got {value}")]
    InvalidProbability {
        /// The configuration key.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A configured range is empty or outside what the setting allows.
    #[error("Invalid range '{name}': {min}..={max}")]
    InvalidRange {
        /// The configuration key.
        name: String,
        /// The configured minimum.
        min: f64,
        /// The configured maximum.
        max: f64,
    },

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

    /// A generated absence breaks one of the model invariants.
    #[error("Absence {id} violates an invariant: {message}")]
    InvariantViolation {
        /// The id of the offending absence.
        id: u64,
        /// A description of the broken invariant.
        message: String,
    },
}

/// A type alias for Results that return MockError.
pub type MockResult<T> = Result<T, MockError>;
