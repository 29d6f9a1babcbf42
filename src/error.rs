//! Error types for the work report aggregation engine.
//!
//! Malformed report records never surface here: they degrade to zero
//! contributions inside the engine. These errors cover the failures that
//! abort an aggregation wholesale.

use thiserror::Error;

/// The main error type for the aggregation engine.
///
/// # Example
///
/// ```
/// use work_report_engine::error::EngineError;
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

    /// Configuration parsed but holds inconsistent values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// The billing period offset moved outside the representable date range.
    #[error("Billing period offset {offset} is out of range")]
    InvalidPeriodOffset {
        /// The offending offset in months.
        offset: i32,
    },

    /// The external report store could not supply records.
    #[error("Record store unavailable: {message}")]
    RecordStoreUnavailable {
        /// A description of the upstream failure.
        message: String,
    },

    /// No collator could be built for the configured locale.
    #[error("Collation unavailable for locale '{locale}': {message}")]
    CollationUnavailable {
        /// The requested locale tag.
        locale: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
