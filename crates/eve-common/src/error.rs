//! Error types for the EVE data clients.

use thiserror::Error;

/// Result type alias using EveError.
pub type EveResult<T> = Result<T, EveError>;

/// Primary error type for discovery and parsing operations.
#[derive(Debug, Error)]
pub enum EveError {
    // === Time Errors ===
    #[error("Invalid time specification: {0}")]
    InvalidTime(String),

    #[error("Invalid time range: start {start} is after end {end}")]
    InvalidTimeRange { start: String, end: String },

    // === Pattern Errors ===
    #[error("URL pattern field '{field}' has no bound value")]
    UnboundField { field: String },

    #[error("Unsupported date token '%{0}' in URL pattern")]
    UnsupportedToken(char),

    #[error("Invalid URL pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Pattern '{pattern}' does not fit {granularity} granularity")]
    GranularityMismatch { pattern: String, granularity: String },

    #[error("Client variant '{0}' has no product path")]
    MissingProductPath(String),

    #[error("URL does not follow pattern '{pattern}': {url}")]
    PatternMismatch { pattern: String, url: String },

    // === Query Errors ===
    #[error("Query has no time term")]
    MissingTimeTerm,

    // === Data Errors ===
    #[error("Unknown file format: {0}")]
    UnknownFormat(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed data at line {line}: {message}")]
    MalformedData { line: usize, message: String },

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EveError {
    /// Build a pattern mismatch error.
    pub fn pattern_mismatch(pattern: impl Into<String>, url: impl Into<String>) -> Self {
        EveError::PatternMismatch {
            pattern: pattern.into(),
            url: url.into(),
        }
    }

    /// Build a malformed data error for a 1-based line number.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        EveError::MalformedData {
            line,
            message: message.into(),
        }
    }

    /// Whether retrying the same operation could succeed.
    ///
    /// Nothing in the discovery core is transient; network retries live in
    /// the fetch layer.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Whether the error points at a bad client definition rather than bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EveError::UnboundField { .. }
                | EveError::UnsupportedToken(_)
                | EveError::InvalidPattern { .. }
                | EveError::GranularityMismatch { .. }
                | EveError::MissingProductPath(_)
                | EveError::Config(_)
        )
    }
}
