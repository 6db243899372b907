//! Error types for Cinder

use thiserror::Error;

/// The main error type for Cinder operations.
///
/// The per-frame simulation path never produces errors; these cover
/// construction-time validation and configuration parsing only.
#[derive(Debug, Error)]
pub enum CinderError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type alias for Cinder operations
pub type Result<T> = std::result::Result<T, CinderError>;

impl From<toml::de::Error> for CinderError {
    fn from(err: toml::de::Error) -> Self {
        CinderError::TomlParseError(err.to_string())
    }
}
