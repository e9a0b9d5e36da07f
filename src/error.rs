//! Error types for the bomd crate.

use thiserror::Error;

/// Main error type for bomd operations.
#[derive(Debug, Error)]
#[allow(missing_docs)] // Error variant fields are self-documenting via #[error] attribute
pub enum BomdError {
    /// Malformed input file section, parameter, or cross-field violation.
    #[error("Input error: {0}")]
    Input(String),

    /// The electronic structure program failed or its log could not be parsed.
    #[error("Electronic structure program failure ({log_path}): {reason}")]
    EspFailure { log_path: String, reason: String },

    /// The integrator was invoked on a state missing its preconditions.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Atomic data lookup miss for an element symbol or atomic number.
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bomd operations.
pub type Result<T> = std::result::Result<T, BomdError>;

impl BomdError {
    /// Shorthand for an [`BomdError::Input`] with a formatted message.
    pub fn input(msg: impl Into<String>) -> Self {
        BomdError::Input(msg.into())
    }

    /// Shorthand for an [`BomdError::InvalidState`] with a formatted message.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        BomdError::InvalidState(msg.into())
    }
}

/// Check that a value is positive.
#[inline]
pub fn check_positive(value: f64, name: &str) -> Result<()> {
    if value <= 0.0 {
        return Err(BomdError::invalid_state(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}
