//! Error types for tuning and settings construction.
//!
//! The simulation itself never fails: capacity limits are silent no-ops and
//! numeric edge cases are clamped. Only building a [`crate::Tuning`] or
//! [`crate::Settings`] from host-provided data can be rejected.

use std::fmt;

/// Reasons a tuning document is rejected
#[derive(Debug)]
pub enum TuningError {
    /// The JSON document could not be parsed or had unknown fields
    Parse(serde_json::Error),
    /// The overrides document was valid JSON but not an object
    NotAnObject,
    /// Preset name not recognised
    UnknownPreset(String),
    /// Quality preset name not recognised
    UnknownQuality(String),
    /// A constant is outside its safe operating range
    UnsafeConstant {
        /// Field name (for logging)
        name: &'static str,
        /// The value that was rejected
        value: f64,
        /// Human-readable description of the safe range
        safe_range: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {}", e),
            TuningError::NotAnObject => write!(f, "tuning overrides must be a JSON object"),
            TuningError::UnknownPreset(name) => write!(f, "unknown tuning preset '{}'", name),
            TuningError::UnknownQuality(name) => write!(f, "unknown quality preset '{}'", name),
            TuningError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "tuning constant '{}' = {} is outside the safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}
