//! Error types
//!
//! The simulation itself never fails; these guard its inputs (viewport
//! geometry, pointer targets, tuning files) so bad numbers never reach it.

/// Rejected geometry input (resize dimensions, pointer targets)
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// NaN or infinite coordinate
    #[error("{what} is not finite")]
    NonFinite { what: &'static str },

    /// Zero or negative extent
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },
}

/// Settings loading/validation errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Value out of range
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Reject non-finite values
pub(crate) fn ensure_finite(what: &'static str, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::NonFinite { what })
    }
}

/// Reject non-finite or non-positive values
pub(crate) fn ensure_positive(what: &'static str, value: f32) -> Result<f32, GeometryError> {
    let value = ensure_finite(what, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositive { what, value })
    }
}
