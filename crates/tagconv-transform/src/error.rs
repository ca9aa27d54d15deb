//! Error types for settings validation and conversion.

use thiserror::Error;

use crate::settings::BoundKind;

/// Errors that reject a conversion run before any record is processed.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Hour offset text is not a whole number.
    #[error("hour offset must be a valid integer (e.g. -5, 0, +3), got '{value}'")]
    InvalidHourOffset { value: String },

    /// Hour offset is outside the supported range.
    #[error("hour offset {hours} is outside the supported range of -{max}..={max} hours")]
    HourOffsetOutOfRange { hours: i64, max: i32 },

    /// Range filter bound date does not parse.
    #[error("invalid {bound} date '{value}': expected DD-Mon-YYYY or YYYY-MM-DD")]
    InvalidRangeBound { bound: BoundKind, value: String },
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
