//! Error types for the skew-T core.
//!
//! Two failure classes exist:
//! - [`DomainError`]: a formula or transform was handed an input outside its
//!   mathematically valid range. Raised at the point of violation.
//! - [`ValidationError`]: a sounding record failed its physical range check.
//!   Such records are dropped from derived arrays; the profile survives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for skew-T operations.
pub type Result<T, E = SkewTError> = std::result::Result<T, E>;

/// A formula input outside its valid domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A quantity that must be strictly positive was zero, negative or non-finite.
    #[error("{quantity} must be positive and finite, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },

    /// A quantity fell outside its permitted interval.
    #[error("{quantity} = {value} is outside ({min}, {max}]")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The closed-form expression hits a pole at this input.
    #[error("{formula} is singular at {value}")]
    Singularity { formula: &'static str, value: f64 },

    /// Saturation vapor pressure meets or exceeds the total pressure.
    #[error("pressure {pressure_mb} mb does not exceed vapor pressure {vapor_pressure_mb} mb")]
    SupersaturatedPressure {
        pressure_mb: f64,
        vapor_pressure_mb: f64,
    },

    /// A derived absolute temperature came out below 0 K.
    #[error("derived temperature {value} K is below absolute zero")]
    BelowAbsoluteZero { value: f64 },
}

/// Which field of a sounding record failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordField {
    Pressure,
    Temperature,
    Dewpoint,
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordField::Pressure => write!(f, "pressure"),
            RecordField::Temperature => write!(f, "temperature"),
            RecordField::Dewpoint => write!(f, "dewpoint"),
        }
    }
}

/// A sounding record outside the accepted physical range.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("record {index}: {field} = {value} outside ({min}, {max})")]
pub struct ValidationError {
    /// Position of the record in its profile
    pub index: usize,
    /// Offending field
    pub field: RecordField,
    /// Rejected value
    pub value: f64,
    /// Exclusive lower bound
    pub min: f64,
    /// Exclusive upper bound
    pub max: f64,
}

/// Top-level error for the crate.
#[derive(Debug, Error)]
pub enum SkewTError {
    /// Formula domain violation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Sounding record rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Diagram configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed line in a sounding file.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error while reading a sounding.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
