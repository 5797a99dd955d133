use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from drik operations.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum DrikError {
    /// Malformed date, time, timezone or location input.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Instant outside the ephemeris provider's supported span.
    #[error("Julian day {jd} is out of supported range ({min} to {max})")]
    OutOfRange { jd: f64, min: f64, max: f64 },

    /// Ephemeris query failed or returned an invalid result.
    #[error("Ephemeris provider error: {reason}")]
    Provider { reason: String },

    /// A required horizon or syzygy search exhausted its window.
    #[error("No {what} found in the search window")]
    NoEventFound { what: String },
}

impl DrikError {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    /// Creates an `OutOfRange` error with the standard Julian-day bounds.
    pub fn out_of_range(jd: f64) -> Self {
        Self::OutOfRange {
            jd,
            min: crate::time::JD_MIN,
            max: crate::time::JD_MAX,
        }
    }

    /// Creates a `Provider` error.
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::Provider { reason: reason.into() }
    }

    /// Creates a `NoEventFound` error for the named event.
    pub fn no_event(what: impl Into<String>) -> Self {
        Self::NoEventFound { what: what.into() }
    }
}
