//! # Error Types
//!
//! Structured error types for mix_core. Every rejected operation leaves the
//! caller's state untouched, so all validation errors are recoverable: the
//! front end shows the message and lets the user try again.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::errors::{CalcError, CalcResult};
//!
//! fn validate_capacity(truck_capacity_m3: f64) -> CalcResult<()> {
//!     if truck_capacity_m3 <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "truck_capacity_m3",
//!             truck_capacity_m3.to_string(),
//!             "Truck capacity must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mix_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimating operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive dimension, capacity out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (the operation can be retried with new input)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("d1", "-5", "Dimension must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_input("d1", "0", "zero").error_code(), "INVALID_INPUT");
        let ser = CalcError::SerializationError { reason: "bad".to_string() };
        assert_eq!(ser.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_recoverable() {
        assert!(CalcError::invalid_input("d1", "0", "zero").is_recoverable());
        assert!(!CalcError::SerializationError { reason: "bad".to_string() }.is_recoverable());
    }

    #[test]
    fn test_display_message() {
        let error = CalcError::invalid_input("truck_capacity_m3", "0", "Truck capacity must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid input for 'truck_capacity_m3': 0 - Truck capacity must be positive"
        );
    }
}
