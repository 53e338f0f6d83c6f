//! Error types for the loss estimation engine.
//!
//! This module provides a unified error type [`LossError`] that covers
//! all error conditions: invalid operating-point parameters, jointly
//! degenerate inputs, and device-library configuration problems.
//!
//! All validation happens before any formula evaluation, so the engine
//! never returns NaN or infinity silently.

use thiserror::Error;

/// Result type alias using [`LossError`].
pub type Result<T> = std::result::Result<T, LossError>;

/// Unified error type for all loss-engine operations.
#[derive(Error, Debug)]
pub enum LossError {
    // ============ Operating-Point Errors ============
    /// An input outside its valid domain (non-positive frequency,
    /// voltage, or current; modulation index or power factor outside [0, 1]).
    #[error("Invalid parameter '{field}' = {value}: {message}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        message: String,
    },

    /// Inputs that are individually valid but jointly produce a zero or
    /// negative denominator or an out-of-envelope duty ratio.
    #[error("Degenerate operating point: {message}")]
    DegenerateOperatingPoint { message: String },

    // ============ Device-Library Errors ============
    /// A device characterization table fails its own consistency checks.
    #[error("Invalid device table '{device}': {message}")]
    InvalidDeviceTable {
        device: &'static str,
        message: String,
    },

    /// Error reading a device-library file
    #[error("Failed to read device library '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a device-library JSON document
    #[error("Failed to parse device library: {source}")]
    DeviceLibraryParse {
        #[source]
        source: serde_json::Error,
    },
}

impl LossError {
    /// Create an invalid-parameter error.
    pub fn invalid_parameter(field: &'static str, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            value,
            message: message.into(),
        }
    }

    /// Create a degenerate-operating-point error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateOperatingPoint {
            message: message.into(),
        }
    }

    /// Create an invalid-device-table error.
    pub fn invalid_device_table(device: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidDeviceTable {
            device,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LossError {
    fn from(source: serde_json::Error) -> Self {
        Self::DeviceLibraryParse { source }
    }
}
