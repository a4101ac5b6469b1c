//! Error types for the sepal object store
//!
//! Object store operations degrade to sentinels wherever the token API
//! expects one (`ObjectHandle::Invalid` on save). The errors below cover the
//! remaining paths: reads that name no readable object, adapter failures,
//! and bad label configuration.

use thiserror::Error;

use crate::model::LabelError;

/// Result type alias for sepal operations
pub type PalResult<T> = Result<T, PalError>;

/// Token API return codes produced by this layer
pub mod rv {
    pub const CKR_OK: u64 = 0x0000_0000;
    pub const CKR_GENERAL_ERROR: u64 = 0x0000_0005;
    pub const CKR_DEVICE_ERROR: u64 = 0x0000_0030;
    pub const CKR_KEY_HANDLE_INVALID: u64 = 0x0000_0060;
}

/// Top-level error type for sepal
#[derive(Error, Debug)]
pub enum PalError {
    /// The handle names no object that can be read back
    #[error("Key handle invalid: {handle}")]
    KeyHandleInvalid { handle: u64 },

    /// Secure element or adapter failure
    #[error("Secure element error: {0}")]
    Device(#[from] DeviceError),

    /// Label configuration rejected
    #[error("Label configuration error: {0}")]
    Label(#[from] LabelError),
}

impl PalError {
    /// Token API return code for this error
    pub fn return_value(&self) -> u64 {
        match self {
            PalError::KeyHandleInvalid { .. } => rv::CKR_KEY_HANDLE_INVALID,
            PalError::Device(_) => rv::CKR_DEVICE_ERROR,
            PalError::Label(_) => rv::CKR_GENERAL_ERROR,
        }
    }
}

/// Secure element adapter errors
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The adapter could not reach its backing store
    #[error("failed to open secure element: {reason}")]
    ConnectionFailed { reason: String },
}
