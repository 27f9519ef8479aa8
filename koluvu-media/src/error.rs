//! Media capability error types

use crate::devices::DeviceKind;
use thiserror::Error;

/// Main error type for device acquisition and release
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// User or OS refused access to the device
    #[error("{device} access was denied")]
    PermissionDenied {
        /// Device that was denied
        device: DeviceKind,
    },

    /// No hardware of the requested kind is present.
    /// Treated like a denial by the flow; no special recovery.
    #[error("No {device} was found on this device")]
    DeviceUnavailable {
        /// Device kind that is missing
        device: DeviceKind,
    },

    /// A request for the same device kind is already in flight
    #[error("A {device} request is already in progress")]
    RequestPending {
        /// Device kind with the in-flight request
        device: DeviceKind,
    },

    /// The broker was closed; no further acquisitions are possible
    #[error("Media broker is closed")]
    BrokerClosed,

    /// Constraints do not match the requested device kind
    #[error("Invalid constraints: {message}")]
    InvalidConstraints {
        /// What was wrong with the constraints
        message: String,
    },
}

/// Result type alias for media operations
pub type MediaResult<T> = Result<T, MediaError>;

impl MediaError {
    /// Whether retrying the same operation later can succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            MediaError::PermissionDenied { .. } => true,
            MediaError::DeviceUnavailable { .. } => false,
            MediaError::RequestPending { .. } => true,
            MediaError::BrokerClosed => false,
            MediaError::InvalidConstraints { .. } => false,
        }
    }
}

impl From<MediaError> for koluvu_core::SetupError {
    fn from(err: MediaError) -> Self {
        koluvu_core::SetupError::Media {
            reason: err.to_string(),
        }
    }
}
