//! Media capability layer for the Koluvu interview setup flow
//!
//! Device kinds and capture constraints, the async `DeviceProvider`
//! capability seam (with a scripted mock for tests), the permission broker
//! that owns all camera/microphone handles for the setup page, and the
//! preview surface binding.

#![warn(clippy::all)]

pub mod broker;
pub mod devices;
pub mod error;
pub mod preview;
pub mod provider;

pub use broker::{BrokerEvent, PermissionBroker};
pub use devices::{
    DeviceKind, FacingMode, MediaConstraints, MediaTrack, StreamHandle, VideoConstraints,
};
pub use error::{MediaError, MediaResult};
pub use preview::{PreviewSource, PreviewSurface};
pub use provider::{DeviceProvider, MockDeviceProvider, MockOutcome};
