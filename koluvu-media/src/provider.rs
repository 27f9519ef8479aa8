//! Device provider capability
//!
//! Acquiring a device is the only operation in the setup flow with a side
//! effect outside the component tree (the OS permission prompt and the
//! hardware indicator). It sits behind an async trait so the broker can be
//! tested with a scripted provider instead of a real browser or OS backend.

use crate::devices::{DeviceKind, MediaConstraints, StreamHandle};
use crate::error::MediaError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;

/// Async capability for acquiring capture devices.
///
/// The embedding shell supplies the real implementation; the returned handle
/// is live until its tracks are stopped.
#[async_trait]
pub trait DeviceProvider: Send + Sync {
    /// Request a capture stream for the given device kind.
    ///
    /// Awaits the platform's permission prompt and device initialization.
    /// Denial and missing hardware are errors, not panics; the broker
    /// decides how the flow reacts.
    async fn acquire(
        &self,
        kind: DeviceKind,
        constraints: &MediaConstraints,
    ) -> Result<StreamHandle, MediaError>;
}

/// Scripted outcome for one device kind on the mock provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    /// Acquisition succeeds with a live stream
    Grant,
    /// User denies the permission prompt
    Deny,
    /// No such hardware is present
    Unavailable,
}

/// Scripted device provider for tests and headless runs.
///
/// Grants everything by default; outcomes can be changed per kind at any
/// time. Counts acquisitions so tests can assert that streams are not leaked.
#[derive(Debug)]
pub struct MockDeviceProvider {
    outcomes: RwLock<HashMap<DeviceKind, MockOutcome>>,
    acquisitions: RwLock<HashMap<DeviceKind, u32>>,
    latency: Option<Duration>,
}

impl Default for MockDeviceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDeviceProvider {
    /// Provider that grants every request immediately
    pub fn new() -> Self {
        Self {
            outcomes: RwLock::new(HashMap::new()),
            acquisitions: RwLock::new(HashMap::new()),
            latency: None,
        }
    }

    /// Add artificial latency before each outcome resolves, to exercise
    /// in-flight request handling
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Script the outcome for a device kind
    pub fn set_outcome(&self, kind: DeviceKind, outcome: MockOutcome) {
        self.outcomes.write().insert(kind, outcome);
    }

    /// Script a denial for a device kind
    pub fn deny(&self, kind: DeviceKind) {
        self.set_outcome(kind, MockOutcome::Deny);
    }

    /// Script missing hardware for a device kind
    pub fn unavailable(&self, kind: DeviceKind) {
        self.set_outcome(kind, MockOutcome::Unavailable);
    }

    /// How many acquisitions succeeded for a device kind
    pub fn acquisition_count(&self, kind: DeviceKind) -> u32 {
        self.acquisitions.read().get(&kind).copied().unwrap_or(0)
    }
}

#[async_trait]
impl DeviceProvider for MockDeviceProvider {
    async fn acquire(
        &self,
        kind: DeviceKind,
        constraints: &MediaConstraints,
    ) -> Result<StreamHandle, MediaError> {
        constraints.validate(kind)?;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let outcome = self
            .outcomes
            .read()
            .get(&kind)
            .copied()
            .unwrap_or(MockOutcome::Grant);

        match outcome {
            MockOutcome::Grant => {
                *self.acquisitions.write().entry(kind).or_insert(0) += 1;
                Ok(StreamHandle::new(kind, 1))
            }
            MockOutcome::Deny => Err(MediaError::PermissionDenied { device: kind }),
            MockOutcome::Unavailable => Err(MediaError::DeviceUnavailable { device: kind }),
        }
    }
}
