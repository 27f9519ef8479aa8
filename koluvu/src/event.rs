//! Event system for the setup flow

use koluvu_core::{RoomRoute, SetupStep};
use koluvu_media::DeviceKind;
use tokio::sync::broadcast;
use tracing::warn;

/// Events emitted while the setup flow runs
#[derive(Debug, Clone)]
pub enum SetupEvent {
    /// The wizard moved to a different step
    StepChanged {
        /// Step before the transition
        from: SetupStep,
        /// Step after the transition
        to: SetupStep,
    },
    /// A device stream was acquired
    PermissionGranted {
        /// Device that was granted
        device: DeviceKind,
    },
    /// A device request failed
    PermissionDenied {
        /// Device that was denied
        device: DeviceKind,
        /// Human-readable message for inline display
        message: String,
    },
    /// An active device stream was stopped and dropped
    StreamReleased {
        /// Device whose stream was released
        device: DeviceKind,
    },
    /// A resume was attached to the draft
    ResumeAttached {
        /// File name of the attached resume
        file_name: String,
    },
    /// The attached resume was removed
    ResumeCleared,
    /// The wizard was submitted and the room route assembled
    Submitted {
        /// Route the flow handed off to
        route: RoomRoute,
    },
    /// The flow was torn down before completion
    TornDown,
}

impl SetupEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            SetupEvent::StepChanged { .. } => "step_changed",
            SetupEvent::PermissionGranted { .. } => "permission_granted",
            SetupEvent::PermissionDenied { .. } => "permission_denied",
            SetupEvent::StreamReleased { .. } => "stream_released",
            SetupEvent::ResumeAttached { .. } => "resume_attached",
            SetupEvent::ResumeCleared => "resume_cleared",
            SetupEvent::Submitted { .. } => "submitted",
            SetupEvent::TornDown => "torn_down",
        }
    }
}

/// Stream of setup events. Multiple streams can observe the same flow.
#[derive(Debug)]
pub struct EventStream {
    rx: broadcast::Receiver<SetupEvent>,
}

impl EventStream {
    pub(crate) fn new(rx: broadcast::Receiver<SetupEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next event. Returns `None` once the flow is gone.
    pub async fn next(&mut self) -> Option<SetupEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event stream lagged; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next event without waiting, if one is queued
    pub fn try_next(&mut self) -> Option<SetupEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event stream lagged; events dropped");
                }
                Err(_) => return None,
            }
        }
    }
}
