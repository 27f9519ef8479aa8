//! Permission broker
//!
//! Mediates all camera and microphone acquisition for the setup flow. The
//! broker owns at most one active stream per device kind; any previously
//! held handle is stopped before a new one is stored, and everything is
//! stopped when the broker closes. That is a correctness requirement, not a
//! performance nicety: a leaked handle leaves the hardware indicator on.

use crate::devices::{DeviceKind, MediaConstraints, StreamHandle};
use crate::error::MediaError;
use crate::preview::PreviewSurface;
use crate::provider::DeviceProvider;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Events emitted as permission state changes
#[derive(Debug, Clone)]
pub enum BrokerEvent {
    /// A device stream was acquired and the grant flag turned on
    PermissionGranted {
        /// Device that was granted
        device: DeviceKind,
    },
    /// A request failed; the grant flag is off and the message is suitable
    /// for inline display
    PermissionDenied {
        /// Device that was denied
        device: DeviceKind,
        /// Human-readable failure message
        message: String,
    },
    /// An active stream was stopped and dropped
    StreamReleased {
        /// Device whose stream was released
        device: DeviceKind,
    },
}

impl BrokerEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            BrokerEvent::PermissionGranted { .. } => "permission_granted",
            BrokerEvent::PermissionDenied { .. } => "permission_denied",
            BrokerEvent::StreamReleased { .. } => "stream_released",
        }
    }
}

#[derive(Debug, Default)]
struct DeviceSlot {
    handle: Option<StreamHandle>,
    granted: bool,
    pending: bool,
    last_error: Option<String>,
}

/// Mediates acquisition and release of camera and microphone streams.
///
/// Requests for one device kind are serialized: a second request while one
/// is in flight is rejected with [`MediaError::RequestPending`], matching
/// the UI disabling the triggering control.
pub struct PermissionBroker {
    provider: Arc<dyn DeviceProvider>,
    microphone: Mutex<DeviceSlot>,
    camera: Mutex<DeviceSlot>,
    closed: AtomicBool,
    event_tx: broadcast::Sender<BrokerEvent>,
}

impl PermissionBroker {
    /// Create a broker over the given device provider
    pub fn new(provider: Arc<dyn DeviceProvider>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            provider,
            microphone: Mutex::new(DeviceSlot::default()),
            camera: Mutex::new(DeviceSlot::default()),
            closed: AtomicBool::new(false),
            event_tx,
        }
    }

    fn slot(&self, kind: DeviceKind) -> &Mutex<DeviceSlot> {
        match kind {
            DeviceKind::Microphone => &self.microphone,
            DeviceKind::Camera => &self.camera,
        }
    }

    fn default_constraints(kind: DeviceKind) -> MediaConstraints {
        match kind {
            DeviceKind::Microphone => MediaConstraints::audio_only(),
            DeviceKind::Camera => MediaConstraints::camera_default(),
        }
    }

    /// Subscribe to permission events
    pub fn subscribe(&self) -> broadcast::Receiver<BrokerEvent> {
        self.event_tx.subscribe()
    }

    /// Request microphone access with default constraints
    pub async fn request_audio(&self) -> Result<(), MediaError> {
        self.request(DeviceKind::Microphone).await
    }

    /// Request camera access with default constraints
    pub async fn request_camera(&self) -> Result<(), MediaError> {
        self.request(DeviceKind::Camera).await
    }

    /// Request a device with default constraints for its kind
    pub async fn request(&self, kind: DeviceKind) -> Result<(), MediaError> {
        self.request_with(kind, Self::default_constraints(kind))
            .await
    }

    /// Request a device with explicit constraints.
    ///
    /// On success the previous handle for the kind (if any) is stopped
    /// before the new one is stored, and the grant flag turns on. On failure
    /// the grant flag turns off and the message is kept for inline display;
    /// there is no automatic retry.
    pub async fn request_with(
        &self,
        kind: DeviceKind,
        constraints: MediaConstraints,
    ) -> Result<(), MediaError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(MediaError::BrokerClosed);
        }

        {
            let mut slot = self.slot(kind).lock();
            if slot.pending {
                return Err(MediaError::RequestPending { device: kind });
            }
            slot.pending = true;
        }

        debug!(%kind, "Requesting device stream");
        let result = self.provider.acquire(kind, &constraints).await;

        let mut slot = self.slot(kind).lock();
        slot.pending = false;

        match result {
            Ok(mut handle) => {
                if self.closed.load(Ordering::SeqCst) {
                    // The flow was torn down while the prompt was open. Stop
                    // the arriving stream immediately so the hardware light
                    // goes off.
                    handle.stop();
                    return Err(MediaError::BrokerClosed);
                }
                if let Some(mut previous) = slot.handle.take() {
                    previous.stop();
                }
                info!(%kind, stream_id = %handle.id(), "Device stream acquired");
                slot.handle = Some(handle);
                slot.granted = true;
                slot.last_error = None;
                let _ = self
                    .event_tx
                    .send(BrokerEvent::PermissionGranted { device: kind });
                Ok(())
            }
            Err(err) => {
                slot.granted = false;
                slot.last_error = Some(err.to_string());
                warn!(%kind, error = %err, "Device request failed");
                let _ = self.event_tx.send(BrokerEvent::PermissionDenied {
                    device: kind,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Stop and drop the active stream for a kind, turning its grant flag
    /// off. Idempotent: a no-op when no stream is active.
    pub fn release(&self, kind: DeviceKind) {
        let mut slot = self.slot(kind).lock();
        slot.granted = false;
        if let Some(mut handle) = slot.handle.take() {
            handle.stop();
            debug!(%kind, "Device stream released");
            let _ = self
                .event_tx
                .send(BrokerEvent::StreamReleased { device: kind });
        }
    }

    /// Release both device kinds
    pub fn release_all(&self) {
        self.release(DeviceKind::Microphone);
        self.release(DeviceKind::Camera);
    }

    /// Release if currently granted, request otherwise. Returns the grant
    /// state after the toggle.
    pub async fn toggle(&self, kind: DeviceKind) -> Result<bool, MediaError> {
        if self.granted(kind) {
            self.release(kind);
            Ok(false)
        } else {
            self.request(kind).await?;
            Ok(true)
        }
    }

    /// Last-known grant state for a kind
    pub fn granted(&self, kind: DeviceKind) -> bool {
        self.slot(kind).lock().granted
    }

    /// Last-known microphone grant state
    pub fn audio_granted(&self) -> bool {
        self.granted(DeviceKind::Microphone)
    }

    /// Last-known camera grant state
    pub fn camera_granted(&self) -> bool {
        self.granted(DeviceKind::Camera)
    }

    /// Message from the most recent failed request for a kind
    pub fn last_error(&self, kind: DeviceKind) -> Option<String> {
        self.slot(kind).lock().last_error.clone()
    }

    /// Whether a request for the kind is currently in flight
    pub fn is_pending(&self, kind: DeviceKind) -> bool {
        self.slot(kind).lock().pending
    }

    /// Identifier of the active stream for a kind, if one is held
    pub fn active_stream_id(&self, kind: DeviceKind) -> Option<Uuid> {
        self.slot(kind)
            .lock()
            .handle
            .as_ref()
            .filter(|handle| handle.is_active())
            .map(StreamHandle::id)
    }

    /// Whether a live stream is held for the kind
    pub fn has_active_stream(&self, kind: DeviceKind) -> bool {
        self.active_stream_id(kind).is_some()
    }

    /// Bind the current stream state for a kind to a preview surface. The
    /// surface shows a placeholder when no live stream is held, so callers
    /// can pair every release with a rebind.
    pub fn bind_preview(&self, kind: DeviceKind, surface: &mut PreviewSurface) {
        let slot = self.slot(kind).lock();
        surface.attach(slot.handle.as_ref());
    }

    /// Close the broker and release everything it holds.
    ///
    /// A request resolving after close stops the arriving stream instead of
    /// storing it; further requests fail with [`MediaError::BrokerClosed`].
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("Permission broker closed");
        self.release_all();
    }

    /// Whether the broker has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Drop for PermissionBroker {
    fn drop(&mut self) {
        // Close is idempotent; this only matters when the owner never
        // called close itself.
        self.close();
    }
}
