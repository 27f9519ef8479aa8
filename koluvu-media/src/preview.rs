//! Device preview surface
//!
//! Binds a live stream to an on-screen preview slot. The surface only keeps
//! the stream's identity, never the tracks, and it must be detached whenever
//! the associated stream is released so it never points at stopped tracks.
//! The broker's `bind_preview` keeps that pairing for callers.

use crate::devices::{DeviceKind, StreamHandle};
use tracing::debug;
use uuid::Uuid;

/// Identity of the stream a surface is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSource {
    /// Stream identifier
    pub stream_id: Uuid,
    /// Device kind the stream captures from
    pub kind: DeviceKind,
}

/// An on-screen preview slot. Shows a placeholder until a live stream is
/// attached.
#[derive(Debug, Clone, Default)]
pub struct PreviewSurface {
    source: Option<PreviewSource>,
}

impl PreviewSurface {
    /// Create a surface showing the placeholder
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a stream to the surface. Passing `None` or a stream whose
    /// tracks are stopped reverts the surface to the placeholder.
    pub fn attach(&mut self, stream: Option<&StreamHandle>) {
        match stream {
            Some(handle) if handle.is_active() => {
                debug!(stream_id = %handle.id(), kind = %handle.kind(), "Preview attached");
                self.source = Some(PreviewSource {
                    stream_id: handle.id(),
                    kind: handle.kind(),
                });
            }
            _ => self.detach(),
        }
    }

    /// Clear the surface's source. Idempotent.
    pub fn detach(&mut self) {
        if self.source.take().is_some() {
            debug!("Preview detached");
        }
    }

    /// The stream currently shown, if any
    pub fn source(&self) -> Option<&PreviewSource> {
        self.source.as_ref()
    }

    /// Whether the surface is showing the placeholder
    pub fn is_placeholder(&self) -> bool {
        self.source.is_none()
    }
}
