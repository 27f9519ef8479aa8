//! Device kinds, capture constraints, and stream handles

use crate::error::MediaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of capture device the flow can acquire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Audio input
    Microphone,
    /// Video input
    Camera,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Microphone => write!(f, "microphone"),
            DeviceKind::Camera => write!(f, "camera"),
        }
    }
}

/// Which way a camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front-facing (selfie) camera
    User,
    /// Rear camera
    Environment,
}

impl Default for FacingMode {
    fn default() -> Self {
        FacingMode::User
    }
}

/// Video capture constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConstraints {
    /// Requested frame width in pixels
    pub width: u32,
    /// Requested frame height in pixels
    pub height: u32,
    /// Requested camera facing
    pub facing_mode: FacingMode,
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            facing_mode: FacingMode::default(),
        }
    }
}

/// Full constraint set passed to the device provider.
///
/// Mirrors the recognized `getUserMedia` configuration:
/// `{ video: { width, height, facingMode }, audio: bool }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConstraints {
    /// Request an audio track
    pub audio: bool,
    /// Request a video track with these parameters
    pub video: Option<VideoConstraints>,
}

impl MediaConstraints {
    /// Microphone-only request
    pub fn audio_only() -> Self {
        Self {
            audio: true,
            video: None,
        }
    }

    /// Camera request with the given video parameters
    pub fn camera(video: VideoConstraints) -> Self {
        Self {
            audio: false,
            video: Some(video),
        }
    }

    /// Camera request with default video parameters
    pub fn camera_default() -> Self {
        Self::camera(VideoConstraints::default())
    }

    /// Check the constraints cover the requested device kind
    pub fn validate(&self, kind: DeviceKind) -> Result<(), MediaError> {
        match kind {
            DeviceKind::Microphone if !self.audio => Err(MediaError::InvalidConstraints {
                message: "Microphone request without audio constraint".to_string(),
            }),
            DeviceKind::Camera if self.video.is_none() => Err(MediaError::InvalidConstraints {
                message: "Camera request without video constraints".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// A single capture track within a stream
#[derive(Debug, Clone)]
pub struct MediaTrack {
    id: Uuid,
    kind: DeviceKind,
    stopped: bool,
}

impl MediaTrack {
    /// Create a live track
    pub fn new(kind: DeviceKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            stopped: false,
        }
    }

    /// Track identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Device kind the track captures from
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Stop the track. Idempotent.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Whether the track is still capturing
    pub fn is_live(&self) -> bool {
        !self.stopped
    }
}

/// A live capture session for one device kind.
///
/// Owned exclusively by the permission broker; at most one active handle per
/// device kind exists at a time. Stopping the tracks turns the hardware
/// indicator off, so every handle must be stopped before being dropped or
/// replaced.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    id: Uuid,
    kind: DeviceKind,
    tracks: Vec<MediaTrack>,
}

impl StreamHandle {
    /// Create a live handle with the given number of tracks
    pub fn new(kind: DeviceKind, track_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            tracks: (0..track_count.max(1)).map(|_| MediaTrack::new(kind)).collect(),
        }
    }

    /// Stream identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Device kind the stream captures from
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// The stream's tracks
    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// Stop all tracks. Idempotent.
    pub fn stop(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
    }

    /// Whether any track is still capturing
    pub fn is_active(&self) -> bool {
        self.tracks.iter().any(MediaTrack::is_live)
    }
}
