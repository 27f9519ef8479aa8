//! Integration tests for the permission broker and preview surface
//!
//! Exercises the broker against the scripted mock provider: grant/deny
//! outcomes, toggle lifecycles, in-flight request serialization, and the
//! release/detach pairing.

use koluvu_media::*;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// GRANT / DENY TESTS
// ============================================================================

#[tokio::test]
async fn test_independent_audio_and_camera_grants() {
    let provider = Arc::new(MockDeviceProvider::new());
    provider.deny(DeviceKind::Camera);
    let broker = PermissionBroker::new(provider);

    broker.request_audio().await.unwrap();
    assert!(broker.audio_granted());

    assert!(broker.request_camera().await.is_err());
    assert!(!broker.camera_granted());

    // Camera denial does not disturb the microphone grant
    assert!(broker.audio_granted());
}

#[tokio::test]
async fn test_unavailable_device_treated_like_denial() {
    let provider = Arc::new(MockDeviceProvider::new());
    provider.unavailable(DeviceKind::Camera);
    let broker = PermissionBroker::new(provider);

    let err = broker.request_camera().await.unwrap_err();
    assert!(matches!(err, MediaError::DeviceUnavailable { .. }));
    assert!(!broker.camera_granted());
    assert!(broker.last_error(DeviceKind::Camera).is_some());
}

#[tokio::test]
async fn test_denial_then_regrant() {
    let provider = Arc::new(MockDeviceProvider::new());
    provider.deny(DeviceKind::Microphone);
    let broker = PermissionBroker::new(provider.clone());

    assert!(broker.request_audio().await.is_err());

    // User flips the browser permission and retries
    provider.set_outcome(DeviceKind::Microphone, MockOutcome::Grant);
    broker.request_audio().await.unwrap();
    assert!(broker.audio_granted());
    assert!(broker.last_error(DeviceKind::Microphone).is_none());
}

// ============================================================================
// STREAM OWNERSHIP TESTS
// ============================================================================

#[tokio::test]
async fn test_toggle_on_off_on_leaves_one_stream() {
    let provider = Arc::new(MockDeviceProvider::new());
    let broker = PermissionBroker::new(provider.clone());

    assert!(broker.toggle(DeviceKind::Camera).await.unwrap());
    let first_id = broker.active_stream_id(DeviceKind::Camera).unwrap();

    assert!(!broker.toggle(DeviceKind::Camera).await.unwrap());
    assert!(!broker.has_active_stream(DeviceKind::Camera));

    assert!(broker.toggle(DeviceKind::Camera).await.unwrap());
    let second_id = broker.active_stream_id(DeviceKind::Camera).unwrap();

    // Two acquisitions happened but only one stream is held at the end
    assert_eq!(provider.acquisition_count(DeviceKind::Camera), 2);
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_repeated_request_replaces_previous_stream() {
    let provider = Arc::new(MockDeviceProvider::new());
    let broker = PermissionBroker::new(provider.clone());

    broker.request_camera().await.unwrap();
    let first_id = broker.active_stream_id(DeviceKind::Camera).unwrap();

    broker.request_camera().await.unwrap();
    let second_id = broker.active_stream_id(DeviceKind::Camera).unwrap();

    assert_ne!(first_id, second_id);
    assert_eq!(provider.acquisition_count(DeviceKind::Camera), 2);
}

#[tokio::test]
async fn test_close_releases_everything() {
    let provider = Arc::new(MockDeviceProvider::new());
    let broker = PermissionBroker::new(provider);

    broker.request_audio().await.unwrap();
    broker.request_camera().await.unwrap();

    broker.close();
    assert!(broker.is_closed());
    assert!(!broker.has_active_stream(DeviceKind::Microphone));
    assert!(!broker.has_active_stream(DeviceKind::Camera));
    assert!(!broker.audio_granted());
    assert!(!broker.camera_granted());
}

// ============================================================================
// IN-FLIGHT REQUEST TESTS
// ============================================================================

#[tokio::test]
async fn test_duplicate_in_flight_request_rejected() {
    let provider =
        Arc::new(MockDeviceProvider::new().with_latency(Duration::from_millis(50)));
    let broker = PermissionBroker::new(provider);

    let (first, second) = tokio::join!(broker.request_audio(), broker.request_audio());

    // The first request resolves; the overlapping one is rejected
    assert!(first.is_ok());
    assert_eq!(
        second.unwrap_err(),
        MediaError::RequestPending {
            device: DeviceKind::Microphone
        }
    );
    assert!(broker.audio_granted());

    // Once nothing is in flight a new request succeeds
    broker.release(DeviceKind::Microphone);
    broker.request_audio().await.unwrap();
    assert!(broker.audio_granted());
}

#[tokio::test]
async fn test_request_resolving_after_close_is_stopped() {
    let provider =
        Arc::new(MockDeviceProvider::new().with_latency(Duration::from_millis(50)));
    let broker = Arc::new(PermissionBroker::new(provider));

    let pending = {
        let broker = broker.clone();
        tokio::spawn(async move { broker.request_camera().await })
    };

    // Navigate away while the prompt is still open
    tokio::time::sleep(Duration::from_millis(10)).await;
    broker.close();

    let result = pending.await.unwrap();
    assert_eq!(result.unwrap_err(), MediaError::BrokerClosed);
    assert!(!broker.has_active_stream(DeviceKind::Camera));
    assert!(!broker.camera_granted());
}

// ============================================================================
// PREVIEW PAIRING TESTS
// ============================================================================

#[tokio::test]
async fn test_preview_follows_camera_lifecycle() {
    let provider = Arc::new(MockDeviceProvider::new());
    let broker = PermissionBroker::new(provider);
    let mut surface = PreviewSurface::new();

    // Nothing acquired yet: placeholder
    broker.bind_preview(DeviceKind::Camera, &mut surface);
    assert!(surface.is_placeholder());

    broker.request_camera().await.unwrap();
    broker.bind_preview(DeviceKind::Camera, &mut surface);
    assert!(!surface.is_placeholder());
    assert_eq!(
        surface.source().unwrap().stream_id,
        broker.active_stream_id(DeviceKind::Camera).unwrap()
    );

    // Turn the camera off: surface reverts to placeholder on rebind
    broker.release(DeviceKind::Camera);
    broker.bind_preview(DeviceKind::Camera, &mut surface);
    assert!(surface.is_placeholder());
}

#[tokio::test]
async fn test_broker_events_are_broadcast() {
    let provider = Arc::new(MockDeviceProvider::new());
    provider.deny(DeviceKind::Camera);
    let broker = PermissionBroker::new(provider);
    let mut events = broker.subscribe();

    broker.request_audio().await.unwrap();
    assert!(broker.request_camera().await.is_err());
    broker.release(DeviceKind::Microphone);

    let first = events.recv().await.unwrap();
    assert_eq!(first.event_type(), "permission_granted");
    let second = events.recv().await.unwrap();
    assert_eq!(second.event_type(), "permission_denied");
    let third = events.recv().await.unwrap();
    assert_eq!(third.event_type(), "stream_released");
}
