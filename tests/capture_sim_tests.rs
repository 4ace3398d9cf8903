// Tests for the simulated capture backend
//
// These verify the platform-facing contract: permission and session-mode
// preconditions, pause accounting, interruption delivery, and that a
// finalized capture really lands on disk as WAV.

use std::time::Duration;

use tempfile::TempDir;
use voicenote::{
    AudioSessionMode, CaptureBackend, CaptureStatus, Permission, QualityPreset, SimCaptureConfig,
    SimulatedCapture,
};

fn new_backend() -> (SimulatedCapture, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let backend = SimulatedCapture::new(SimCaptureConfig {
        output_dir: dir.path().to_path_buf(),
    });
    (backend, dir)
}

#[tokio::test]
async fn test_permission_flag() {
    let (backend, _dir) = new_backend();

    assert_eq!(
        backend.request_permission().await.unwrap(),
        Permission::Granted
    );

    backend.set_permission(false);
    assert_eq!(
        backend.request_permission().await.unwrap(),
        Permission::Denied
    );
}

#[tokio::test]
async fn test_create_requires_record_mode() {
    let (backend, _dir) = new_backend();

    // Fresh backend sits in playback-only mode
    assert_eq!(
        backend.session_mode().await,
        AudioSessionMode::PlaybackOnly
    );
    assert!(backend.create_capture(QualityPreset::Low).await.is_err());

    backend
        .configure_session(AudioSessionMode::RecordAndPlayback)
        .await
        .unwrap();

    let setup = backend.create_capture(QualityPreset::Low).await.unwrap();
    assert_eq!(backend.captures_created(), 1);

    setup.handle.finalize().await.unwrap();
}

#[tokio::test]
async fn test_create_requires_permission() {
    let (backend, _dir) = new_backend();

    backend
        .configure_session(AudioSessionMode::RecordAndPlayback)
        .await
        .unwrap();

    backend.set_permission(false);
    assert!(backend.create_capture(QualityPreset::Low).await.is_err());
    assert_eq!(backend.captures_created(), 0);
}

#[tokio::test]
async fn test_finalize_writes_wav_at_preset() {
    let (backend, dir) = new_backend();

    backend
        .configure_session(AudioSessionMode::RecordAndPlayback)
        .await
        .unwrap();

    let setup = backend.create_capture(QualityPreset::High).await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;

    let finalized = setup.handle.finalize().await.unwrap();
    assert!(finalized.duration >= Duration::from_millis(50));

    let reader = hound::WavReader::open(&finalized.uri).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.bits_per_sample, 16);
    assert!(reader.len() > 0, "finalized capture should contain samples");

    // The file lives under the configured recordings directory
    assert!(finalized.uri.starts_with(&dir.path().display().to_string()));
}

#[tokio::test]
async fn test_pause_excludes_suspended_time() {
    let (backend, _dir) = new_backend();

    backend
        .configure_session(AudioSessionMode::RecordAndPlayback)
        .await
        .unwrap();

    let mut setup = backend.create_capture(QualityPreset::Low).await.unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    setup.handle.pause().await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    setup.handle.resume().await.unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    let finalized = setup.handle.finalize().await.unwrap();

    assert!(
        finalized.duration >= Duration::from_millis(200),
        "both recorded segments count: {:?}",
        finalized.duration
    );
    assert!(
        finalized.duration < Duration::from_millis(500),
        "paused time must not count: {:?}",
        finalized.duration
    );
}

#[tokio::test]
async fn test_interrupt_without_capture() {
    let (backend, _dir) = new_backend();
    assert!(!backend.interrupt().await);
}

#[tokio::test]
async fn test_interrupt_delivers_status_and_stops_capture() {
    let (backend, _dir) = new_backend();

    backend
        .configure_session(AudioSessionMode::RecordAndPlayback)
        .await
        .unwrap();

    let mut setup = backend.create_capture(QualityPreset::Low).await.unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(backend.interrupt().await);

    let status = setup.status_rx.recv().await.expect("status expected");
    assert!(!status.is_recording);
    assert!(status.can_record);
    assert!(status.duration_ms >= 20);

    // The interrupted capture cannot resume, but it still finalizes so
    // the partial recording survives
    assert!(setup.handle.resume().await.is_err());

    let finalized = setup.handle.finalize().await.unwrap();
    assert!(std::path::Path::new(&finalized.uri).exists());
}

#[tokio::test]
async fn test_send_status_passes_through() {
    let (backend, _dir) = new_backend();

    backend
        .configure_session(AudioSessionMode::RecordAndPlayback)
        .await
        .unwrap();

    let mut setup = backend.create_capture(QualityPreset::Low).await.unwrap();

    let injected = CaptureStatus {
        is_recording: true,
        can_record: true,
        duration_ms: 1234,
    };
    backend.send_status(injected).await.unwrap();

    let received = setup.status_rx.recv().await.expect("status expected");
    assert_eq!(received, injected);

    setup.handle.finalize().await.unwrap();

    assert!(
        backend.send_status(injected).await.is_err(),
        "no active capture after finalize"
    );
}
