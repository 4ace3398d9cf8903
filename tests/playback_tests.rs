// Tests for WAV playback loading

use voicenote::{PlaybackBackend, WavPlayback};

/// Write a 16kHz mono test WAV and return its path
fn write_test_wav(dir: &std::path::Path, name: &str, samples: usize) -> String {
    let path = dir.join(name);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..samples {
        writer.write_sample((i % 128) as i16).unwrap();
    }
    writer.finalize().unwrap();

    path.display().to_string()
}

#[tokio::test]
async fn test_load_reports_duration() {
    let dir = tempfile::tempdir().unwrap();
    // 1600 samples at 16kHz mono = 100ms
    let uri = write_test_wav(dir.path(), "clip.wav", 1600);

    let backend = WavPlayback::new();
    let handle = backend.load(&uri).await.unwrap();

    assert_eq!(handle.uri(), uri);
    assert!((handle.duration_secs() - 0.1).abs() < 0.001);

    handle.release().await.unwrap();
}

#[tokio::test]
async fn test_play_then_release() {
    let dir = tempfile::tempdir().unwrap();
    let uri = write_test_wav(dir.path(), "clip.wav", 160);

    let backend = WavPlayback::new();
    let mut handle = backend.load(&uri).await.unwrap();

    handle.play().await.unwrap();

    // Release while playback is still in flight must not leak the task
    handle.release().await.unwrap();
}

#[tokio::test]
async fn test_load_missing_file_fails() {
    let backend = WavPlayback::new();
    assert!(backend.load("/no/such/file.wav").await.is_err());
}

#[tokio::test]
async fn test_load_empty_recording() {
    let dir = tempfile::tempdir().unwrap();
    let uri = write_test_wav(dir.path(), "empty.wav", 0);

    let backend = WavPlayback::new();
    let mut handle = backend.load(&uri).await.unwrap();

    assert_eq!(handle.duration_secs(), 0.0);
    handle.play().await.unwrap();
    handle.release().await.unwrap();
}
