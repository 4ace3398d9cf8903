use anyhow::{Context, Result};
use hound::WavReader;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use super::backend::{PlaybackBackend, PlaybackHandle};

/// WAV file playback backend
pub struct WavPlayback;

impl WavPlayback {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WavPlayback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PlaybackBackend for WavPlayback {
    async fn load(&self, uri: &str) -> Result<Box<dyn PlaybackHandle>> {
        let path = Path::new(uri);
        info!("Loading audio file: {}", path.display());

        let reader = WavReader::open(path).context("Failed to open WAV file")?;

        let spec = reader.spec();
        let sample_count = reader.len() as usize;

        let duration_seconds =
            sample_count as f64 / (spec.sample_rate as f64 * spec.channels as f64);

        info!(
            "Audio file loaded: {:.1}s, {}Hz, {} channels, {} samples",
            duration_seconds, spec.sample_rate, spec.channels, sample_count
        );

        Ok(Box::new(WavPlaybackHandle {
            uri: uri.to_string(),
            duration_seconds,
            play_task: None,
        }))
    }

    fn name(&self) -> &str {
        "wav"
    }
}

/// One loaded WAV resource
struct WavPlaybackHandle {
    uri: String,
    duration_seconds: f64,
    play_task: Option<JoinHandle<()>>,
}

#[async_trait::async_trait]
impl PlaybackHandle for WavPlaybackHandle {
    async fn play(&mut self) -> Result<()> {
        // Restarting playback replaces any run still in flight.
        if let Some(task) = self.play_task.take() {
            task.abort();
        }

        info!("Playing {} ({:.1}s)", self.uri, self.duration_seconds);

        let uri = self.uri.clone();
        let duration = Duration::from_secs_f64(self.duration_seconds);

        self.play_task = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            info!("Playback finished: {}", uri);
        }));

        Ok(())
    }

    fn duration_secs(&self) -> f64 {
        self.duration_seconds
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    async fn release(mut self: Box<Self>) -> Result<()> {
        if let Some(task) = self.play_task.take() {
            task.abort();
        }

        info!("Released {}", self.uri);
        Ok(())
    }
}

impl Drop for WavPlaybackHandle {
    fn drop(&mut self) {
        if let Some(task) = self.play_task.take() {
            task.abort();
        }
    }
}
