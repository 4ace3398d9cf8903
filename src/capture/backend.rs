use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

/// Result of a microphone permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform audio session mode
///
/// `RecordAndPlayback` allows capture while still playing audio in
/// silent mode; `PlaybackOnly` is the non-recording mode the session is
/// reverted to once capture finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioSessionMode {
    RecordAndPlayback,
    PlaybackOnly,
}

/// Capture quality preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    /// 44.1kHz stereo
    High,
    /// 16kHz mono
    Low,
}

impl QualityPreset {
    pub fn sample_rate(&self) -> u32 {
        match self {
            QualityPreset::High => 44100,
            QualityPreset::Low => 16000,
        }
    }

    pub fn channels(&self) -> u16 {
        match self {
            QualityPreset::High => 2,
            QualityPreset::Low => 1,
        }
    }
}

/// Status notification from the capture subsystem
///
/// Delivered at arbitrary times while a capture is live. A status with
/// `is_recording == false` and `can_record == true` means capture ended
/// without a user action (e.g. an incoming call interrupted it) while
/// the device itself could still record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureStatus {
    /// Whether the capture resource is still recording
    pub is_recording: bool,
    /// Whether the device retains recording capability
    pub can_record: bool,
    /// Duration captured so far, in milliseconds
    pub duration_ms: u64,
}

/// A live capture resource plus its status event channel
pub struct CaptureSetup {
    /// Handle to the in-progress recording
    pub handle: Box<dyn CaptureHandle>,
    /// Receives status notifications until the capture is finalized
    pub status_rx: mpsc::Receiver<CaptureStatus>,
}

/// A finalized capture: where the audio landed and how much was recorded
#[derive(Debug, Clone)]
pub struct FinalizedRecording {
    /// Locator for the produced audio resource (opaque to callers)
    pub uri: String,
    /// Total captured duration, pauses excluded
    pub duration: Duration,
}

/// Audio capture backend trait
///
/// Implementations wrap a platform's recording subsystem. The status
/// hook is modeled as a channel rather than a callback so consumers can
/// treat interruptions as ordinary events.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Ask the platform for microphone permission
    async fn request_permission(&self) -> Result<Permission>;

    /// Switch the platform audio session mode
    async fn configure_session(&self, mode: AudioSessionMode) -> Result<()>;

    /// Allocate a new capture resource and begin recording
    ///
    /// Returns the handle together with the receiver for its status
    /// notifications.
    async fn create_capture(&self, preset: QualityPreset) -> Result<CaptureSetup>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Handle to one in-progress recording
#[async_trait::async_trait]
pub trait CaptureHandle: Send {
    /// Suspend capture without finalizing it
    async fn pause(&mut self) -> Result<()>;

    /// Resume a previously paused capture
    async fn resume(&mut self) -> Result<()>;

    /// Finalize the recording and release the capture resource
    ///
    /// Consumes the handle, so a capture can only be finalized once.
    async fn finalize(self: Box<Self>) -> Result<FinalizedRecording>;
}
