use serde::{Deserialize, Serialize};

/// The current state of the recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecorderState {
    /// No recording in progress
    Idle,
    /// Actively capturing audio
    Recording,
    /// Capture suspended, resumable
    Paused,
}

impl RecorderState {
    pub fn label(&self) -> &'static str {
        match self {
            RecorderState::Idle => "idle",
            RecorderState::Recording => "recording",
            RecorderState::Paused => "paused",
        }
    }
}

/// Why a recording was stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The user asked for the stop
    User,
    /// The capture subsystem reported that recording ended externally
    /// (e.g. an incoming call) while the device could still record
    Interruption,
}

impl StopReason {
    pub fn label(&self) -> &'static str {
        match self {
            StopReason::User => "user",
            StopReason::Interruption => "interruption",
        }
    }
}
