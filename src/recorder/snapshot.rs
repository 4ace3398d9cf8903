use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::RecorderState;

/// Point-in-time view of the recorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderSnapshot {
    /// Current state of the recording state machine
    pub state: RecorderState,

    /// Whether capture is currently active
    pub is_recording: bool,

    /// When the active session started, if one exists
    pub started_at: Option<DateTime<Utc>>,

    /// Elapsed seconds since the active session started
    pub duration_secs: f64,

    /// Number of recordings currently retained in the archive
    pub recordings_count: usize,

    /// Locator of the most recently completed recording
    pub latest_uri: Option<String>,
}
