use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Locator for the audio resource
    pub uri: String,

    /// When the recording was finalized
    pub recorded_at: DateTime<Utc>,

    /// Captured duration in seconds
    pub duration_secs: f64,
}

/// Archive retention mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveMode {
    /// Every completed recording is kept, in insertion order
    KeepAll,
    /// Only the most recent recording is kept; each new one replaces it
    LatestOnly,
}

/// Ordered archive of completed recordings
#[derive(Debug)]
pub struct RecordingArchive {
    mode: ArchiveMode,
    recordings: Vec<Recording>,
}

impl RecordingArchive {
    pub fn new(mode: ArchiveMode) -> Self {
        Self {
            mode,
            recordings: Vec::new(),
        }
    }

    pub fn mode(&self) -> ArchiveMode {
        self.mode
    }

    /// Add a completed recording, applying the retention mode
    pub fn push(&mut self, recording: Recording) {
        if self.mode == ArchiveMode::LatestOnly {
            self.recordings.clear();
        }
        self.recordings.push(recording);
    }

    /// Drop all retained recordings
    pub fn clear(&mut self) {
        self.recordings.clear();
    }

    /// Most recently completed recording, if any
    pub fn latest(&self) -> Option<&Recording> {
        self.recordings.last()
    }

    pub fn contains_uri(&self, uri: &str) -> bool {
        self.recordings.iter().any(|r| r.uri == uri)
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }

    pub fn list(&self) -> Vec<Recording> {
        self.recordings.clone()
    }
}
