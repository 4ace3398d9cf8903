use serde::{Deserialize, Serialize};

/// Recorder state transition published to subscribers
#[derive(Debug, Serialize, Deserialize)]
pub struct StateChangedMessage {
    pub state: String,
    pub previous: String,
    /// What drove the transition: "user" or "interruption"
    pub reason: String,
    pub timestamp: String, // RFC3339 timestamp
}

/// Completed recording announcement
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingSavedMessage {
    pub uri: String,
    pub duration_secs: f64,
    pub timestamp: String, // RFC3339 timestamp
}
