use anyhow::{Context, Result};
use async_nats::Client;
use tracing::info;

use crate::recorder::{Recording, RecorderState};

use super::messages::{RecordingSavedMessage, StateChangedMessage};

const STATE_SUBJECT: &str = "recorder.state";
const SAVED_SUBJECT: &str = "recorder.saved";

/// Publishes recorder events over NATS
///
/// Surfaces that render recorder state subscribe to these subjects
/// instead of sharing mutable state with the controller.
#[derive(Clone)]
pub struct EventPublisher {
    client: Client,
}

impl EventPublisher {
    /// Connect to NATS server
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    /// Publish a recorder state transition
    pub async fn publish_state_changed(
        &self,
        previous: RecorderState,
        state: RecorderState,
        reason: &str,
    ) -> Result<()> {
        let message = StateChangedMessage {
            state: state.label().to_string(),
            previous: previous.label().to_string(),
            reason: reason.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(STATE_SUBJECT.to_string(), payload.into())
            .await
            .context("Failed to publish state change")?;

        info!(
            "Published state change to {} ({} -> {}, {})",
            STATE_SUBJECT, message.previous, message.state, message.reason
        );

        Ok(())
    }

    /// Publish a completed recording
    pub async fn publish_recording_saved(&self, recording: &Recording) -> Result<()> {
        let message = RecordingSavedMessage {
            uri: recording.uri.clone(),
            duration_secs: recording.duration_secs,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(SAVED_SUBJECT.to_string(), payload.into())
            .await
            .context("Failed to publish saved recording")?;

        info!(
            "Published saved recording to {} ({}, {:.1}s)",
            SAVED_SUBJECT, message.uri, message.duration_secs
        );

        Ok(())
    }

    /// Close NATS connection
    pub async fn close(self) -> Result<()> {
        info!("Closing NATS connection");
        // async-nats handles cleanup on drop
        Ok(())
    }
}
