use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

use super::archive::{ArchiveMode, Recording, RecordingArchive};
use super::snapshot::RecorderSnapshot;
use super::state::{RecorderState, StopReason};
use crate::capture::{AudioSessionMode, CaptureBackend, CaptureHandle, CaptureStatus, Permission, QualityPreset};
use crate::events::EventPublisher;
use crate::playback::{PlaybackBackend, PlaybackHandle};

/// The recorder state machine
///
/// Owns the active capture, the archive of completed recordings and the
/// single playback slot. Reacts to user commands (start, pause, stop,
/// play) and to status notifications from the capture subsystem; when a
/// status reports that capture ended externally while the device could
/// still record, the controller finalizes the session itself so the
/// partial recording is kept.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct RecorderController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    /// Capture capability
    capture: Arc<dyn CaptureBackend>,

    /// Playback capability
    playback: Arc<dyn PlaybackBackend>,

    /// Quality preset for new captures
    preset: QualityPreset,

    /// State machine plus the active session slot
    machine: Mutex<Machine>,

    /// Completed recordings
    archive: Mutex<RecordingArchive>,

    /// The currently loaded playback handle, at most one
    player: Mutex<Option<Box<dyn PlaybackHandle>>>,

    /// Optional event publisher for state-change subscribers
    events: Option<EventPublisher>,
}

struct Machine {
    state: RecorderState,
    session: Option<ActiveSession>,
}

/// One in-progress recording attempt, from start to stop
struct ActiveSession {
    handle: Box<dyn CaptureHandle>,
    started_at: DateTime<Utc>,
    /// Whether the capture resource can still resume
    resumable: bool,
}

impl RecorderController {
    pub fn new(
        capture: Arc<dyn CaptureBackend>,
        playback: Arc<dyn PlaybackBackend>,
        preset: QualityPreset,
        archive_mode: ArchiveMode,
        events: Option<EventPublisher>,
    ) -> Self {
        info!(
            "Recorder controller created (capture={}, playback={})",
            capture.name(),
            playback.name()
        );

        Self {
            inner: Arc::new(ControllerInner {
                capture,
                playback,
                preset,
                machine: Mutex::new(Machine {
                    state: RecorderState::Idle,
                    session: None,
                }),
                archive: Mutex::new(RecordingArchive::new(archive_mode)),
                player: Mutex::new(None),
                events,
            }),
        }
    }

    /// Start recording, or resume a paused session
    ///
    /// Permission denial and platform failures are logged and leave the
    /// state unchanged; the caller sees the unchanged snapshot and can
    /// retry.
    pub async fn start(&self) -> Result<RecorderSnapshot> {
        {
            let mut machine = self.inner.machine.lock().await;

            match machine.state {
                RecorderState::Recording => {
                    warn!("Recording already started");
                }
                RecorderState::Paused => {
                    self.resume_session(&mut machine).await?;
                }
                RecorderState::Idle => {
                    if let Err(e) = self.begin_session(&mut machine).await {
                        error!("Failed to start recording: {:#}", e);
                    }
                }
            }
        }

        Ok(self.snapshot().await)
    }

    /// Suspend the active capture without finalizing it
    pub async fn pause(&self) -> Result<RecorderSnapshot> {
        {
            let mut machine = self.inner.machine.lock().await;

            if machine.state != RecorderState::Recording {
                warn!("Not recording, nothing to pause");
            } else {
                let session = machine
                    .session
                    .as_mut()
                    .context("Recording state without an active capture")?;

                match session.handle.pause().await {
                    Ok(()) => {
                        machine.state = RecorderState::Paused;
                        info!("Recording paused");
                        self.publish_state(RecorderState::Recording, RecorderState::Paused, "user")
                            .await;
                    }
                    Err(e) => error!("Failed to pause recording: {:#}", e),
                }
            }
        }

        Ok(self.snapshot().await)
    }

    /// Finalize the active recording and archive the result
    ///
    /// Safe to call with no active session; the duplicate call becomes a
    /// no-op, which is what resolves a user stop racing the automatic
    /// interruption stop.
    pub async fn stop(&self) -> Result<RecorderSnapshot> {
        self.stop_with_reason(StopReason::User).await
    }

    async fn stop_with_reason(&self, reason: StopReason) -> Result<RecorderSnapshot> {
        // Take the session out of its slot before awaiting any platform
        // call; a second stop arriving while this one is finalizing then
        // observes an empty slot.
        let taken = {
            let mut machine = self.inner.machine.lock().await;

            machine.session.take().map(|session| {
                let previous = machine.state;
                machine.state = RecorderState::Idle;
                (session, previous)
            })
        };

        let (session, previous_state) = match taken {
            Some(taken) => taken,
            None => {
                warn!("No active recording to stop");
                return Ok(self.snapshot().await);
            }
        };

        info!("Stopping recording ({})", reason.label());

        let finalized = match session.handle.finalize().await {
            Ok(finalized) => finalized,
            Err(e) => {
                error!("Failed to finalize capture: {:#}", e);
                self.revert_session_mode().await;
                return Ok(self.snapshot().await);
            }
        };

        self.revert_session_mode().await;

        let recording = Recording {
            uri: finalized.uri,
            recorded_at: Utc::now(),
            duration_secs: finalized.duration.as_secs_f64(),
        };

        {
            let mut archive = self.inner.archive.lock().await;
            archive.push(recording.clone());
        }

        info!(
            "Recording stopped and stored at {} ({:.1}s)",
            recording.uri, recording.duration_secs
        );

        self.publish_state(previous_state, RecorderState::Idle, reason.label())
            .await;
        self.publish_saved(&recording).await;

        Ok(self.snapshot().await)
    }

    /// Load and play an archived recording
    ///
    /// With no `uri`, the latest recording plays. The previously loaded
    /// playback handle, if any, is released before the new one goes
    /// live, so the slot never holds two resources.
    pub async fn play(&self, uri: Option<&str>) -> Result<Recording> {
        let recording = {
            let archive = self.inner.archive.lock().await;
            match uri {
                Some(uri) => archive
                    .list()
                    .into_iter()
                    .find(|r| r.uri == uri)
                    .context("Recording is not in the archive")?,
                None => archive
                    .latest()
                    .cloned()
                    .context("No recordings available")?,
            }
        };

        let mut player = self.inner.player.lock().await;

        if let Some(previous) = player.take() {
            debug!("Releasing previous playback handle: {}", previous.uri());
            if let Err(e) = previous.release().await {
                warn!("Failed to release previous playback handle: {:#}", e);
            }
        }

        let mut handle = self
            .inner
            .playback
            .load(&recording.uri)
            .await
            .context("Failed to load recording")?;

        handle.play().await.context("Failed to start playback")?;

        *player = Some(handle);

        Ok(recording)
    }

    /// Current state, session timing and archive size
    pub async fn snapshot(&self) -> RecorderSnapshot {
        let machine = self.inner.machine.lock().await;
        let archive = self.inner.archive.lock().await;

        let started_at = machine.session.as_ref().map(|s| s.started_at);
        let duration_secs = started_at
            .map(|t| Utc::now().signed_duration_since(t).num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0);

        RecorderSnapshot {
            state: machine.state,
            is_recording: machine.state == RecorderState::Recording,
            started_at,
            duration_secs,
            recordings_count: archive.len(),
            latest_uri: archive.latest().map(|r| r.uri.clone()),
        }
    }

    /// Archived recordings, oldest first
    pub async fn recordings(&self) -> Vec<Recording> {
        self.inner.archive.lock().await.list()
    }

    /// Stop any active session and release the playback slot
    pub async fn shutdown(&self) {
        let has_session = { self.inner.machine.lock().await.session.is_some() };

        if has_session {
            if let Err(e) = self.stop_with_reason(StopReason::User).await {
                error!("Failed to stop recording during shutdown: {:#}", e);
            }
        }

        let mut player = self.inner.player.lock().await;
        if let Some(handle) = player.take() {
            if let Err(e) = handle.release().await {
                warn!("Failed to release playback handle during shutdown: {:#}", e);
            }
        }

        info!("Recorder shut down");
    }

    async fn begin_session(&self, machine: &mut Machine) -> Result<()> {
        match self
            .inner
            .capture
            .request_permission()
            .await
            .context("Permission request failed")?
        {
            Permission::Granted => {}
            Permission::Denied => {
                warn!("Microphone permission denied");
                return Ok(());
            }
        }

        self.inner
            .capture
            .configure_session(AudioSessionMode::RecordAndPlayback)
            .await
            .context("Failed to configure audio session")?;

        // In single-slot retention a fresh recording invalidates the
        // retained one before capture even begins.
        {
            let mut archive = self.inner.archive.lock().await;
            if archive.mode() == ArchiveMode::LatestOnly {
                archive.clear();
            }
        }

        let setup = self
            .inner
            .capture
            .create_capture(self.inner.preset)
            .await
            .context("Failed to create capture")?;

        machine.session = Some(ActiveSession {
            handle: setup.handle,
            started_at: Utc::now(),
            resumable: true,
        });
        machine.state = RecorderState::Recording;

        // The status listener lives until the capture's channel closes,
        // which happens when the handle is finalized.
        let controller = self.clone();
        tokio::spawn(async move {
            controller.watch_status(setup.status_rx).await;
        });

        info!("Recording started");
        self.publish_state(RecorderState::Idle, RecorderState::Recording, "user")
            .await;

        Ok(())
    }

    async fn resume_session(&self, machine: &mut Machine) -> Result<()> {
        let session = machine
            .session
            .as_mut()
            .context("Paused state without an active capture")?;

        if !session.resumable {
            error!("Capture can no longer resume, recording stays paused");
            return Ok(());
        }

        match session.handle.resume().await {
            Ok(()) => {
                machine.state = RecorderState::Recording;
                info!("Recording resumed");
                self.publish_state(RecorderState::Paused, RecorderState::Recording, "user")
                    .await;
            }
            Err(e) => error!("Failed to resume recording: {:#}", e),
        }

        Ok(())
    }

    async fn watch_status(&self, mut status_rx: mpsc::Receiver<CaptureStatus>) {
        debug!("Capture status listener started");

        while let Some(status) = status_rx.recv().await {
            self.handle_status(status).await;
        }

        debug!("Capture status listener stopped");
    }

    async fn handle_status(&self, status: CaptureStatus) {
        if status.is_recording {
            // Progress heartbeat, nothing to act on.
            return;
        }

        if !status.can_record {
            // Capture stopped and the device cannot record at all right
            // now. Deliberately left as a no-op beyond dropping the
            // resume capability.
            debug!("Capture stopped without recording capability, ignoring");

            let mut machine = self.inner.machine.lock().await;
            if let Some(session) = machine.session.as_mut() {
                session.resumable = false;
            }
            return;
        }

        // Capture ended without a user action while the device could
        // still record: an interruption (e.g. an incoming call) killed
        // it. Finalize now so the partial recording is not lost.
        let interrupted_while_recording = {
            let machine = self.inner.machine.lock().await;
            machine.state == RecorderState::Recording
        };

        if interrupted_while_recording {
            info!(
                "Capture interrupted externally at {}ms, finalizing",
                status.duration_ms
            );
            if let Err(e) = self.stop_with_reason(StopReason::Interruption).await {
                error!("Failed to finalize interrupted recording: {:#}", e);
            }
        } else {
            debug!("Ignoring interruption status outside recording state");
        }
    }

    async fn revert_session_mode(&self) {
        if let Err(e) = self
            .inner
            .capture
            .configure_session(AudioSessionMode::PlaybackOnly)
            .await
        {
            warn!("Failed to revert audio session: {:#}", e);
        }
    }

    async fn publish_state(&self, previous: RecorderState, state: RecorderState, reason: &str) {
        if let Some(events) = &self.inner.events {
            if let Err(e) = events.publish_state_changed(previous, state, reason).await {
                error!("Failed to publish state change: {:#}", e);
            }
        }
    }

    async fn publish_saved(&self, recording: &Recording) {
        if let Some(events) = &self.inner.events {
            if let Err(e) = events.publish_recording_saved(recording).await {
                error!("Failed to publish saved recording: {:#}", e);
            }
        }
    }
}
