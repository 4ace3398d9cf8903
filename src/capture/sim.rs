use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::backend::{
    AudioSessionMode, CaptureBackend, CaptureHandle, CaptureSetup, CaptureStatus,
    FinalizedRecording, Permission, QualityPreset,
};

/// How many status notifications may queue before the sender waits
const STATUS_CHANNEL_CAPACITY: usize = 16;

/// Configuration for the simulated capture backend
#[derive(Debug, Clone)]
pub struct SimCaptureConfig {
    /// Directory where finalized recordings are written
    pub output_dir: PathBuf,
}

/// Simulated capture backend
///
/// Stands in for a platform recording subsystem: it honors the
/// permission and session-mode preconditions, tracks captured time
/// across pause/resume, and writes each finalized recording as a real
/// WAV file (a sine tone spanning the captured duration). Interruptions
/// can be injected with [`SimulatedCapture::interrupt`], which ends the
/// active capture and emits the same status an interrupting call would.
#[derive(Clone)]
pub struct SimulatedCapture {
    inner: Arc<SimInner>,
}

struct SimInner {
    config: SimCaptureConfig,
    permission_granted: AtomicBool,
    session_mode: Mutex<AudioSessionMode>,
    active: Mutex<Option<Arc<CaptureState>>>,
    captures_created: AtomicUsize,
}

/// State shared between a capture handle and the backend that created it
struct CaptureState {
    status_tx: mpsc::Sender<CaptureStatus>,
    clock: Mutex<CaptureClock>,
}

/// Captured-time accounting for one recording
struct CaptureClock {
    /// Start of the current recording segment; `None` while paused
    segment_start: Option<Instant>,
    /// Time recorded in completed segments
    recorded: Duration,
    /// Set once capture has ended (interrupted or finalized)
    stopped: bool,
}

impl CaptureClock {
    fn settle(&mut self) -> Duration {
        if let Some(start) = self.segment_start.take() {
            self.recorded += start.elapsed();
        }
        self.recorded
    }
}

impl SimulatedCapture {
    pub fn new(config: SimCaptureConfig) -> Self {
        Self {
            inner: Arc::new(SimInner {
                config,
                permission_granted: AtomicBool::new(true),
                session_mode: Mutex::new(AudioSessionMode::PlaybackOnly),
                active: Mutex::new(None),
                captures_created: AtomicUsize::new(0),
            }),
        }
    }

    /// Set whether permission requests will be granted
    pub fn set_permission(&self, granted: bool) {
        self.inner.permission_granted.store(granted, Ordering::SeqCst);
    }

    /// Number of capture resources allocated so far
    pub fn captures_created(&self) -> usize {
        self.inner.captures_created.load(Ordering::SeqCst)
    }

    /// End the active capture as an interrupting call would
    ///
    /// The capture stops recording and a status of `is_recording: false`,
    /// `can_record: true` is emitted on its channel. Returns `false` if
    /// no capture was live.
    pub async fn interrupt(&self) -> bool {
        let (status_tx, duration_ms) = {
            let active = self.inner.active.lock().await;
            let state = match active.as_ref() {
                Some(state) => state,
                None => {
                    warn!("No active capture to interrupt");
                    return false;
                }
            };

            let mut clock = state.clock.lock().await;
            if clock.stopped {
                warn!("Active capture is already stopped");
                return false;
            }

            let recorded = clock.settle();
            clock.stopped = true;

            (state.status_tx.clone(), recorded.as_millis() as u64)
        };

        info!("Capture interrupted after {}ms", duration_ms);

        let status = CaptureStatus {
            is_recording: false,
            can_record: true,
            duration_ms,
        };

        if let Err(e) = status_tx.send(status).await {
            warn!("Status receiver gone, interruption not delivered: {}", e);
        }

        true
    }

    /// Emit an arbitrary status notification on the active capture's channel
    pub async fn send_status(&self, status: CaptureStatus) -> Result<()> {
        let status_tx = {
            let active = self.inner.active.lock().await;
            active
                .as_ref()
                .map(|state| state.status_tx.clone())
                .context("No active capture")?
        };

        status_tx
            .send(status)
            .await
            .context("Status channel closed")?;

        Ok(())
    }

    /// Current audio session mode
    pub async fn session_mode(&self) -> AudioSessionMode {
        *self.inner.session_mode.lock().await
    }
}

#[async_trait::async_trait]
impl CaptureBackend for SimulatedCapture {
    async fn request_permission(&self) -> Result<Permission> {
        if self.inner.permission_granted.load(Ordering::SeqCst) {
            Ok(Permission::Granted)
        } else {
            Ok(Permission::Denied)
        }
    }

    async fn configure_session(&self, mode: AudioSessionMode) -> Result<()> {
        let mut current = self.inner.session_mode.lock().await;
        debug!("Audio session mode: {:?} -> {:?}", *current, mode);
        *current = mode;
        Ok(())
    }

    async fn create_capture(&self, preset: QualityPreset) -> Result<CaptureSetup> {
        if !self.inner.permission_granted.load(Ordering::SeqCst) {
            bail!("Microphone permission not granted");
        }

        {
            let mode = self.inner.session_mode.lock().await;
            if *mode != AudioSessionMode::RecordAndPlayback {
                bail!("Audio session is not configured for recording");
            }
        }

        fs::create_dir_all(&self.inner.config.output_dir)
            .context("Failed to create recordings directory")?;

        let id = Uuid::new_v4();
        let path = self
            .inner
            .config
            .output_dir
            .join(format!("note-{}.wav", id));

        let (status_tx, status_rx) = mpsc::channel(STATUS_CHANNEL_CAPACITY);

        let state = Arc::new(CaptureState {
            status_tx,
            clock: Mutex::new(CaptureClock {
                segment_start: Some(Instant::now()),
                recorded: Duration::ZERO,
                stopped: false,
            }),
        });

        {
            let mut active = self.inner.active.lock().await;
            if active.is_some() {
                warn!("Replacing a capture that was never finalized");
            }
            *active = Some(Arc::clone(&state));
        }

        self.inner.captures_created.fetch_add(1, Ordering::SeqCst);

        info!(
            "Capture started: {} ({}Hz, {}ch)",
            path.display(),
            preset.sample_rate(),
            preset.channels()
        );

        let handle = SimCaptureHandle {
            backend: Arc::clone(&self.inner),
            state,
            path,
            sample_rate: preset.sample_rate(),
            channels: preset.channels(),
        };

        Ok(CaptureSetup {
            handle: Box::new(handle),
            status_rx,
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Handle to one simulated recording
struct SimCaptureHandle {
    backend: Arc<SimInner>,
    state: Arc<CaptureState>,
    path: PathBuf,
    sample_rate: u32,
    channels: u16,
}

#[async_trait::async_trait]
impl CaptureHandle for SimCaptureHandle {
    async fn pause(&mut self) -> Result<()> {
        let mut clock = self.state.clock.lock().await;

        if clock.stopped {
            bail!("Capture already stopped");
        }

        match clock.segment_start.take() {
            Some(start) => {
                clock.recorded += start.elapsed();
                info!("Capture paused at {}ms", clock.recorded.as_millis());
            }
            None => warn!("Capture already paused"),
        }

        Ok(())
    }

    async fn resume(&mut self) -> Result<()> {
        let mut clock = self.state.clock.lock().await;

        if clock.stopped {
            bail!("Capture already stopped, cannot resume");
        }

        if clock.segment_start.is_some() {
            warn!("Capture already running");
        } else {
            clock.segment_start = Some(Instant::now());
            info!("Capture resumed at {}ms", clock.recorded.as_millis());
        }

        Ok(())
    }

    async fn finalize(self: Box<Self>) -> Result<FinalizedRecording> {
        let duration = {
            let mut clock = self.state.clock.lock().await;
            let recorded = clock.settle();
            clock.stopped = true;
            recorded
        };

        let samples = tone_samples(duration, self.sample_rate, self.channels);

        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&self.path, spec)
            .with_context(|| format!("Failed to create WAV file: {:?}", self.path))?;

        for sample in samples {
            writer
                .write_sample(sample)
                .context("Failed to write sample to WAV")?;
        }

        writer.finalize().context("Failed to finalize WAV file")?;

        // Detach from the backend so a racing interrupt() sees no capture.
        {
            let mut active = self.backend.active.lock().await;
            if let Some(current) = active.as_ref() {
                if Arc::ptr_eq(current, &self.state) {
                    *active = None;
                }
            }
        }

        info!(
            "Capture finalized: {} ({:.1}s)",
            self.path.display(),
            duration.as_secs_f64()
        );

        Ok(FinalizedRecording {
            uri: self.path.display().to_string(),
            duration,
        })
    }
}

/// Generate a 440Hz tone spanning `duration`, interleaved per channel
fn tone_samples(duration: Duration, sample_rate: u32, channels: u16) -> Vec<i16> {
    let frames = (duration.as_secs_f64() * sample_rate as f64) as usize;
    let amplitude = 0.3 * i16::MAX as f64;

    let mut samples = Vec::with_capacity(frames * channels as usize);

    for frame in 0..frames {
        let t = frame as f64 / sample_rate as f64;
        let value = (amplitude * (2.0 * std::f64::consts::PI * 440.0 * t).sin()) as i16;

        for _ in 0..channels {
            samples.push(value);
        }
    }

    samples
}
