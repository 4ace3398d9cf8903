pub mod capture;
pub mod config;
pub mod events;
pub mod http;
pub mod playback;
pub mod recorder;

pub use capture::{
    AudioSessionMode, CaptureBackend, CaptureHandle, CaptureSetup, CaptureStatus,
    FinalizedRecording, Permission, QualityPreset, SimCaptureConfig, SimulatedCapture,
};
pub use config::Config;
pub use events::{EventPublisher, RecordingSavedMessage, StateChangedMessage};
pub use http::{create_router, AppState};
pub use playback::{PlaybackBackend, PlaybackHandle, WavPlayback};
pub use recorder::{
    ArchiveMode, Recording, RecorderController, RecorderSnapshot, RecorderState, StopReason,
};
