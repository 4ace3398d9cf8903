//! Recording session management
//!
//! This module provides the `RecorderController` abstraction that manages:
//! - The recording state machine (idle / recording / paused)
//! - The active capture resource and its status notifications
//! - Automatic finalization when capture is interrupted externally
//! - The archive of completed recordings and the playback slot

mod archive;
mod controller;
mod snapshot;
mod state;

pub use archive::{ArchiveMode, Recording, RecordingArchive};
pub use controller::RecorderController;
pub use snapshot::RecorderSnapshot;
pub use state::{RecorderState, StopReason};
