pub mod backend;
pub mod wav;

pub use backend::{PlaybackBackend, PlaybackHandle};
pub use wav::WavPlayback;
