use crate::capture::SimulatedCapture;
use crate::recorder::RecorderController;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The recorder every route operates on
    pub recorder: RecorderController,

    /// The capture backend, kept directly so the interruption route can
    /// reach into it
    pub capture: SimulatedCapture,
}

impl AppState {
    pub fn new(recorder: RecorderController, capture: SimulatedCapture) -> Self {
        Self { recorder, capture }
    }
}
