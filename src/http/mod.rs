//! HTTP API server for external control surfaces
//!
//! This module provides a REST API mapping 1:1 to recorder operations:
//! - POST /recorder/start - Start (or resume) recording
//! - POST /recorder/pause - Pause the active recording
//! - POST /recorder/stop - Stop and archive the active recording
//! - POST /recorder/play - Play an archived recording
//! - POST /recorder/interrupt - Inject a simulated call interruption
//! - GET /recorder/status - Query recorder state
//! - GET /recordings - List archived recordings
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
