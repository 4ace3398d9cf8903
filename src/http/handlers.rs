use super::state::AppState;
use crate::recorder::{Recording, RecorderSnapshot};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    /// Locator of the recording to play; defaults to the latest one
    pub uri: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: String,
    pub message: String,
    pub snapshot: RecorderSnapshot,
}

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub status: String,
    pub recording: Recording,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /recorder/start
/// Start recording, or resume a paused session
pub async fn start_recording(State(state): State<AppState>) -> impl IntoResponse {
    info!("Start requested");

    match state.recorder.start().await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(CommandResponse {
                status: snapshot.state.label().to_string(),
                message: "Start handled".to_string(),
                snapshot,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to start recording: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to start recording: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /recorder/pause
/// Suspend the active recording without finalizing it
pub async fn pause_recording(State(state): State<AppState>) -> impl IntoResponse {
    info!("Pause requested");

    match state.recorder.pause().await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(CommandResponse {
                status: snapshot.state.label().to_string(),
                message: "Pause handled".to_string(),
                snapshot,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to pause recording: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to pause recording: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /recorder/stop
/// Finalize the active recording; a no-op when nothing is recording
pub async fn stop_recording(State(state): State<AppState>) -> impl IntoResponse {
    info!("Stop requested");

    match state.recorder.stop().await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(CommandResponse {
                status: snapshot.state.label().to_string(),
                message: "Stop handled".to_string(),
                snapshot,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to stop recording: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to stop recording: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /recorder/play
/// Play an archived recording (the latest one when no uri is given)
pub async fn play_recording(
    State(state): State<AppState>,
    Json(req): Json<PlayRequest>,
) -> impl IntoResponse {
    info!("Play requested (uri={:?})", req.uri);

    match state.recorder.play(req.uri.as_deref()).await {
        Ok(recording) => (
            StatusCode::OK,
            Json(PlayResponse {
                status: "playing".to_string(),
                recording,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to play recording: {:#}", e);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Failed to play recording: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /recorder/interrupt
/// Simulate an incoming call ending the active capture
pub async fn interrupt_recording(State(state): State<AppState>) -> impl IntoResponse {
    info!("Interruption requested");

    if state.capture.interrupt().await {
        (
            StatusCode::OK,
            Json(CommandResponse {
                status: "interrupted".to_string(),
                message: "Capture interrupted; the recorder will finalize it".to_string(),
                snapshot: state.recorder.snapshot().await,
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "No active capture to interrupt".to_string(),
            }),
        )
            .into_response()
    }
}

/// GET /recorder/status
/// Current recorder snapshot
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.recorder.snapshot().await;
    (StatusCode::OK, Json(snapshot)).into_response()
}

/// GET /recordings
/// List archived recordings, oldest first
pub async fn list_recordings(State(state): State<AppState>) -> impl IntoResponse {
    let recordings = state.recorder.recordings().await;
    (StatusCode::OK, Json(recordings)).into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
