use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use voicenote::{
    create_router, AppState, Config, EventPublisher, RecorderController, SimCaptureConfig,
    SimulatedCapture, WavPlayback,
};

#[derive(Parser)]
#[command(name = "voicenote")]
#[command(about = "Interruption-safe voice recorder service")]
struct Args {
    /// Path to the configuration file, without extension
    #[arg(short, long, default_value = "config/voicenote")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);
    info!("Recordings directory: {}", cfg.recordings_dir().display());
    info!("Archive mode: {:?}", cfg.audio.archive);

    let capture = SimulatedCapture::new(SimCaptureConfig {
        output_dir: cfg.recordings_dir(),
    });

    let events = match &cfg.events.nats_url {
        Some(url) => match EventPublisher::connect(url).await {
            Ok(publisher) => Some(publisher),
            Err(e) => {
                warn!("Running without event publishing: {:#}", e);
                None
            }
        },
        None => None,
    };

    let recorder = RecorderController::new(
        Arc::new(capture.clone()),
        Arc::new(WavPlayback::new()),
        cfg.audio.quality,
        cfg.audio.archive,
        events,
    );

    let state = AppState::new(recorder.clone(), capture);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    recorder.shutdown().await;

    Ok(())
}
