//! Match Whistle - A referee match timer
//!
//! This is the main entry point for the match-whistle application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use match_whistle::{
    api::create_router,
    config::Config,
    services::{BellAudio, CuePlayer, LogHaptic},
    state::AppState,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("match_whistle={},tower_http=info", config.log_level()))
        .init();

    info!("Starting match-whistle v{}", env!("CARGO_PKG_VERSION"));

    let durations = config.durations();
    info!(
        "Configuration: half={}ms, break={}ms, overtime={}ms (enabled={})",
        durations.half_ms(),
        durations.break_ms(),
        durations.overtime_ms(),
        durations.overtime_enabled
    );

    let cues = if config.bell {
        CuePlayer::new(Arc::new(BellAudio), Arc::new(LogHaptic))
    } else {
        CuePlayer::logging()
    };

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), durations, cues));

    // Start the countdown background task
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(timer_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control surface running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start-pause - Start, resume or pause");
    info!("  POST /add-ten     - Add 10 seconds to the current phase");
    info!("  POST /reset       - Stop and return to idle");
    info!("  POST /whistle     - Blow the long whistle");
    info!("  POST /durations   - Edit durations (stopped, before or after a match)");
    info!("  GET  /status      - Current phase and remaining time");
    info!("  GET  /health      - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(signal) => info!("Shutdown signal {} received", signal),
                Err(e) => tracing::error!("Signal handling failed: {}", e),
            }
        }
    }

    info!("Shutdown complete");
    Ok(())
}
