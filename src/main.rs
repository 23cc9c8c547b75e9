//! Pomodoro Server - A state-managed HTTP server driving a single focus/break timer
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{alert_task, ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, alert={:?}",
          config.host, config.port, config.alert_sound());

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the background tasks; the alert receiver is taken before any tick can fire
    let alert = tokio::spawn(alert_task(state.transition_tx.subscribe(), config.alert_sound()));
    let ticker = tokio::spawn(ticker_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status                  - Timer snapshot, progress and control state");
    info!("  POST /toggle                  - Play or pause the timer");
    info!("  POST /stop                    - Stop the session and restore defaults");
    info!("  POST /focus/{{increase|decrease}} - Step the focus duration");
    info!("  POST /break/{{increase|decrease}} - Step the break duration");
    info!("  GET  /health                  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Never leave the ticker running past the state it drives
    ticker.abort();
    alert.abort();

    info!("Server shutdown complete");
    Ok(())
}
