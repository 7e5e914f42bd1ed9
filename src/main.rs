//! Pomodoro Server - A state-managed HTTP server driving a focus/break timer
//! 
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    config::Config,
    state::AppState,
    api::create_router,
    services::TerminalBell,
    tasks::{tick_scheduler_task, IntervalTicks},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    let controller = config.controller().map_err(|e| anyhow!(e))?;

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, focus={}min, break={}min",
          config.host, config.port, controller.focus_minutes, controller.break_minutes);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), controller));

    // Start the tick scheduler background task
    let scheduler_state = Arc::clone(&state);
    let scheduler = tokio::spawn(async move {
        tick_scheduler_task(scheduler_state, IntervalTicks::every_second(), TerminalBell).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /increase-focus  - Lengthen focus by 5 minutes");
    info!("  POST /decrease-focus  - Shorten focus by 5 minutes");
    info!("  POST /increase-break  - Lengthen break by 1 minute");
    info!("  POST /decrease-break  - Shorten break by 1 minute");
    info!("  POST /play-pause      - Start, pause or resume the timer");
    info!("  POST /stop            - Stop the current session");
    info!("  GET  /status          - Current timer state");
    info!("  GET  /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    scheduler.abort();
    info!("Server shutdown complete");
    Ok(())
}
