//! Pomodoro Timer - A 25 minute countdown served over HTTP
//! 
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, runtime::Handle};
use tracing::info;

use pomodoro_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Create application state; the countdown ticks on this runtime
    let state = Arc::new(AppState::new(config.port, config.host.clone(), Handle::current()));
    info!("Timer mounted at {}", state.timer.display());

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    
    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                - Timer display and controls");
    info!("  POST /start           - Start the countdown");
    info!("  POST /stop            - Stop the countdown");
    info!("  POST /reset           - Reset to 25:00");
    info!("  POST /controls/:label - Activate a control by label");
    info!("  GET  /status          - Current timer status");
    info!("  GET  /display/stream  - Server-sent display updates");
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
            result?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
