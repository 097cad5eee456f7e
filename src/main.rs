//! Pomodoro Server - A countdown timer and task list served over HTTP
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::{format_remaining, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, session={}min",
          config.host, config.port, config.session);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.session_length()));
    info!("Timer ready at {}", format_remaining(state.timer.current_state().remaining_ms));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timer              - Current timer state");
    info!("  GET    /timer/events       - Stream timer state (SSE)");
    info!("  POST   /timer/start        - Start the countdown");
    info!("  POST   /timer/pause        - Pause the countdown");
    info!("  POST   /timer/resume       - Resume the countdown");
    info!("  POST   /timer/toggle       - Pause if running, otherwise start");
    info!("  POST   /timer/reset        - Reset to a full session");
    info!("  GET    /tasks              - List tasks");
    info!("  POST   /tasks              - Add a task");
    info!("  DELETE /tasks/:id          - Remove a task");
    info!("  POST   /tasks/:id/complete - Toggle completed");
    info!("  POST   /tasks/:id/expand   - Toggle expanded");
    info!("  GET    /status             - Server status");
    info!("  GET    /health             - Health check");

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

    state.timer.reset().await;
    info!("Server shutdown complete");
    Ok(())
}
