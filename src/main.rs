//! Cogi Timer - A Pomodoro focus timer service
//! 
//! This is the main entry point for the cogi-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use cogi_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::spawn_timer,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("cogi_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting cogi-timer v{}", env!("CARGO_PKG_VERSION"));

    let store = config.store();
    info!("Configuration: host={}, port={}, data_dir={}, sounds={}",
          config.host, config.port, store.dir().display(), config.sounds.len());

    // Start the countdown engine and its controller
    let runtime = spawn_timer(Arc::new(store), config.notifier());
    let state = Arc::new(AppState::new(runtime, config.port, config.host.clone()));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start       - Start or resume the countdown");
    info!("  POST /timer/pause       - Pause the countdown");
    info!("  POST /timer/reset       - Reset the current interval");
    info!("  POST /timer/mode/:mode  - Switch to work, break or long-break");
    info!("  GET  /settings          - Read settings");
    info!("  PUT  /settings          - Replace settings");
    info!("  GET  /status            - Timer state and title");
    info!("  GET  /sessions          - Session log");
    info!("  GET  /health            - Health check");

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

    state.runtime.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
