//! Signal handling for graceful shutdown

use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{error, info, warn};

/// Wait for SIGTERM, SIGINT or SIGQUIT.
///
/// Falls back to Ctrl-C only when the signal stream cannot be registered.
pub async fn shutdown_signal() {
    match Signals::new([SIGTERM, SIGINT, SIGQUIT]) {
        Ok(mut signals) => {
            let handle = signals.handle();
            if let Some(signal) = signals.next().await {
                info!("Received signal: {}", signal);
            }
            handle.close();
        }
        Err(e) => {
            warn!("Failed to register signal handlers, falling back to Ctrl-C: {}", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
        }
    }
}
