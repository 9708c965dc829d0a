//! Event pump: feeds engine events into the controller

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info};

use super::countdown::{CountdownEngine, EngineMessage};
use crate::{
    controller::{SharedController, TimerController},
    services::CompletionNotifier,
    storage::TimerStore,
};

/// Running timer: controller, its engine and the pump between them
pub struct TimerRuntime {
    controller: SharedController,
    events_tx: mpsc::UnboundedSender<EngineMessage>,
    next_engine_id: AtomicU64,
    pump: JoinHandle<()>,
}

/// Spawn engine #1, build the controller around it and start pumping events
pub fn spawn_timer(store: Arc<dyn TimerStore>, notifier: Arc<dyn CompletionNotifier>) -> TimerRuntime {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let engine = CountdownEngine::spawn(1, events_tx.clone());
    let controller = Arc::new(Mutex::new(TimerController::new(store, notifier, engine)));

    let pump = tokio::spawn(event_pump_task(Arc::clone(&controller), events_rx));

    TimerRuntime {
        controller,
        events_tx,
        next_engine_id: AtomicU64::new(2),
        pump,
    }
}

impl TimerRuntime {
    pub fn controller(&self) -> SharedController {
        Arc::clone(&self.controller)
    }

    /// Swap in a fresh engine; the old one is terminated
    pub fn restart_engine(&self) -> Result<u64, String> {
        let id = self.next_engine_id.fetch_add(1, Ordering::SeqCst);
        let engine = CountdownEngine::spawn(id, self.events_tx.clone());
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock timer controller: {}", e))?;
        controller.replace_engine(engine);
        Ok(id)
    }

    /// Terminate the engine and stop pumping events
    pub fn shutdown(&self) {
        info!("Shutting down timer runtime");
        match self.controller.lock() {
            Ok(mut controller) => controller.terminate_engine(),
            Err(e) => error!("Failed to lock timer controller during shutdown: {}", e),
        }
        self.pump.abort();
    }
}

/// Two-phase handling: apply the event under the lock, release it, then run
/// whatever command the transition deferred
pub async fn event_pump_task(
    controller: SharedController,
    mut events: mpsc::UnboundedReceiver<EngineMessage>,
) {
    info!("Starting timer event pump");

    while let Some(message) = events.recv().await {
        let deferred = match controller.lock() {
            Ok(mut controller) => controller.handle_event(message),
            Err(e) => {
                error!("Failed to lock timer controller: {}", e);
                continue;
            }
        };

        if let Some(command) = deferred {
            debug!("Running deferred {:?}", command);
            match controller.lock() {
                Ok(mut controller) => controller.run_deferred(command),
                Err(e) => error!("Failed to lock timer controller: {}", e),
            }
        }
    }

    debug!("Timer event pump stopped");
}
