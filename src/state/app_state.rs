//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    controller::{SharedController, TimerController},
    tasks::TimerRuntime,
};

/// Shared state handed to every HTTP handler
pub struct AppState {
    /// The running timer (controller, engine and event pump)
    pub runtime: TimerRuntime,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(runtime: TimerRuntime, port: u16, host: String) -> Self {
        Self {
            runtime,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    pub fn controller(&self) -> SharedController {
        self.runtime.controller()
    }

    /// Run an intent against the controller and record it as the last action
    pub fn apply<T, F>(&self, action: &str, intent: F) -> Result<T, String>
    where
        F: FnOnce(&mut TimerController) -> T,
    {
        let controller = self.runtime.controller();
        let mut guard = lock_controller(&controller)?;
        let result = intent(&mut guard);
        drop(guard); // Release the lock early

        info!("Applied timer action: {}", action);
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(result)
    }

    /// Read from the controller without recording an action
    pub fn inspect<T, F>(&self, read: F) -> Result<T, String>
    where
        F: FnOnce(&TimerController) -> T,
    {
        let controller = self.runtime.controller();
        let guard = lock_controller(&controller)?;
        Ok(read(&guard))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

fn lock_controller(controller: &SharedController) -> Result<MutexGuard<'_, TimerController>, String> {
    controller
        .lock()
        .map_err(|e| format!("Failed to lock timer controller: {}", e))
}
