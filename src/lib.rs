//! Cogi Timer - A Pomodoro focus timer service
//! 
//! A countdown engine runs on its own task and talks to the timer controller
//! purely through channels. The controller owns the work/break/long-break
//! state machine, the settings and the session log, and is driven over HTTP.

pub mod config;
pub mod controller;
pub mod state;
pub mod api;
pub mod services;
pub mod storage;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use controller::TimerController;
pub use state::AppState;
pub use api::create_router;
pub use tasks::spawn_timer;
pub use utils::signals::shutdown_signal;
