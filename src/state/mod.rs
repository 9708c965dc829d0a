//! State management module
//! 
//! This module contains the timer data model and the shared application state.

pub mod app_state;
pub mod session;
pub mod settings;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use session::PomodoroSession;
pub use settings::{SettingsError, TimerSettings};
pub use timer_state::{TimerMode, TimerRunState, IDLE_TITLE};
