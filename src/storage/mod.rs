//! Persistence port for settings and the session log
//!
//! The controller only sees the [`TimerStore`] trait. Failures are reported
//! back as [`StoreError`] and the caller decides how loudly to complain.

pub mod json_file;
pub mod memory;

use thiserror::Error;

use crate::state::{PomodoroSession, TimerSettings};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Key for the persisted settings record
pub const SETTINGS_KEY: &str = "cogi_timer_settings";
/// Key for the persisted session log
pub const SESSIONS_KEY: &str = "cogi_sessions";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable")]
    Unavailable,
}

/// Storage port injected into the timer controller
pub trait TimerStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet
    fn load_settings(&self) -> Result<Option<TimerSettings>, StoreError>;

    fn save_settings(&self, settings: &TimerSettings) -> Result<(), StoreError>;

    fn load_sessions(&self) -> Result<Vec<PomodoroSession>, StoreError>;

    fn append_session(&self, session: &PomodoroSession) -> Result<(), StoreError>;
}
