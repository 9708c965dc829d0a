//! In-memory store used by tests and ephemeral runs

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use super::{StoreError, TimerStore};
use crate::state::{PomodoroSession, TimerSettings};

#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: Mutex<Option<TimerSettings>>,
    sessions: Mutex<Vec<PomodoroSession>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: TimerSettings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
            ..Self::default()
        }
    }

    /// Make every subsequent call return [`StoreError::Unavailable`]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Last saved settings, ignoring the failure switch
    pub fn saved_settings(&self) -> Option<TimerSettings> {
        self.settings.lock().ok().and_then(|s| s.clone())
    }

    /// Everything appended so far, ignoring the failure switch
    pub fn saved_sessions(&self) -> Vec<PomodoroSession> {
        self.sessions.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl TimerStore for MemoryStore {
    fn load_settings(&self) -> Result<Option<TimerSettings>, StoreError> {
        self.check()?;
        Ok(self.saved_settings())
    }

    fn save_settings(&self, settings: &TimerSettings) -> Result<(), StoreError> {
        self.check()?;
        let mut stored = self.settings.lock().map_err(|_| StoreError::Unavailable)?;
        *stored = Some(settings.clone());
        Ok(())
    }

    fn load_sessions(&self) -> Result<Vec<PomodoroSession>, StoreError> {
        self.check()?;
        Ok(self.saved_sessions())
    }

    fn append_session(&self, session: &PomodoroSession) -> Result<(), StoreError> {
        self.check()?;
        self.sessions
            .lock()
            .map_err(|_| StoreError::Unavailable)?
            .push(session.clone());
        Ok(())
    }
}
