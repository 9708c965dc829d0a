//! Timer settings structure and validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TimerMode;

/// Rejected settings update
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("sessionsBeforeLongBreak must be at least 1")]
    NoSessionsBeforeLongBreak,
}

/// User-owned timer configuration, persisted as camelCase JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    /// Work interval length in seconds
    pub work_duration: u64,
    /// Short break length in seconds
    pub break_duration: u64,
    /// Long break length in seconds
    pub long_break_duration: u64,
    /// Work intervals between long breaks
    pub sessions_before_long_break: u32,
    /// Start the next interval as soon as one completes
    pub auto_start_timer: bool,
}

impl TimerSettings {
    /// Full duration in seconds for the given mode
    pub fn duration_for(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Work => self.work_duration,
            TimerMode::Break => self.break_duration,
            TimerMode::LongBreak => self.long_break_duration,
        }
    }

    /// Check the positivity invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        let durations = [
            ("workDuration", self.work_duration),
            ("breakDuration", self.break_duration),
            ("longBreakDuration", self.long_break_duration),
        ];
        if let Some((field, _)) = durations.iter().find(|(_, secs)| *secs == 0) {
            return Err(SettingsError::ZeroDuration { field: *field });
        }
        if self.sessions_before_long_break == 0 {
            return Err(SettingsError::NoSessionsBeforeLongBreak);
        }
        Ok(())
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_duration: 25 * 60,
            break_duration: 5 * 60,
            long_break_duration: 15 * 60,
            sessions_before_long_break: 4,
            auto_start_timer: false,
        }
    }
}
