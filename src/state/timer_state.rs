//! Timer mode and run state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Idle window title, shown whenever the timer is not counting
pub const IDLE_TITLE: &str = "Cogi: Deep Work";

/// Interval kind the timer is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    Work,
    Break,
    LongBreak,
}

impl TimerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::Break => "break",
            TimerMode::LongBreak => "long-break",
        }
    }

    /// Parse the path form used by the HTTP API
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "work" => Some(TimerMode::Work),
            "break" => Some(TimerMode::Break),
            "long-break" => Some(TimerMode::LongBreak),
            _ => None,
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controller-owned view of the countdown, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRunState {
    pub time_remaining: u64,
    pub is_active: bool,
    pub mode: TimerMode,
    /// Work intervals completed since the last long break
    pub completed_sessions: u32,
}

impl TimerRunState {
    /// Fresh Work interval, inactive
    pub fn new(work_duration: u64) -> Self {
        Self {
            time_remaining: work_duration,
            is_active: false,
            mode: TimerMode::Work,
            completed_sessions: 0,
        }
    }

    /// Remaining time as `MM:SS`
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.time_remaining / 60, self.time_remaining % 60)
    }

    /// Window title: `(MM:SS) mode` while counting, the idle title otherwise
    pub fn title(&self) -> String {
        if self.is_active {
            format!("({}) {}", self.clock(), self.mode)
        } else {
            IDLE_TITLE.to_string()
        }
    }
}
