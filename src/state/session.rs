//! Historical Pomodoro session records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimerSettings;

/// Snapshot taken every time the timer is started; append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub start_time: DateTime<Utc>,
    pub work_duration: u64,
    pub break_duration: u64,
    pub long_break_duration: u64,
    pub sessions_before_long_break: u32,
}

impl PomodoroSession {
    pub fn new(start_time: DateTime<Utc>, settings: &TimerSettings) -> Self {
        Self {
            start_time,
            work_duration: settings.work_duration,
            break_duration: settings.break_duration,
            long_break_duration: settings.long_break_duration,
            sessions_before_long_break: settings.sessions_before_long_break,
        }
    }
}
