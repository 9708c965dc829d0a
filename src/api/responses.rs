//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{PomodoroSession, TimerRunState, TimerSettings};

/// API response structure for timer intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerRunState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerRunState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response whose status follows the timer activity
    pub fn for_timer(message: String, timer: TimerRunState) -> Self {
        let status = if timer.is_active { "active" } else { "inactive" };
        Self::new(status.to_string(), message, timer)
    }

    /// Create an error response
    pub fn error(message: String, timer: TimerRunState) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Full status including window title and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerRunState,
    pub settings: TimerSettings,
    pub title: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Recorded session log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub count: usize,
    pub sessions: Vec<PomodoroSession>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
