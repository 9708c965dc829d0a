//! Mode transitions applied when an interval completes

use crate::state::{TimerMode, TimerSettings};

/// Where the timer goes after the current interval completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub mode: TimerMode,
    pub duration: u64,
    pub completed_sessions: u32,
}

/// Work -> LongBreak every `sessions_before_long_break` completions, otherwise
/// Work -> Break; both breaks lead back to Work. The counter grows when
/// leaving Work and resets to zero when leaving LongBreak.
pub fn next_interval(
    mode: TimerMode,
    completed_sessions: u32,
    settings: &TimerSettings,
) -> Transition {
    let (next_mode, completed_sessions) = match mode {
        TimerMode::Work => {
            let completed = completed_sessions.saturating_add(1);
            // validated settings never hold zero; max(1) keeps `%` total
            let every = settings.sessions_before_long_break.max(1);
            if completed % every == 0 {
                (TimerMode::LongBreak, completed)
            } else {
                (TimerMode::Break, completed)
            }
        }
        TimerMode::Break => (TimerMode::Work, completed_sessions),
        TimerMode::LongBreak => (TimerMode::Work, 0),
    };

    Transition {
        mode: next_mode,
        duration: settings.duration_for(next_mode),
        completed_sessions,
    }
}
