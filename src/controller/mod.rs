//! Timer controller: mode state machine, settings and session log
//!
//! The controller lives on the interactive side. It turns user intents into
//! engine commands and engine events into state transitions. It never reads
//! the engine's countdown directly; its `time_remaining` is a mirror kept up
//! to date by TICK events.

pub mod transition;

use std::sync::{Arc, Mutex};
use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    services::CompletionNotifier,
    state::{PomodoroSession, SettingsError, TimerMode, TimerRunState, TimerSettings},
    storage::TimerStore,
    tasks::countdown::{EngineCommand, EngineEvent, EngineHandle, EngineMessage},
};

pub use transition::{next_interval, Transition};

pub type SharedController = Arc<Mutex<TimerController>>;

pub struct TimerController {
    settings: TimerSettings,
    state: TimerRunState,
    sessions: Vec<PomodoroSession>,
    engine: EngineHandle,
    store: Arc<dyn TimerStore>,
    notifier: Arc<dyn CompletionNotifier>,
    updates: watch::Sender<TimerRunState>,
}

impl TimerController {
    /// Build a controller from whatever the store holds, falling back to
    /// defaults when it holds nothing usable
    pub fn new(
        store: Arc<dyn TimerStore>,
        notifier: Arc<dyn CompletionNotifier>,
        engine: EngineHandle,
    ) -> Self {
        let settings = load_settings(store.as_ref());
        let sessions = store.load_sessions().unwrap_or_else(|e| {
            warn!("Failed to load session log, starting empty: {}", e);
            Vec::new()
        });
        let state = TimerRunState::new(settings.work_duration);
        let (updates, _) = watch::channel(state.clone());

        info!(
            "Timer controller ready: work={}s break={}s long_break={}s every={} auto_start={} sessions={}",
            settings.work_duration,
            settings.break_duration,
            settings.long_break_duration,
            settings.sessions_before_long_break,
            settings.auto_start_timer,
            sessions.len()
        );

        Self {
            settings,
            state,
            sessions,
            engine,
            store,
            notifier,
            updates,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerRunState {
        &self.state
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn sessions(&self) -> &[PomodoroSession] {
        &self.sessions
    }

    pub fn engine_id(&self) -> u64 {
        self.engine.id()
    }

    pub fn title(&self) -> String {
        self.state.title()
    }

    /// Receiver that sees every published state change
    pub fn subscribe(&self) -> watch::Receiver<TimerRunState> {
        self.updates.subscribe()
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Start (or restart) ticking from the current remaining time and log a
    /// session snapshot. Every call is logged, including resumes.
    pub fn start_timer(&mut self) {
        info!("Starting {} timer at {}s", self.state.mode, self.state.time_remaining);
        self.state.is_active = true;
        self.engine.send(EngineCommand::Start {
            duration: self.state.time_remaining,
        });

        let session = PomodoroSession::new(Utc::now(), &self.settings);
        if let Err(e) = self.store.append_session(&session) {
            warn!("Failed to persist session: {}", e);
        }
        self.sessions.push(session);
        self.publish();
    }

    pub fn pause_timer(&mut self) {
        info!("Pausing {} timer at {}s", self.state.mode, self.state.time_remaining);
        self.state.is_active = false;
        self.engine.send(EngineCommand::Pause);
        self.publish();
    }

    /// Back to the full duration of the current mode, stopped
    pub fn reset_timer(&mut self) {
        let duration = self.settings.duration_for(self.state.mode);
        info!("Resetting {} timer to {}s", self.state.mode, duration);
        self.rewind(duration);
    }

    /// Jump to another mode, stopped. The session counter is left alone.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        let duration = self.settings.duration_for(mode);
        info!("Switching from {} to {} ({}s)", self.state.mode, mode, duration);
        self.state.mode = mode;
        self.rewind(duration);
    }

    /// Replace settings. If the current mode's duration changed, the
    /// countdown snaps to the new value and stops; progress is discarded.
    pub fn update_settings(&mut self, settings: TimerSettings) -> Result<(), SettingsError> {
        settings.validate()?;

        let mode = self.state.mode;
        let duration_changed = self.settings.duration_for(mode) != settings.duration_for(mode);
        self.settings = settings;
        info!("Settings updated: {:?}", self.settings);

        if let Err(e) = self.store.save_settings(&self.settings) {
            warn!("Failed to persist settings: {}", e);
        }

        if duration_changed {
            let duration = self.settings.duration_for(mode);
            debug!("Current {} duration changed, resetting to {}s", mode, duration);
            self.rewind(duration);
        }
        Ok(())
    }

    // ── Engine side ──────────────────────────────────────────────────

    /// Apply one engine event. Returns a command that must be dispatched
    /// through [`run_deferred`](Self::run_deferred) once this pass is over.
    pub fn handle_event(&mut self, message: EngineMessage) -> Option<EngineCommand> {
        if message.engine_id != self.engine.id() {
            debug!(
                "Dropping {:?} from stale engine {} (current {})",
                message.event,
                message.engine_id,
                self.engine.id()
            );
            return None;
        }

        match message.event {
            EngineEvent::Tick { time_remaining } => {
                self.state.time_remaining = time_remaining;
                self.publish();
                None
            }
            EngineEvent::Complete => self.on_complete(),
        }
    }

    /// Second phase of event handling. A deferred START is dropped if the
    /// timer was stopped in between.
    pub fn run_deferred(&mut self, command: EngineCommand) {
        if matches!(command, EngineCommand::Start { .. }) && !self.state.is_active {
            debug!("Timer stopped before deferred start, skipping {:?}", command);
            return;
        }
        self.engine.send(command);
    }

    /// Install a new engine. The old one is terminated and its late events
    /// are ignored from now on. The new engine starts stopped.
    pub fn replace_engine(&mut self, engine: EngineHandle) {
        info!("Replacing engine {} with {}", self.engine.id(), engine.id());
        self.engine = engine;
        self.state.is_active = false;
        self.engine.send(EngineCommand::Reset {
            duration: self.state.time_remaining,
        });
        self.publish();
    }

    /// Stop the current engine for good
    pub fn terminate_engine(&mut self) {
        self.engine.terminate();
        self.state.is_active = false;
        self.publish();
    }

    fn on_complete(&mut self) -> Option<EngineCommand> {
        let finished = self.state.mode;
        let next = next_interval(finished, self.state.completed_sessions, &self.settings);
        // a COMPLETE that raced a pause still transitions, but never auto-starts
        let auto_start = self.settings.auto_start_timer && self.state.is_active;

        info!(
            "{} completed -> {} ({}s), completed_sessions={}, auto_start={}",
            finished, next.mode, next.duration, next.completed_sessions, auto_start
        );

        self.state.mode = next.mode;
        self.state.time_remaining = next.duration;
        self.state.completed_sessions = next.completed_sessions;
        self.state.is_active = auto_start;
        self.publish();

        self.notifier.notify_completion(finished);

        auto_start.then_some(EngineCommand::Start {
            duration: next.duration,
        })
    }

    fn rewind(&mut self, duration: u64) {
        self.state.time_remaining = duration;
        self.state.is_active = false;
        self.engine.send(EngineCommand::Reset { duration });
        self.publish();
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }
}

fn load_settings(store: &dyn TimerStore) -> TimerSettings {
    match store.load_settings() {
        Ok(Some(settings)) => match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                warn!("Stored settings are invalid ({}), using defaults", e);
                TimerSettings::default()
            }
        },
        Ok(None) => {
            debug!("No stored settings, using defaults");
            TimerSettings::default()
        }
        Err(e) => {
            warn!("Failed to load settings, using defaults: {}", e);
            TimerSettings::default()
        }
    }
}
