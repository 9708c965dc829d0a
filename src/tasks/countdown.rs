//! Countdown engine background task
//!
//! The engine owns a single countdown value and a one-second ticker. It knows
//! nothing about modes or settings: it counts down from whatever it is told,
//! reports every tick, and reports completion once the value has reached
//! zero. Commands arrive on one channel, events leave on another.

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, trace};

/// Period between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Controller -> engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Replace any running countdown and start ticking from `duration`
    Start { duration: u64 },
    /// Stop ticking; idempotent
    Pause,
    /// Pause, set the countdown to `duration` and report it immediately
    Reset { duration: u64 },
}

/// Engine -> controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Tick { time_remaining: u64 },
    Complete,
}

/// Event stamped with the engine instance that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMessage {
    pub engine_id: u64,
    pub event: EngineEvent,
}

/// Owning handle to a running engine; dropping it terminates the engine
#[derive(Debug)]
pub struct EngineHandle {
    id: u64,
    commands: mpsc::UnboundedSender<EngineCommand>,
    task: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Handle without a backing task. Commands land on the returned receiver.
    pub fn channel(id: u64) -> (Self, mpsc::UnboundedReceiver<EngineCommand>) {
        let (commands, rx) = mpsc::unbounded_channel();
        (Self { id, commands, task: None }, rx)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// One-way send. A terminated engine silently drops the command.
    pub fn send(&self, command: EngineCommand) {
        if self.commands.send(command).is_err() {
            debug!("Engine {} is gone, dropping {:?}", self.id, command);
        }
    }

    /// Stop the engine task; pending ticks are discarded
    pub fn terminate(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Terminating countdown engine {}", self.id);
            task.abort();
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Countdown state living inside the engine task
pub struct CountdownEngine {
    id: u64,
    time_remaining: u64,
    /// At most one ticker at a time
    ticker: Option<Interval>,
    events: mpsc::UnboundedSender<EngineMessage>,
}

impl CountdownEngine {
    /// Spawn an engine on its own task, reporting to `events`
    pub fn spawn(id: u64, events: mpsc::UnboundedSender<EngineMessage>) -> EngineHandle {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let engine = Self {
            id,
            time_remaining: 0,
            ticker: None,
            events,
        };
        let task = tokio::spawn(engine.run(command_rx));
        debug!("Spawned countdown engine {}", id);

        EngineHandle {
            id,
            commands,
            task: Some(task),
        }
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<EngineCommand>) {
        loop {
            let step = tokio::select! {
                biased;
                command = commands.recv() => Step::Command(command),
                _ = next_tick(&mut self.ticker) => Step::Tick,
            };

            let listening = match step {
                Step::Command(Some(command)) => self.apply(command),
                Step::Command(None) => false,
                Step::Tick => self.on_tick(),
            };
            if !listening {
                break;
            }
        }
        debug!("Countdown engine {} stopped", self.id);
    }

    /// Returns false once nobody is listening any more
    fn apply(&mut self, command: EngineCommand) -> bool {
        trace!("Engine {} received {:?}", self.id, command);
        match command {
            EngineCommand::Start { duration } => {
                self.stop_ticker();
                self.time_remaining = duration;
                let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some(ticker);
                true
            }
            EngineCommand::Pause => {
                self.stop_ticker();
                true
            }
            EngineCommand::Reset { duration } => {
                self.stop_ticker();
                self.time_remaining = duration;
                self.emit(EngineEvent::Tick { time_remaining: duration })
            }
        }
    }

    fn on_tick(&mut self) -> bool {
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
            self.emit(EngineEvent::Tick {
                time_remaining: self.time_remaining,
            })
        } else {
            self.stop_ticker();
            self.emit(EngineEvent::Complete)
        }
    }

    fn stop_ticker(&mut self) {
        self.ticker = None;
    }

    fn emit(&self, event: EngineEvent) -> bool {
        let message = EngineMessage {
            engine_id: self.id,
            event,
        };
        self.events.send(message).is_ok()
    }
}

enum Step {
    Command(Option<EngineCommand>),
    Tick,
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
