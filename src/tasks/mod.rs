//! Background tasks module
//! 
//! This module contains the countdown engine and the event pump that connects
//! it to the timer controller.

pub mod countdown;
pub mod event_pump;

// Re-export main types
pub use countdown::{CountdownEngine, EngineCommand, EngineEvent, EngineHandle, EngineMessage};
pub use event_pump::{event_pump_task, spawn_timer, TimerRuntime};
