//! External collaborators
//!
//! Completion notification is the only side effect the timer triggers
//! outside its own state.

pub mod notifier;

// Re-export main types
pub use notifier::{CompletionNotifier, LogNotifier, SoundNotifier};
