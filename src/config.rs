//! Configuration and CLI argument handling

use std::{path::PathBuf, sync::Arc};
use clap::Parser;

use crate::{
    services::{CompletionNotifier, LogNotifier, SoundNotifier},
    storage::JsonFileStore,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "cogi-timer")]
#[command(about = "A Pomodoro focus timer service with a background countdown engine")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding persisted settings and the session log
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Completion sound, tried in the order given (repeatable)
    #[arg(short, long = "sound")]
    pub sounds: Vec<PathBuf>,

    /// Command used to play completion sounds
    #[arg(long, default_value = "paplay")]
    pub player: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Storage rooted at `--data-dir`, or the platform data directory
    pub fn store(&self) -> JsonFileStore {
        let dir = self.data_dir.clone().unwrap_or_else(JsonFileStore::default_dir);
        JsonFileStore::new(dir)
    }

    /// Sound playback when sounds were given, plain logging otherwise
    pub fn notifier(&self) -> Arc<dyn CompletionNotifier> {
        if self.sounds.is_empty() {
            Arc::new(LogNotifier)
        } else {
            Arc::new(SoundNotifier::new(self.player.clone(), self.sounds.clone()))
        }
    }
}
