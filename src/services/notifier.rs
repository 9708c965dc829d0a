//! Completion notification delivery

use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::state::TimerMode;

/// Fire-and-forget "an interval completed" capability.
///
/// Implementations must return immediately and swallow their own failures.
pub trait CompletionNotifier: Send + Sync {
    fn notify_completion(&self, finished: TimerMode);
}

/// Only logs the completion
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl CompletionNotifier for LogNotifier {
    fn notify_completion(&self, finished: TimerMode) {
        info!("{} interval completed", finished);
    }
}

/// Plays the first sound file that works with an external player
#[derive(Debug, Clone)]
pub struct SoundNotifier {
    player: String,
    sources: Vec<PathBuf>,
}

impl SoundNotifier {
    pub fn new(player: impl Into<String>, sources: Vec<PathBuf>) -> Self {
        Self {
            player: player.into(),
            sources,
        }
    }
}

impl CompletionNotifier for SoundNotifier {
    fn notify_completion(&self, finished: TimerMode) {
        info!("{} interval completed, playing bell", finished);
        let player = self.player.clone();
        let sources = self.sources.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if let Err(e) = play_first_available(&player, &sources).await {
                        error!("Error playing sound: {}", e);
                    }
                });
            }
            Err(e) => warn!("No runtime available for sound playback: {}", e),
        }
    }
}

/// Try each source in order, stop at the first one the player accepts
pub async fn play_first_available(player: &str, sources: &[PathBuf]) -> Result<PathBuf, String> {
    for source in sources {
        if !source.exists() {
            debug!("Skipping missing audio source {}", source.display());
            continue;
        }

        let output = Command::new(player)
            .arg(source)
            .output()
            .await
            .map_err(|e| format!("Failed to execute {}: {}", player, e))?;

        if output.status.success() {
            debug!("Played {}", source.display());
            return Ok(source.clone());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!("Failed to play {}: {}", source.display(), stderr.trim());
    }

    Err("No compatible audio source found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_sources_is_an_error() {
        let err = play_first_available("true", &[]).await.unwrap_err();
        assert!(err.contains("No compatible audio source"));
    }

    #[tokio::test]
    async fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("bell.mp3");
        let present = dir.path().join("bell.wav");
        std::fs::write(&present, b"RIFF").unwrap();

        let played = play_first_available("true", &[missing, present.clone()])
            .await
            .unwrap();
        assert_eq!(played, present);
    }

    #[tokio::test]
    async fn rejected_source_falls_through_to_the_next() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("bell.ogg");
        std::fs::write(&first, b"OggS").unwrap();

        let err = play_first_available("false", &[first]).await.unwrap_err();
        assert!(err.contains("No compatible audio source"));
    }

    #[test]
    fn notifying_outside_a_runtime_is_harmless() {
        SoundNotifier::new("true", vec![]).notify_completion(TimerMode::Work);
        LogNotifier.notify_completion(TimerMode::Break);
    }
}
