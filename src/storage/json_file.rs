//! JSON file store, one file per key inside a data directory

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{StoreError, TimerStore, SESSIONS_KEY, SETTINGS_KEY};
use crate::state::{PomodoroSession, TimerSettings};

/// Best-effort local storage backed by `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$XDG_DATA_HOME/cogi` or the platform equivalent, `./.cogi` otherwise
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("cogi"))
            .unwrap_or_else(|| PathBuf::from(".cogi"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored value at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, serde_json::to_string(value)?)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl TimerStore for JsonFileStore {
    fn load_settings(&self) -> Result<Option<TimerSettings>, StoreError> {
        self.read(SETTINGS_KEY)
    }

    fn save_settings(&self, settings: &TimerSettings) -> Result<(), StoreError> {
        self.write(SETTINGS_KEY, settings)
    }

    fn load_sessions(&self) -> Result<Vec<PomodoroSession>, StoreError> {
        Ok(self.read(SESSIONS_KEY)?.unwrap_or_default())
    }

    fn append_session(&self, session: &PomodoroSession) -> Result<(), StoreError> {
        let mut sessions = self.load_sessions()?;
        sessions.push(session.clone());
        self.write(SESSIONS_KEY, &sessions)
    }
}
