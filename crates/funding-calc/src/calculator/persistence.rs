use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key under which the in-progress answers are kept.
pub const FORM_STATE_KEY: &str = "qc-funding-calc";
/// Key under which the last backend result is kept.
pub const RESULT_KEY: &str = "qc-funding-result";

/// Durable key-value slot holding one raw JSON document.
pub trait PersistencePort: Send + Sync {
    fn load(&self) -> Result<Option<String>, PersistenceError>;
    fn save(&self, raw: &str) -> Result<(), PersistenceError>;
    fn clear(&self) -> Result<(), PersistenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("persistence slot unavailable")]
    Unavailable,
}

/// Process-local slot, used by tests and one-shot CLI runs.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
        }
    }
}

impl PersistencePort for MemorySlot {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        let guard = self
            .value
            .lock()
            .map_err(|_| PersistenceError::Unavailable)?;
        Ok(guard.clone())
    }

    fn save(&self, raw: &str) -> Result<(), PersistenceError> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| PersistenceError::Unavailable)?;
        *guard = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| PersistenceError::Unavailable)?;
        *guard = None;
        Ok(())
    }
}

/// One JSON file per key inside a state directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PersistencePort for FileSlot {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn save(&self, raw: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        // Staged write, then rename over the live file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, raw).map_err(|err| self.io_error(err))?;
        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}
