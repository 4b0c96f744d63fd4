// Window State Store
// Reads and writes the persisted browsing session and supplies default window geometry.
// The session is stored as a JSON document at a fixed name in the platform data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::errors::WindowStateError;
use crate::types::session::BrowsingSessionState;
use crate::types::window::WindowState;

pub const SESSION_FILE_NAME: &str = "sessionRestore.json";

/// Session document persistence.
#[derive(Debug, Clone)]
pub struct WindowStateStore {
    path: PathBuf,
}

impl WindowStateStore {
    /// Creates a new store.
    ///
    /// If `path_override` is `Some`, uses that path for the session file.
    /// Otherwise, uses the platform data directory with [`SESSION_FILE_NAME`].
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let path = path_override
            .unwrap_or_else(|| platform::get_data_dir().join(SESSION_FILE_NAME));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Geometry used when nothing better is known: default size, OS-chosen position.
    pub fn default_window_state() -> WindowState {
        WindowState {
            x: None,
            y: None,
            width: platform::DEFAULT_WIDTH,
            height: platform::DEFAULT_HEIGHT,
            pages: Vec::new(),
        }
    }

    /// Reads the previous session without blocking the caller's thread.
    ///
    /// A missing or malformed file is an absent session, never an error.
    pub async fn load(&self) -> Option<BrowsingSessionState> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No previous session at {}", self.path.display());
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match Self::parse(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn parse(content: &str) -> Result<BrowsingSessionState, WindowStateError> {
        serde_json::from_str(content)
            .map_err(|e| WindowStateError::SerializationError(e.to_string()))
    }

    /// Writes a snapshot, replacing the previous one atomically.
    ///
    /// Blocking; called from the session save worker, never the control thread.
    pub fn save(&self, state: &BrowsingSessionState) -> Result<(), WindowStateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WindowStateError::IoError(format!("Failed to create data directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| WindowStateError::SerializationError(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| WindowStateError::IoError(format!("Failed to write session file: {}", e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| WindowStateError::IoError(format!("Failed to replace session file: {}", e)))?;

        Ok(())
    }
}
