use thiserror::Error;

use super::window::WindowId;

// === WindowStateError ===

/// Errors related to reading and writing persisted window/session state.
#[derive(Debug, Error)]
pub enum WindowStateError {
    /// Reading or writing the session file failed.
    #[error("Window state I/O error: {0}")]
    IoError(String),
    /// The session document could not be (de)serialized.
    #[error("Window state serialization error: {0}")]
    SerializationError(String),
}

// === SettingsError ===

/// Errors related to the settings key-value store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading the settings file failed.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// The settings file is not valid JSON.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
}

// === ShortcutError ===

/// Errors related to accelerator registration.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// No binding with the given identifier exists.
    #[error("Shortcut not found: {0}")]
    NotFound(String),
    /// The accelerator is already bound on the same window.
    #[error("Shortcut conflict: {0}")]
    Conflict(String),
    /// The accelerator string could not be parsed.
    #[error("Invalid shortcut keys: {0}")]
    InvalidKeys(String),
}

// === ShellError ===

/// Errors surfaced by the platform while driving shell windows.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The platform refused to create a window.
    #[error("Window creation failed: {0}")]
    WindowCreation(String),
    /// The window is not (or no longer) known.
    #[error("Unknown window: {0}")]
    UnknownWindow(WindowId),
    /// Focusing the window failed.
    #[error("Focus failed: {0}")]
    Focus(String),
    /// Delivering a message to the window's content failed.
    #[error("Send failed: {0}")]
    Send(String),
}

// === PermissionError ===

/// Errors related to pending permission requests.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// Request with the given ID was not found.
    #[error("Permission request not found: {0}")]
    NotFound(String),
    /// The provided origin is invalid.
    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),
}

// === DownloadError ===

/// Errors related to download tracking.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Download with the given ID was not found.
    #[error("Download not found: {0}")]
    NotFound(String),
    /// The download has already completed.
    #[error("Download already completed: {0}")]
    AlreadyCompleted(String),
}
