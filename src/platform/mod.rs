// Shell platform abstraction
// Provides per-OS paths, window chrome and lifecycle policy.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::env;
use std::path::PathBuf;

use crate::types::window::WindowChrome;

pub mod headless;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as os;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as os;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as os;

pub const WINDOW_TITLE: &str = "Browser Shell";
pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WIDTH: u32 = 320;
pub const MIN_HEIGHT: u32 = 500;

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/browser-shell` (or `$XDG_CONFIG_HOME/browser-shell`)
/// - **macOS**: `~/Library/Application Support/BrowserShell`
/// - **Windows**: `%APPDATA%/BrowserShell`
pub fn get_config_dir() -> PathBuf {
    os::get_config_dir()
}

/// Returns the platform-specific data directory, home of the session file.
///
/// - **Linux**: `~/.local/share/browser-shell` (or `$XDG_DATA_HOME/browser-shell`)
/// - **macOS**: `~/Library/Application Support/BrowserShell`
/// - **Windows**: `%APPDATA%/BrowserShell`
pub fn get_data_dir() -> PathBuf {
    os::get_data_dir()
}

/// Directory holding bundled assets (icons, shell UI).
pub fn get_resources_dir() -> PathBuf {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    os::resources_dir(exe_dir)
}

pub fn icon_path() -> PathBuf {
    get_resources_dir().join(os::ICON_FILE)
}

/// Whether the process should exit once the last shell window closes.
pub fn quits_when_all_windows_closed() -> bool {
    os::QUITS_WHEN_ALL_WINDOWS_CLOSED
}

/// Chrome configuration shared by every shell window on this platform.
pub fn window_chrome() -> WindowChrome {
    WindowChrome {
        title: WINDOW_TITLE.to_string(),
        frameless: os::FRAMELESS,
        hidden_titlebar: os::HIDDEN_TITLEBAR,
        fullscreenable: true,
        min_width: MIN_WIDTH,
        min_height: MIN_HEIGHT,
        icon_path: icon_path(),
    }
}
