// Shell platform details for macOS
// Config and data: ~/Library/Application Support/BrowserShell
// Resources:       <bundle>/Contents/Resources

use std::env;
use std::path::PathBuf;

fn support_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join("BrowserShell")
}

pub fn get_config_dir() -> PathBuf {
    support_dir()
}

pub fn get_data_dir() -> PathBuf {
    support_dir()
}

/// The executable lives in `Contents/MacOS`; resources sit beside it.
pub fn resources_dir(exe_dir: PathBuf) -> PathBuf {
    match exe_dir.parent() {
        Some(contents) => contents.join("Resources"),
        None => exe_dir.join("resources"),
    }
}

pub const ICON_FILE: &str = "icons/icon.png";
pub const FRAMELESS: bool = false;
pub const HIDDEN_TITLEBAR: bool = true;
// Apps stay alive with no windows until the user quits explicitly.
pub const QUITS_WHEN_ALL_WINDOWS_CLOSED: bool = false;
