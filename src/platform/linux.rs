// Shell platform details for Linux
// Config:    $XDG_CONFIG_HOME/browser-shell (~/.config/browser-shell)
// Data:      $XDG_DATA_HOME/browser-shell (~/.local/share/browser-shell)
// Resources: next to the executable

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "browser-shell";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
        _ => home_dir().join(".config").join(APP_DIR),
    }
}

pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
        _ => home_dir().join(".local").join("share").join(APP_DIR),
    }
}

pub fn resources_dir(exe_dir: PathBuf) -> PathBuf {
    exe_dir.join("resources")
}

pub const ICON_FILE: &str = "icons/icon256.png";
pub const FRAMELESS: bool = false;
pub const HIDDEN_TITLEBAR: bool = false;
pub const QUITS_WHEN_ALL_WINDOWS_CLOSED: bool = true;
