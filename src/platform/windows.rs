// Shell platform details for Windows
// Config and data: %APPDATA%/BrowserShell
// Resources:       next to the executable

use std::env;
use std::path::PathBuf;

fn appdata_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("BrowserShell")
}

pub fn get_config_dir() -> PathBuf {
    appdata_dir()
}

pub fn get_data_dir() -> PathBuf {
    appdata_dir()
}

pub fn resources_dir(exe_dir: PathBuf) -> PathBuf {
    exe_dir.join("resources")
}

pub const ICON_FILE: &str = "icons/icon.png";
// The shell UI draws its own title bar and window controls.
pub const FRAMELESS: bool = true;
pub const HIDDEN_TITLEBAR: bool = false;
pub const QUITS_WHEN_ALL_WINDOWS_CLOSED: bool = true;
