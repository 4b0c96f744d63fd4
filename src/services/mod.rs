// Browser shell services
// Services provide persistence and startup support: window state, session recording, settings, crash recovery.

pub mod crash_recovery;
pub mod session_watcher;
pub mod settings_engine;
pub mod window_state_store;
