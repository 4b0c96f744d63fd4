// Browser shell state managers
// Managers handle stateful operations: windows, placement, shortcuts, window events, downloads, permissions.

pub mod display_placement;
pub mod download_manager;
pub mod permission_manager;
pub mod shortcut_manager;
pub mod window_coordinator;
pub mod window_events;
