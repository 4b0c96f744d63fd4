use serde::{Deserialize, Deserializer, Serialize};

use super::window::WindowState;

/// Snapshot of the whole browsing session, as persisted on disk.
///
/// `windows` keeps one slot per recorded entry; `null` or malformed entries
/// deserialize to `None` instead of failing the whole document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowsingSessionState {
    #[serde(default)]
    pub clean_exit: bool,
    #[serde(default, deserialize_with = "lenient_windows")]
    pub windows: Vec<Option<WindowState>>,
}

fn lenient_windows<'de, D>(deserializer: D) -> Result<Vec<Option<WindowState>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|value| serde_json::from_value(value).ok())
        .collect())
}

impl BrowsingSessionState {
    pub fn new(clean_exit: bool, windows: Vec<WindowState>) -> Self {
        Self {
            clean_exit,
            windows: windows.into_iter().map(Some).collect(),
        }
    }

    /// Recorded windows that survived parsing, in recorded order.
    pub fn valid_windows(&self) -> impl Iterator<Item = &WindowState> {
        self.windows.iter().flatten()
    }

    /// Geometry of the first recorded window. `None` when the list is empty or
    /// its first entry was null or malformed.
    pub fn first_window(&self) -> Option<&WindowState> {
        self.windows.first().and_then(Option::as_ref)
    }
}

/// Outcome of the startup restore decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupDecision {
    /// Replay every recorded window.
    Restore,
    /// Open one window at the previous first window's geometry, without its pages.
    Fresh,
}
