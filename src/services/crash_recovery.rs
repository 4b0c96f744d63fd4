//! Crash recovery and the startup restore decision.
//!
//! Gathers what startup needs (previous session, start page preference)
//! asynchronously, then decides between replaying the session and opening a
//! fresh window. The crash prompt is the only user-visible decision point.

use crate::services::settings_engine::{SettingsEngineTrait, START_PAGE_KEY, START_PAGE_PREVIOUS};
use crate::services::window_state_store::WindowStateStore;
use crate::types::session::{BrowsingSessionState, StartupDecision};

pub const RESTORE_LABEL: &str = "Restore Session";
pub const CANCEL_LABEL: &str = "Cancel";

/// Answer to the crash restore prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Restore,
    Cancel,
}

/// Modal prompt offering to restore after an unclean exit.
pub trait RestorePromptTrait {
    fn ask_restore(&mut self) -> PromptChoice;
}

/// Inputs to the restore decision, read once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupState {
    pub session: Option<BrowsingSessionState>,
    pub start_page: Option<String>,
}

impl StartupState {
    /// Reads the previous session and the start page preference.
    pub async fn load<S: SettingsEngineTrait>(store: &WindowStateStore, settings: &S) -> Self {
        let session = store.load().await;
        let start_page = settings
            .get(START_PAGE_KEY)
            .await
            .and_then(|v| v.as_str().map(str::to_string));
        Self { session, start_page }
    }

    pub fn always_restore(&self) -> bool {
        self.start_page.as_deref() == Some(START_PAGE_PREVIOUS)
    }

    /// True when a previous session exists and did not end cleanly.
    pub fn crashed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.clean_exit)
    }
}

/// Restore when the preference says so, or when the last run crashed and the user agrees.
///
/// The prompt is shown only in the second case.
pub fn decide(state: &StartupState, prompt: &mut dyn RestorePromptTrait) -> StartupDecision {
    if state.always_restore() {
        log::info!("Restoring previous session (start page preference)");
        return StartupDecision::Restore;
    }
    if state.crashed() {
        return match prompt.ask_restore() {
            PromptChoice::Restore => {
                log::info!("Restoring previous session after unclean exit");
                StartupDecision::Restore
            }
            PromptChoice::Cancel => {
                log::info!("User declined session restore");
                StartupDecision::Fresh
            }
        };
    }
    StartupDecision::Fresh
}

/// Native modal dialog; `Restore Session` is the default button.
#[cfg(feature = "gui")]
pub struct DialogPrompt;

#[cfg(feature = "gui")]
impl RestorePromptTrait for DialogPrompt {
    fn ask_restore(&mut self) -> PromptChoice {
        use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(crate::platform::WINDOW_TITLE)
            .set_description("The browser did not shut down correctly. Restore your previous session?")
            .set_buttons(MessageButtons::OkCancelCustom(
                RESTORE_LABEL.to_string(),
                CANCEL_LABEL.to_string(),
            ))
            .show();

        match result {
            MessageDialogResult::Ok => PromptChoice::Restore,
            MessageDialogResult::Custom(label) if label == RESTORE_LABEL => PromptChoice::Restore,
            _ => PromptChoice::Cancel,
        }
    }
}
