//! App Core for the browser shell.
//!
//! Central struct holding the window coordinator and the services it starts from,
//! managing application lifecycle.

use std::future::Future;
use std::path::PathBuf;

use crate::managers::window_coordinator::{CoordinatorConfig, ShellCoordinator, ShellPlatformTrait};
use crate::services::crash_recovery::{RestorePromptTrait, StartupState};
use crate::services::session_watcher::SessionWatcher;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::window_state_store::WindowStateStore;
use crate::types::session::StartupDecision;

/// Paths overriding the platform defaults, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct AppPaths {
    pub session_file: Option<PathBuf>,
    pub settings_file: Option<String>,
}

/// Central application struct.
pub struct App {
    pub window_state_store: WindowStateStore,
    pub settings_engine: SettingsEngine,
    pub coordinator: ShellCoordinator,
}

impl App {
    /// Creates the app with platform window defaults.
    pub fn new(paths: AppPaths) -> Self {
        Self::with_config(paths, CoordinatorConfig::default())
    }

    pub fn with_config(paths: AppPaths, config: CoordinatorConfig) -> Self {
        let window_state_store = WindowStateStore::new(paths.session_file);
        let settings_engine = SettingsEngine::new(paths.settings_file);
        let session_watcher = SessionWatcher::new(window_state_store.clone());

        log::debug!(
            "Session file: {}, settings file: {}",
            window_state_store.path().display(),
            settings_engine.get_config_path()
        );

        Self {
            window_state_store,
            settings_engine,
            coordinator: ShellCoordinator::new(config, session_watcher),
        }
    }

    /// Startup sequence: read the previous session and start page preference,
    /// then restore or open a fresh window.
    pub async fn startup(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        prompt: &mut dyn RestorePromptTrait,
    ) -> StartupDecision {
        let decision = self
            .coordinator
            .setup(platform, &self.window_state_store, &self.settings_engine, prompt)
            .await;
        log::info!(
            "Startup finished ({:?}), {} window(s) open",
            decision,
            self.coordinator.num_active_windows()
        );
        decision
    }

    /// Reads startup inputs off the control thread, for event loops that cannot await.
    pub fn startup_loader(&self) -> impl Future<Output = StartupState> + Send + 'static {
        let store = self.window_state_store.clone();
        let settings = SettingsEngine::new(Some(self.settings_engine.get_config_path().to_string()));
        async move { StartupState::load(&store, &settings).await }
    }

    /// Shutdown sequence: stop recording and flush the session.
    pub fn shutdown(&mut self) {
        self.coordinator.before_quit();
    }
}
