//! Shell Window Lifecycle Coordinator.
//!
//! Creates and destroys shell windows, keeps the active-window registry,
//! restores sessions at startup and routes content-process signals, native
//! window events and accelerators to the right window.
//!
//! All state lives in [`ShellCoordinator`] and is mutated on the control
//! thread only. The platform (real windows, webviews, displays) is passed in
//! per call through [`ShellPlatformTrait`], so the event loop can lend its
//! window target for the duration of one callback.

use std::collections::BTreeMap;

use crate::ipc::{ContentSignal, KeyInput, OutboundMessage, ShellCommand};
use crate::managers::display_placement::ensure_visible_on_some_display;
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::permission_manager::{PermissionManager, PermissionManagerTrait};
use crate::managers::shortcut_manager::{
    default_accelerators, BindingId, ShortcutManager, ShortcutManagerTrait, FULL_SCREEN_ESCAPE,
};
use crate::managers::window_events::{translate, EventAction, NativeWindowEvent};
use crate::services::crash_recovery::{decide, RestorePromptTrait, StartupState};
use crate::services::session_watcher::{SessionWatcher, SessionWatcherTrait};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::window_state_store::WindowStateStore;
use crate::types::errors::ShellError;
use crate::types::session::{BrowsingSessionState, StartupDecision};
use crate::types::window::{
    ContentId, PageDescriptor, PartialWindowState, Rect, ShellWindowHandle, WindowChrome,
    WindowId, WindowPhase, WindowSpec, WindowState,
};

/// Platform seam: everything the coordinator needs from the windowing system.
pub trait ShellPlatformTrait {
    /// Creates a native window with its shell content process.
    fn open_window(&mut self, spec: &WindowSpec) -> Result<ShellWindowHandle, ShellError>;
    /// Starts loading the shell UI into the window; completes asynchronously.
    fn load_shell_ui(&mut self, window: WindowId) -> Result<(), ShellError>;
    /// Fire-and-forget delivery to the window's shell UI.
    fn send(&mut self, window: WindowId, message: &OutboundMessage) -> Result<(), ShellError>;
    fn focus(&mut self, window: WindowId) -> Result<(), ShellError>;
    /// The OS-reported focused window, if the application has focus.
    fn focused_window(&self) -> Option<WindowId>;
    /// Bounds of every attached display, or `None` if enumeration failed.
    fn displays(&self) -> Option<Vec<Rect>>;
    /// Screen position of the window's content area.
    fn content_origin(&self, window: WindowId) -> Option<(i32, i32)>;
    /// Content process of the non-hidden embedded page view, if any.
    fn visible_page_view(&self, window: WindowId) -> Option<ContentId>;
    fn quit(&mut self);
}

/// Process-wide window bookkeeping.
///
/// `first_window_id` is set iff it identifies the first window created since
/// the count last dropped to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveWindowRegistry {
    num_active_windows: usize,
    first_window_id: Option<ContentId>,
    pinned_tabs_loaded: bool,
}

impl ActiveWindowRegistry {
    pub fn num_active_windows(&self) -> usize {
        self.num_active_windows
    }

    pub fn first_window_id(&self) -> Option<ContentId> {
        self.first_window_id
    }

    pub fn pinned_tabs_loaded(&self) -> bool {
        self.pinned_tabs_loaded
    }

    fn window_created(&mut self, content: ContentId) {
        self.num_active_windows += 1;
        if self.first_window_id.is_none() {
            self.first_window_id = Some(content);
        }
    }

    /// Returns true when the last window closed.
    fn window_closed(&mut self) -> bool {
        self.num_active_windows = self.num_active_windows.saturating_sub(1);
        if self.num_active_windows == 0 {
            self.first_window_id = None;
            self.pinned_tabs_loaded = false;
            true
        } else {
            false
        }
    }
}

/// Application-level lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The app was reactivated, e.g. a dock icon click.
    Reactivate,
    BeforeQuit,
}

/// Static configuration of the coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub defaults: WindowState,
    pub chrome: WindowChrome,
    pub quit_when_all_windows_closed: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            defaults: WindowStateStore::default_window_state(),
            chrome: crate::platform::window_chrome(),
            quit_when_all_windows_closed: crate::platform::quits_when_all_windows_closed(),
        }
    }
}

#[derive(Debug)]
struct WindowRecord {
    handle: ShellWindowHandle,
    phase: WindowPhase,
    initial_pages: Vec<PageDescriptor>,
    bindings: Vec<BindingId>,
    escape_binding: Option<BindingId>,
    created_seq: u64,
}

pub struct ShellCoordinator {
    config: CoordinatorConfig,
    registry: ActiveWindowRegistry,
    windows: BTreeMap<WindowId, WindowRecord>,
    next_seq: u64,
    quitting: bool,
    shortcuts: ShortcutManager,
    session: SessionWatcher,
    downloads: DownloadManager,
    permissions: PermissionManager,
}

impl ShellCoordinator {
    pub fn new(config: CoordinatorConfig, session: SessionWatcher) -> Self {
        Self {
            config,
            registry: ActiveWindowRegistry::default(),
            windows: BTreeMap::new(),
            next_seq: 0,
            quitting: false,
            shortcuts: ShortcutManager::new(),
            session,
            downloads: DownloadManager::new(),
            permissions: PermissionManager::new(),
        }
    }

    pub fn registry(&self) -> &ActiveWindowRegistry {
        &self.registry
    }

    pub fn num_active_windows(&self) -> usize {
        self.registry.num_active_windows
    }

    /// Live windows in creation order.
    pub fn windows(&self) -> Vec<ShellWindowHandle> {
        let mut records: Vec<&WindowRecord> = self.windows.values().collect();
        records.sort_by_key(|r| r.created_seq);
        records.into_iter().map(|r| r.handle).collect()
    }

    /// Lifecycle phase; windows no longer tracked report `Closed`.
    pub fn window_phase(&self, window: WindowId) -> WindowPhase {
        self.windows
            .get(&window)
            .map(|r| r.phase)
            .unwrap_or(WindowPhase::Closed)
    }

    pub fn shortcuts(&self) -> &ShortcutManager {
        &self.shortcuts
    }

    pub fn session(&self) -> &SessionWatcher {
        &self.session
    }

    pub fn downloads_mut(&mut self) -> &mut DownloadManager {
        &mut self.downloads
    }

    pub fn permissions_mut(&mut self) -> &mut PermissionManager {
        &mut self.permissions
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    fn record_by_content(&self, content: ContentId) -> Option<&WindowRecord> {
        self.windows.values().find(|r| r.handle.content_id == content)
    }

    fn send_logged(platform: &mut dyn ShellPlatformTrait, window: WindowId, message: OutboundMessage) {
        if let Err(e) = platform.send(window, &message) {
            log::debug!("Dropped '{}' for {}: {}", message.channel(), window, e);
        }
    }

    // ─── Window creation ───

    /// Creates a shell window, merging `overrides` over the default geometry.
    ///
    /// Returns once the native window exists; the shell UI loads asynchronously
    /// and reports back through [`ContentSignal::Ready`] / [`ContentSignal::PagesReady`].
    pub fn create_window(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        overrides: Option<PartialWindowState>,
    ) -> Result<ShellWindowHandle, ShellError> {
        let requested = overrides.unwrap_or_default().merge_over(&self.config.defaults);
        let displays = platform.displays();
        let geometry =
            ensure_visible_on_some_display(requested, &self.config.defaults, displays.as_deref());

        let spec = WindowSpec {
            geometry: geometry.clone(),
            chrome: self.config.chrome.clone(),
        };
        let handle = platform.open_window(&spec)?;
        let window = handle.window_id;

        self.downloads.register_listener(&handle);
        self.session.watch_window(&handle, geometry.clone());

        if let Err(e) = platform.load_shell_ui(window) {
            log::error!("Failed to load shell UI into {}: {}", window, e);
        }

        self.registry.window_created(handle.content_id);
        let bindings = self.bind_accelerators(window);

        self.next_seq += 1;
        self.windows.insert(
            window,
            WindowRecord {
                handle,
                phase: WindowPhase::Created,
                initial_pages: geometry.pages,
                bindings,
                escape_binding: None,
                created_seq: self.next_seq,
            },
        );

        log::info!(
            "Created {} ({}), active windows: {}",
            window,
            handle.content_id,
            self.registry.num_active_windows
        );
        Ok(handle)
    }

    fn bind_accelerators(&mut self, window: WindowId) -> Vec<BindingId> {
        default_accelerators()
            .into_iter()
            .filter_map(|(keys, command)| {
                match self.shortcuts.register_shortcut(window, keys, command) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        log::warn!("Skipping accelerator {} on {}: {}", keys, window, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Creates a window only when none is open.
    pub fn ensure_one_window_exists(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
    ) -> Result<Option<ShellWindowHandle>, ShellError> {
        if self.registry.num_active_windows == 0 {
            self.create_window(platform, None).map(Some)
        } else {
            Ok(None)
        }
    }

    // ─── Queries ───

    /// The focused window, else the most recently created one still open.
    pub fn active_window(&self, platform: &dyn ShellPlatformTrait) -> Option<ShellWindowHandle> {
        platform
            .focused_window()
            .and_then(|id| self.windows.get(&id))
            .or_else(|| self.windows.values().max_by_key(|r| r.created_seq))
            .map(|r| r.handle)
    }

    /// Content of the visible embedded page view in `window` (default: the active window).
    pub fn focused_web_contents(
        &self,
        platform: &dyn ShellPlatformTrait,
        window: Option<ShellWindowHandle>,
    ) -> Option<ContentId> {
        let window = window.or_else(|| self.active_window(platform))?;
        platform.visible_page_view(window.window_id)
    }

    // ─── Content signals ───

    /// Dispatches a signal posted by the content process `sender`.
    pub fn handle_content_signal(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        sender: ShellWindowHandle,
        signal: ContentSignal,
    ) {
        match signal {
            ContentSignal::NewWindow => {
                if let Err(e) = self.create_window(platform, None) {
                    log::error!("Failed to open requested window: {}", e);
                }
            }
            ContentSignal::Ready => {
                self.handle_ready(platform, sender.content_id);
            }
            ContentSignal::PagesReady => {
                self.handle_pages_ready(platform, sender);
            }
            ContentSignal::PagesChanged(pages) => {
                if self.windows.get(&sender.window_id).map(|r| r.handle) == Some(sender) {
                    self.session.update_pages(sender.window_id, pages);
                }
            }
            ContentSignal::KeyDown(input) => {
                self.handle_key_input(platform, sender.window_id, &input);
            }
            ContentSignal::ViewShown { .. } => {}
        }
    }

    /// Handles `shell-window:ready`. Only the first window since the registry was
    /// empty loads pinned tabs, once. Returns true if pinned tabs were requested.
    pub fn handle_ready(&mut self, platform: &mut dyn ShellPlatformTrait, sender: ContentId) -> bool {
        let Some(window) = self.record_by_content(sender).map(|r| r.handle.window_id) else {
            log::debug!("Ignoring ready from stale {}", sender);
            return false;
        };
        if let Some(record) = self.windows.get_mut(&window) {
            if record.phase == WindowPhase::Created {
                record.phase = WindowPhase::ContentReady;
            }
        }

        if self.registry.first_window_id != Some(sender) || self.registry.pinned_tabs_loaded {
            return false;
        }

        self.registry.pinned_tabs_loaded = true;
        Self::send_logged(platform, window, ShellCommand::LoadPinnedTabs.into());
        // The window may already be gone.
        if let Err(e) = platform.focus(window) {
            log::debug!("Ignoring focus failure for {}: {}", window, e);
        }
        true
    }

    /// Handles `shell-window:pages-ready` from exactly the window's own content.
    /// Returns true if the window's listener accepted the signal.
    pub fn handle_pages_ready(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        sender: ShellWindowHandle,
    ) -> bool {
        let Some(record) = self
            .windows
            .get_mut(&sender.window_id)
            .filter(|r| r.handle == sender)
        else {
            log::debug!("Ignoring pages-ready from {} ({})", sender.window_id, sender.content_id);
            return false;
        };

        record.phase = WindowPhase::PagesReady;
        if !record.initial_pages.is_empty() {
            let pages = record.initial_pages.clone();
            Self::send_logged(platform, sender.window_id, ShellCommand::Initialize(pages).into());
        }
        true
    }

    // ─── Input and native events ───

    /// Resolves a forwarded key event against the window's accelerators.
    pub fn handle_key_input(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        window: WindowId,
        input: &KeyInput,
    ) -> bool {
        match self.shortcuts.resolve(window, input) {
            Some(command) => {
                Self::send_logged(platform, window, command.into());
                true
            }
            None => false,
        }
    }

    pub fn handle_native_event(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        window: WindowId,
        event: &NativeWindowEvent,
    ) {
        if !self.windows.contains_key(&window) {
            return;
        }
        let origin = platform.content_origin(window).unwrap_or((0, 0));

        for action in translate(event, origin) {
            match action {
                EventAction::Send(message) => Self::send_logged(platform, window, message),
                EventAction::BindFullScreenEscape => self.bind_escape(window),
                EventAction::UnbindFullScreenEscape => self.unbind_escape(window),
            }
        }
    }

    fn bind_escape(&mut self, window: WindowId) {
        let Some(record) = self.windows.get_mut(&window) else {
            return;
        };
        if record.escape_binding.is_some() {
            return;
        }
        match self
            .shortcuts
            .register_shortcut(window, FULL_SCREEN_ESCAPE, ShellCommand::LeavePageFullScreen)
        {
            Ok(id) => record.escape_binding = Some(id),
            Err(e) => log::warn!("Failed to bind Escape on {}: {}", window, e),
        }
    }

    fn unbind_escape(&mut self, window: WindowId) {
        let Some(id) = self
            .windows
            .get_mut(&window)
            .and_then(|r| r.escape_binding.take())
        else {
            return;
        };
        if let Err(e) = self.shortcuts.unregister_shortcut(id) {
            log::warn!("Failed to unbind Escape on {}: {}", window, e);
        }
    }

    pub fn handle_geometry_changed(&mut self, window: WindowId, bounds: Rect) {
        if self.windows.contains_key(&window) {
            self.session.update_geometry(window, bounds);
        }
    }

    // ─── Window close and app lifecycle ───

    /// Tears down a closed window. Closing an unknown or already closed window is a no-op.
    ///
    /// Returns true when this was the last window.
    pub fn handle_window_closed(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        window: WindowId,
    ) -> bool {
        let Some(mut record) = self.windows.remove(&window) else {
            return false;
        };
        record.phase = WindowPhase::Closed;

        for id in record.bindings.drain(..).chain(record.escape_binding.take()) {
            if let Err(e) = self.shortcuts.unregister_shortcut(id) {
                log::warn!("Failed to release accelerator on {}: {}", window, e);
            }
        }
        let leftover = self.shortcuts.unregister_window(window);
        if leftover > 0 {
            log::warn!("Released {} untracked accelerator(s) on {}", leftover, window);
        }

        self.permissions.deny_all_requests(window);
        self.downloads.unregister_listener(window);

        // The last window of a quitting app stays in the saved session.
        let quits_after = self.registry.num_active_windows == 1
            && self.config.quit_when_all_windows_closed;
        if quits_after {
            self.session.stop_recording();
        }
        self.session.unwatch_window(window);

        let now_empty = self.registry.window_closed();
        log::info!(
            "Closed {}, active windows: {}",
            window,
            self.registry.num_active_windows
        );

        if now_empty {
            self.permissions.clear_released();
        }
        if now_empty && self.config.quit_when_all_windows_closed {
            log::info!("All windows closed, quitting");
            self.before_quit();
            platform.quit();
        }
        now_empty
    }

    pub fn handle_lifecycle(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        event: LifecycleEvent,
    ) -> Result<(), ShellError> {
        match event {
            LifecycleEvent::Reactivate => self.ensure_one_window_exists(platform).map(|_| ()),
            LifecycleEvent::BeforeQuit => {
                self.before_quit();
                Ok(())
            }
        }
    }

    /// Freezes and flushes the session. Idempotent.
    pub fn before_quit(&mut self) {
        if self.quitting {
            return;
        }
        self.quitting = true;
        self.session.stop_recording();
        self.session.exit();
    }

    // ─── Startup ───

    /// Replays every recorded window, skipping null or malformed entries.
    /// Opens one default window when nothing could be replayed.
    pub fn restore_session(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        session: Option<&BrowsingSessionState>,
    ) -> Vec<ShellWindowHandle> {
        let recorded: Vec<WindowState> = session
            .map(|s| s.valid_windows().cloned().collect())
            .unwrap_or_default();

        let mut handles = Vec::new();
        for state in recorded {
            match self.create_window(platform, Some(state.into())) {
                Ok(handle) => handles.push(handle),
                Err(e) => log::error!("Failed to restore window: {}", e),
            }
        }

        if handles.is_empty() {
            match self.create_window(platform, None) {
                Ok(handle) => handles.push(handle),
                Err(e) => log::error!("Failed to open default window: {}", e),
            }
        }
        handles
    }

    /// Opens one window at the previous session's first geometry, without its pages.
    pub fn open_fresh_window(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        session: Option<&BrowsingSessionState>,
    ) -> Result<ShellWindowHandle, ShellError> {
        let overrides = session
            .and_then(|s| s.first_window())
            .map(|w| PartialWindowState::from(w.without_pages()));
        self.create_window(platform, overrides)
    }

    /// Decides restore-vs-fresh and opens the initial windows.
    pub fn apply_startup(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        state: &StartupState,
        prompt: &mut dyn RestorePromptTrait,
    ) -> StartupDecision {
        let decision = decide(state, prompt);
        match decision {
            StartupDecision::Restore => {
                self.restore_session(platform, state.session.as_ref());
            }
            StartupDecision::Fresh => {
                if let Err(e) = self.open_fresh_window(platform, state.session.as_ref()) {
                    log::error!("Failed to open initial window: {}", e);
                }
            }
        }
        decision
    }

    /// Full startup: read the previous session and preferences, then open windows.
    pub async fn setup<S: SettingsEngineTrait>(
        &mut self,
        platform: &mut dyn ShellPlatformTrait,
        store: &WindowStateStore,
        settings: &S,
        prompt: &mut dyn RestorePromptTrait,
    ) -> StartupDecision {
        let state = StartupState::load(store, settings).await;
        self.apply_startup(platform, &state, prompt)
    }
}
