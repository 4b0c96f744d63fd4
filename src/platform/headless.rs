// In-memory shell platform
// Backs the console demo and tests: windows are records, sends are captured.

use std::collections::BTreeMap;

use crate::ipc::OutboundMessage;
use crate::managers::window_coordinator::ShellPlatformTrait;
use crate::types::errors::ShellError;
use crate::types::window::{ContentId, Rect, ShellWindowHandle, WindowId, WindowSpec};

/// One window opened on the headless platform.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub handle: ShellWindowHandle,
    pub spec: WindowSpec,
    pub ui_loaded: bool,
    pub page_view: Option<ContentId>,
    pub open: bool,
}

/// Platform without native windows.
#[derive(Debug)]
pub struct HeadlessPlatform {
    windows: BTreeMap<WindowId, HeadlessWindow>,
    displays: Option<Vec<Rect>>,
    focused: Option<WindowId>,
    sent: Vec<(WindowId, OutboundMessage)>,
    next_id: u64,
    fail_next_open: bool,
    quit_requested: bool,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(Some(vec![Rect::new(0, 0, 1920, 1080)]))
    }
}

impl HeadlessPlatform {
    pub fn new(displays: Option<Vec<Rect>>) -> Self {
        Self {
            windows: BTreeMap::new(),
            displays,
            focused: None,
            sent: Vec::new(),
            next_id: 0,
            fail_next_open: false,
            quit_requested: false,
        }
    }

    pub fn set_displays(&mut self, displays: Option<Vec<Rect>>) {
        self.displays = displays;
    }

    /// Makes the next `open_window` call fail.
    pub fn fail_next_open(&mut self) {
        self.fail_next_open = true;
    }

    pub fn set_focused(&mut self, window: Option<WindowId>) {
        self.focused = window;
    }

    /// Marks the native window closed, as the OS would before reporting it.
    pub fn close(&mut self, window: WindowId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.open = false;
        }
        if self.focused == Some(window) {
            self.focused = None;
        }
    }

    /// Attaches an embedded page view and returns its content id.
    pub fn show_page_view(&mut self, window: WindowId) -> Option<ContentId> {
        self.next_id += 1;
        let content = ContentId(self.next_id);
        let w = self.windows.get_mut(&window)?;
        w.page_view = Some(content);
        Some(content)
    }

    pub fn window(&self, window: WindowId) -> Option<&HeadlessWindow> {
        self.windows.get(&window)
    }

    pub fn opened(&self) -> Vec<&HeadlessWindow> {
        self.windows.values().collect()
    }

    pub fn sent(&self) -> &[(WindowId, OutboundMessage)] {
        &self.sent
    }

    /// Messages sent to `window`, by channel name.
    pub fn channels_sent_to(&self, window: WindowId) -> Vec<&'static str> {
        self.sent
            .iter()
            .filter(|(w, _)| *w == window)
            .map(|(_, m)| m.channel())
            .collect()
    }

    pub fn take_sent(&mut self) -> Vec<(WindowId, OutboundMessage)> {
        std::mem::take(&mut self.sent)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn live(&self, window: WindowId) -> Result<&HeadlessWindow, ShellError> {
        self.windows
            .get(&window)
            .filter(|w| w.open)
            .ok_or(ShellError::UnknownWindow(window))
    }
}

impl ShellPlatformTrait for HeadlessPlatform {
    fn open_window(&mut self, spec: &WindowSpec) -> Result<ShellWindowHandle, ShellError> {
        if std::mem::take(&mut self.fail_next_open) {
            return Err(ShellError::WindowCreation("headless open refused".to_string()));
        }
        self.next_id += 1;
        let window_id = WindowId(self.next_id);
        self.next_id += 1;
        let content_id = ContentId(self.next_id);

        let handle = ShellWindowHandle { window_id, content_id };
        self.windows.insert(
            window_id,
            HeadlessWindow {
                handle,
                spec: spec.clone(),
                ui_loaded: false,
                page_view: None,
                open: true,
            },
        );
        Ok(handle)
    }

    fn load_shell_ui(&mut self, window: WindowId) -> Result<(), ShellError> {
        self.live(window)?;
        if let Some(w) = self.windows.get_mut(&window) {
            w.ui_loaded = true;
        }
        Ok(())
    }

    fn send(&mut self, window: WindowId, message: &OutboundMessage) -> Result<(), ShellError> {
        self.live(window)?;
        self.sent.push((window, message.clone()));
        Ok(())
    }

    fn focus(&mut self, window: WindowId) -> Result<(), ShellError> {
        self.live(window)
            .map_err(|_| ShellError::Focus(format!("{} is not open", window)))?;
        self.focused = Some(window);
        Ok(())
    }

    fn focused_window(&self) -> Option<WindowId> {
        self.focused
    }

    fn displays(&self) -> Option<Vec<Rect>> {
        self.displays.clone()
    }

    fn content_origin(&self, window: WindowId) -> Option<(i32, i32)> {
        let geometry = &self.live(window).ok()?.spec.geometry;
        Some((geometry.x.unwrap_or(0), geometry.y.unwrap_or(0)))
    }

    fn visible_page_view(&self, window: WindowId) -> Option<ContentId> {
        self.live(window).ok()?.page_view
    }

    fn quit(&mut self) {
        self.quit_requested = true;
    }
}
