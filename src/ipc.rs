//! Wire contract between the coordinator and the content processes.
//!
//! Every message crossing the process boundary is a JSON envelope
//! `{"channel": "...", "data": ...}`. Outbound messages are fire-and-forget;
//! inbound signals carry no sender field because the platform knows which
//! content process posted them.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::window::PageDescriptor;

/// Channel names, shared verbatim with the shell UI scripts.
pub mod channels {
    pub const NEW_WINDOW: &str = "new-window";
    pub const SHELL_WINDOW_READY: &str = "shell-window:ready";
    pub const PAGES_READY: &str = "shell-window:pages-ready";
    pub const SESSION_PAGES: &str = "session:pages";
    pub const KEY_DOWN: &str = "keybinding:keydown";
    pub const VIEW_SHOWN: &str = "view-shown";

    pub const LOAD_PINNED_TABS: &str = "load-pinned-tabs";
    pub const INITIALIZE: &str = "initialize";
    pub const SET_TAB: &str = "set-tab";
    pub const LAST_TAB: &str = "window:last-tab";
    pub const NEXT_TAB: &str = "window:next-tab";
    pub const PREV_TAB: &str = "window:prev-tab";
    pub const HISTORY_BACK: &str = "history:back";
    pub const HISTORY_FORWARD: &str = "history:forward";
    pub const LEAVE_PAGE_FULL_SCREEN: &str = "leave-page-full-screen";

    pub const SCROLL_TOUCH_BEGIN: &str = "scroll-touch-begin";
    pub const SCROLL_TOUCH_END: &str = "scroll-touch-end";
    pub const FOCUS: &str = "focus";
    pub const BLUR: &str = "blur";
    pub const ENTER_FULL_SCREEN: &str = "enter-full-screen";
    pub const LEAVE_FULL_SCREEN: &str = "leave-full-screen";
}

/// Commands sent to a window's shell UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    LoadPinnedTabs,
    Initialize(Vec<PageDescriptor>),
    SetTab(usize),
    LastTab,
    NextTab,
    PrevTab,
    HistoryBack,
    HistoryForward,
    LeavePageFullScreen,
}

impl ShellCommand {
    pub fn channel(&self) -> &'static str {
        match self {
            ShellCommand::LoadPinnedTabs => channels::LOAD_PINNED_TABS,
            ShellCommand::Initialize(_) => channels::INITIALIZE,
            ShellCommand::SetTab(_) => channels::SET_TAB,
            ShellCommand::LastTab => channels::LAST_TAB,
            ShellCommand::NextTab => channels::NEXT_TAB,
            ShellCommand::PrevTab => channels::PREV_TAB,
            ShellCommand::HistoryBack => channels::HISTORY_BACK,
            ShellCommand::HistoryForward => channels::HISTORY_FORWARD,
            ShellCommand::LeavePageFullScreen => channels::LEAVE_PAGE_FULL_SCREEN,
        }
    }

    fn data(&self) -> Value {
        match self {
            ShellCommand::Initialize(pages) => json!({ "pages": pages }),
            ShellCommand::SetTab(index) => json!({ "index": index }),
            _ => Value::Null,
        }
    }
}

/// Window-level notifications forwarded to the shell UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowNotification {
    /// Cursor position in window-local coordinates.
    ScrollTouchBegin { x: i32, y: i32 },
    ScrollTouchEnd,
    Focus,
    Blur,
    EnterFullScreen,
    LeaveFullScreen,
}

impl WindowNotification {
    pub fn channel(&self) -> &'static str {
        match self {
            WindowNotification::ScrollTouchBegin { .. } => channels::SCROLL_TOUCH_BEGIN,
            WindowNotification::ScrollTouchEnd => channels::SCROLL_TOUCH_END,
            WindowNotification::Focus => channels::FOCUS,
            WindowNotification::Blur => channels::BLUR,
            WindowNotification::EnterFullScreen => channels::ENTER_FULL_SCREEN,
            WindowNotification::LeaveFullScreen => channels::LEAVE_FULL_SCREEN,
        }
    }

    fn data(&self) -> Value {
        match self {
            WindowNotification::ScrollTouchBegin { x, y } => json!({ "x": x, "y": y }),
            _ => Value::Null,
        }
    }
}

/// Anything the coordinator sends to a window.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    Command(ShellCommand),
    Notification(WindowNotification),
}

impl From<ShellCommand> for OutboundMessage {
    fn from(command: ShellCommand) -> Self {
        OutboundMessage::Command(command)
    }
}

impl From<WindowNotification> for OutboundMessage {
    fn from(notification: WindowNotification) -> Self {
        OutboundMessage::Notification(notification)
    }
}

impl OutboundMessage {
    pub fn channel(&self) -> &'static str {
        match self {
            OutboundMessage::Command(c) => c.channel(),
            OutboundMessage::Notification(n) => n.channel(),
        }
    }

    pub fn to_json(&self) -> Value {
        let data = match self {
            OutboundMessage::Command(c) => c.data(),
            OutboundMessage::Notification(n) => n.data(),
        };
        json!({ "channel": self.channel(), "data": data })
    }

    /// Script delivering this message to the shell UI's receive hook.
    pub fn to_script(&self) -> String {
        format!(
            "if(window.__shell_receive)window.__shell_receive({})",
            self.to_json()
        )
    }
}

/// A key event as seen by the shell UI or an embedded page view.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Sets the platform's primary modifier (Cmd on macOS, Ctrl elsewhere).
    pub fn primary(self) -> Self {
        if cfg!(target_os = "macos") {
            self.meta()
        } else {
            self.ctrl()
        }
    }
}

/// Signals posted by a content process.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSignal {
    NewWindow,
    Ready,
    PagesReady,
    /// The shell UI's current page list changed.
    PagesChanged(Vec<PageDescriptor>),
    /// A key event intercepted before page content saw it.
    KeyDown(KeyInput),
    /// The shell UI switched the visible embedded page view.
    ViewShown { view_id: u64 },
}

#[derive(Deserialize)]
struct Envelope {
    channel: String,
    #[serde(default)]
    data: Value,
}

impl ContentSignal {
    /// Parses an inbound envelope. Unknown channels and malformed payloads yield `None`.
    pub fn parse(message: &str) -> Option<Self> {
        let envelope: Envelope = serde_json::from_str(message).ok()?;
        match envelope.channel.as_str() {
            channels::NEW_WINDOW => Some(ContentSignal::NewWindow),
            channels::SHELL_WINDOW_READY => Some(ContentSignal::Ready),
            channels::PAGES_READY => Some(ContentSignal::PagesReady),
            channels::SESSION_PAGES => {
                let pages = envelope.data.get("pages")?.clone();
                serde_json::from_value(pages)
                    .ok()
                    .map(ContentSignal::PagesChanged)
            }
            channels::KEY_DOWN => serde_json::from_value(envelope.data)
                .ok()
                .map(ContentSignal::KeyDown),
            channels::VIEW_SHOWN => {
                let view_id = envelope.data.get("id")?.as_u64()?;
                Some(ContentSignal::ViewShown { view_id })
            }
            _ => None,
        }
    }
}
