use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a live shell window, allocated by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Identifier of the content process hosting a window's shell UI or a page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "content#{}", self.0)
    }
}

/// Handle to a live shell window and the content process running its shell UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShellWindowHandle {
    pub window_id: WindowId,
    pub content_id: ContentId,
}

/// A page a window should reopen.
///
/// Persisted sessions may store either a bare URL string or a full object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "PageRepr")]
pub struct PageDescriptor {
    pub url: String,
    pub title: String,
    pub pinned: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr {
    Url(String),
    Full {
        url: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        pinned: bool,
    },
}

impl From<PageRepr> for PageDescriptor {
    fn from(repr: PageRepr) -> Self {
        match repr {
            PageRepr::Url(url) => PageDescriptor::new(url),
            PageRepr::Full { url, title, pinned } => PageDescriptor { url, title, pinned },
        }
    }
}

impl PageDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            pinned: false,
        }
    }
}

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// True when `other` lies entirely inside `self`, edges included.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// On-screen geometry of one window plus the pages it should reopen.
///
/// A missing position means "let the OS place it".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowState {
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(alias = "w")]
    pub width: u32,
    #[serde(alias = "h")]
    pub height: u32,
    #[serde(default)]
    pub pages: Vec<PageDescriptor>,
}

impl WindowState {
    /// Returns the window rectangle, or `None` when no explicit position is set.
    pub fn bounds(&self) -> Option<Rect> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Rect::new(x, y, self.width, self.height)),
            _ => None,
        }
    }

    /// Same geometry, no pages.
    pub fn without_pages(&self) -> Self {
        Self {
            pages: Vec::new(),
            ..self.clone()
        }
    }

    pub fn with_bounds(mut self, rect: Rect) -> Self {
        self.x = Some(rect.x);
        self.y = Some(rect.y);
        self.width = rect.width;
        self.height = rect.height;
        self
    }
}

/// Caller-supplied overrides merged over the stored defaults on window creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialWindowState {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub pages: Option<Vec<PageDescriptor>>,
}

impl PartialWindowState {
    pub fn merge_over(&self, defaults: &WindowState) -> WindowState {
        WindowState {
            x: self.x.or(defaults.x),
            y: self.y.or(defaults.y),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            pages: self.pages.clone().unwrap_or_else(|| defaults.pages.clone()),
        }
    }
}

impl From<WindowState> for PartialWindowState {
    fn from(state: WindowState) -> Self {
        Self {
            x: state.x,
            y: state.y,
            width: Some(state.width),
            height: Some(state.height),
            pages: Some(state.pages),
        }
    }
}

/// Per-window lifecycle as observed by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    /// Window exists, shell UI still loading.
    Created,
    /// Shell UI reported `shell-window:ready`.
    ContentReady,
    /// Shell UI reported `shell-window:pages-ready` and got its initial page list.
    PagesReady,
    Closed,
}

/// Deterministic chrome configuration applied to every shell window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowChrome {
    pub title: String,
    pub frameless: bool,
    pub hidden_titlebar: bool,
    pub fullscreenable: bool,
    pub min_width: u32,
    pub min_height: u32,
    pub icon_path: std::path::PathBuf,
}

/// Everything the platform needs to realise a shell window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub geometry: WindowState,
    pub chrome: WindowChrome,
}
