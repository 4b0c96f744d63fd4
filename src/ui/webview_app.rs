//! Native shell windows using `wry` + `tao`.
//!
//! Architecture:
//! - Every shell window is a tao window hosting one wry webview that loads the
//!   shell UI from the `shell://` custom protocol.
//! - IPC from JS → Rust via `window.ipc.postMessage()`; messages are parsed into
//!   [`ContentSignal`]s and routed through the event loop proxy, tagged with the
//!   window that posted them.
//! - Rust → JS via `evaluate_script()` calling the shell UI's receive hook.
//! - Native window events (move, resize, focus, touch, mouse buttons, close)
//!   are forwarded to the coordinator on the event loop thread.

use std::borrow::Cow;
use std::collections::HashMap;

use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Icon, Window, WindowBuilder};
use wry::{WebView, WebViewBuilder};

use crate::app::{App, AppPaths};
use crate::ipc::{ContentSignal, OutboundMessage};
use crate::managers::shortcut_manager::reserved_shortcuts_script;
use crate::managers::window_coordinator::{LifecycleEvent, ShellPlatformTrait};
use crate::managers::window_events::{MouseNavButton, NativeWindowEvent};
use crate::services::crash_recovery::{DialogPrompt, StartupState};
use crate::types::errors::ShellError;
use crate::types::window::{ContentId, Rect, ShellWindowHandle, WindowId, WindowSpec};

const SHELL_HTML: &str = include_str!("../../resources/ui/shell.html");
const SHELL_URL: &str = "shell://localhost/";

#[derive(Debug)]
enum UserEvent {
    StartupLoaded(StartupState),
    Signal {
        sender: ShellWindowHandle,
        signal: ContentSignal,
    },
}

struct NativeWindow {
    window: Window,
    webview: WebView,
    page_view: Option<ContentId>,
    full_screen: bool,
}

/// Native windows owned by the event loop, keyed by shell window id.
struct NativeWindows {
    windows: HashMap<WindowId, NativeWindow>,
    by_tao: HashMap<tao::window::WindowId, WindowId>,
    proxy: EventLoopProxy<UserEvent>,
    focused: Option<WindowId>,
    next_id: u64,
    quit_requested: bool,
}

impl NativeWindows {
    fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            windows: HashMap::new(),
            by_tao: HashMap::new(),
            proxy,
            focused: None,
            next_id: 0,
            quit_requested: false,
        }
    }

    fn shell_id(&self, id: tao::window::WindowId) -> Option<WindowId> {
        self.by_tao.get(&id).copied()
    }

    fn get(&self, window: WindowId) -> Result<&NativeWindow, ShellError> {
        self.windows.get(&window).ok_or(ShellError::UnknownWindow(window))
    }

    /// Drops the native window and its webview.
    fn remove(&mut self, window: WindowId) {
        if let Some(native) = self.windows.remove(&window) {
            self.by_tao.remove(&native.window.id());
        }
        if self.focused == Some(window) {
            self.focused = None;
        }
    }

    /// Current logical bounds: outer position, inner size.
    fn bounds(&self, window: WindowId) -> Option<Rect> {
        let native = self.windows.get(&window)?;
        let scale = native.window.scale_factor();
        let position: LogicalPosition<i32> = native.window.outer_position().ok()?.to_logical(scale);
        let size: LogicalSize<u32> = native.window.inner_size().to_logical(scale);
        Some(Rect::new(position.x, position.y, size.width, size.height))
    }

    /// Returns the new state if the window entered or left full-screen.
    fn sync_full_screen(&mut self, window: WindowId) -> Option<bool> {
        let native = self.windows.get_mut(&window)?;
        let now = native.window.fullscreen().is_some();
        if now == native.full_screen {
            return None;
        }
        native.full_screen = now;
        Some(now)
    }
}

/// [`ShellPlatformTrait`] over tao/wry, valid for one event loop callback.
struct TaoPlatform<'a> {
    target: &'a EventLoopWindowTarget<UserEvent>,
    native: &'a mut NativeWindows,
}

fn load_icon(path: &std::path::Path) -> Option<Icon> {
    let image = match image::open(path) {
        Ok(image) => image.into_rgba8(),
        Err(e) => {
            log::debug!("No window icon at {}: {}", path.display(), e);
            return None;
        }
    };
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).ok()
}

fn shell_ui_response() -> wry::http::Response<Cow<'static, [u8]>> {
    wry::http::Response::builder()
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Cow::Borrowed(SHELL_HTML.as_bytes()))
        .unwrap_or_else(|_| wry::http::Response::new(Cow::Borrowed(&[][..])))
}

impl TaoPlatform<'_> {
    fn build_window(&self, spec: &WindowSpec) -> Result<Window, ShellError> {
        let chrome = &spec.chrome;
        let geometry = &spec.geometry;

        let mut builder = WindowBuilder::new()
            .with_title(&chrome.title)
            .with_inner_size(LogicalSize::new(geometry.width, geometry.height))
            .with_min_inner_size(LogicalSize::new(chrome.min_width, chrome.min_height))
            .with_decorations(!chrome.frameless)
            .with_maximizable(chrome.fullscreenable)
            .with_window_icon(load_icon(&chrome.icon_path));

        if let Some(bounds) = geometry.bounds() {
            builder = builder.with_position(LogicalPosition::new(bounds.x, bounds.y));
        }

        #[cfg(target_os = "macos")]
        if chrome.hidden_titlebar {
            use tao::platform::macos::WindowBuilderExtMacOS;
            builder = builder
                .with_titlebar_transparent(true)
                .with_title_hidden(true)
                .with_fullsize_content_view(true);
        }

        builder
            .build(self.target)
            .map_err(|e| ShellError::WindowCreation(e.to_string()))
    }

    fn build_webview(&self, window: &Window, handle: ShellWindowHandle) -> Result<WebView, ShellError> {
        let proxy = self.native.proxy.clone();

        let builder = WebViewBuilder::new()
            .with_custom_protocol("shell".into(), move |_wv_id, _request| shell_ui_response())
            .with_initialization_script(&reserved_shortcuts_script())
            .with_ipc_handler(move |msg: wry::http::Request<String>| {
                let body = msg.body().as_str();
                match ContentSignal::parse(body) {
                    Some(signal) => {
                        let _ = proxy.send_event(UserEvent::Signal { sender: handle, signal });
                    }
                    None => log::debug!(
                        "Ignoring IPC from {}: {}",
                        handle.window_id,
                        body.chars().take(200).collect::<String>()
                    ),
                }
            })
            .with_devtools(cfg!(debug_assertions));

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = window
                .default_vbox()
                .ok_or_else(|| ShellError::WindowCreation("missing GTK vbox".to_string()))?;
            builder.build_gtk(vbox)
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder.build(window);

        webview.map_err(|e| ShellError::WindowCreation(e.to_string()))
    }
}

impl ShellPlatformTrait for TaoPlatform<'_> {
    fn open_window(&mut self, spec: &WindowSpec) -> Result<ShellWindowHandle, ShellError> {
        self.native.next_id += 1;
        let window_id = WindowId(self.native.next_id);
        self.native.next_id += 1;
        let handle = ShellWindowHandle {
            window_id,
            content_id: ContentId(self.native.next_id),
        };

        let window = self.build_window(spec)?;
        let webview = self.build_webview(&window, handle)?;

        self.native.by_tao.insert(window.id(), window_id);
        self.native.windows.insert(
            window_id,
            NativeWindow {
                window,
                webview,
                page_view: None,
                full_screen: false,
            },
        );
        Ok(handle)
    }

    fn load_shell_ui(&mut self, window: WindowId) -> Result<(), ShellError> {
        self.native
            .get(window)?
            .webview
            .load_url(SHELL_URL)
            .map_err(|e| ShellError::WindowCreation(e.to_string()))
    }

    fn send(&mut self, window: WindowId, message: &OutboundMessage) -> Result<(), ShellError> {
        self.native
            .get(window)?
            .webview
            .evaluate_script(&message.to_script())
            .map_err(|e| ShellError::Send(e.to_string()))
    }

    fn focus(&mut self, window: WindowId) -> Result<(), ShellError> {
        let native = self
            .native
            .get(window)
            .map_err(|e| ShellError::Focus(e.to_string()))?;
        native.window.set_focus();
        Ok(())
    }

    fn focused_window(&self) -> Option<WindowId> {
        self.native.focused
    }

    fn displays(&self) -> Option<Vec<Rect>> {
        let displays: Vec<Rect> = self
            .target
            .available_monitors()
            .map(|monitor| {
                let scale = monitor.scale_factor();
                let position: LogicalPosition<i32> = monitor.position().to_logical(scale);
                let size: LogicalSize<u32> = monitor.size().to_logical(scale);
                Rect::new(position.x, position.y, size.width, size.height)
            })
            .collect();
        (!displays.is_empty()).then_some(displays)
    }

    fn content_origin(&self, window: WindowId) -> Option<(i32, i32)> {
        let native = self.native.windows.get(&window)?;
        let position: LogicalPosition<i32> = native
            .window
            .inner_position()
            .ok()?
            .to_logical(native.window.scale_factor());
        Some((position.x, position.y))
    }

    fn visible_page_view(&self, window: WindowId) -> Option<ContentId> {
        self.native.windows.get(&window)?.page_view
    }

    fn quit(&mut self) {
        self.native.quit_requested = true;
    }
}

/// X11 numbering for the extra mouse buttons.
fn nav_button(button: MouseButton) -> Option<MouseNavButton> {
    match button {
        MouseButton::Other(8) => Some(MouseNavButton::Back),
        MouseButton::Other(9) => Some(MouseNavButton::Forward),
        _ => None,
    }
}

fn handle_window_event(
    app: &mut App,
    native: &mut NativeWindows,
    target: &EventLoopWindowTarget<UserEvent>,
    window: WindowId,
    event: &WindowEvent<'_>,
) {
    let mut native_events = Vec::new();

    match event {
        WindowEvent::CloseRequested => {
            native.remove(window);
            let mut platform = TaoPlatform { target, native };
            app.coordinator.handle_window_closed(&mut platform, window);
            return;
        }
        WindowEvent::Moved(_) | WindowEvent::Resized(_) => {
            if let Some(bounds) = native.bounds(window) {
                app.coordinator.handle_geometry_changed(window, bounds);
            }
            match native.sync_full_screen(window) {
                Some(true) => native_events.push(NativeWindowEvent::EnterFullScreen),
                Some(false) => native_events.push(NativeWindowEvent::LeaveFullScreen),
                None => {}
            }
        }
        WindowEvent::Focused(focused) => {
            if *focused {
                native.focused = Some(window);
                native_events.push(NativeWindowEvent::Focus);
            } else {
                if native.focused == Some(window) {
                    native.focused = None;
                }
                native_events.push(NativeWindowEvent::Blur);
            }
        }
        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button,
            ..
        } => {
            if let Some(nav) = nav_button(*button) {
                native_events.push(NativeWindowEvent::MouseNav(nav));
            }
        }
        WindowEvent::Touch(touch) => match touch.phase {
            TouchPhase::Started => {
                let Some(native_window) = native.windows.get(&window) else {
                    return;
                };
                let scale = native_window.window.scale_factor();
                let local: LogicalPosition<i32> = touch.location.to_logical(scale);
                let origin: LogicalPosition<i32> = native_window
                    .window
                    .inner_position()
                    .map(|p| p.to_logical(scale))
                    .unwrap_or(LogicalPosition::new(0, 0));
                native_events.push(NativeWindowEvent::ScrollTouchBegin {
                    cursor_x: origin.x + local.x,
                    cursor_y: origin.y + local.y,
                });
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                native_events.push(NativeWindowEvent::ScrollTouchEnd);
            }
            _ => {}
        },
        _ => {}
    }

    let mut platform = TaoPlatform { target, native };
    for native_event in &native_events {
        app.coordinator.handle_native_event(&mut platform, window, native_event);
    }
}

// ─── Main entry point ───

pub fn run() {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start async runtime: {}", e);
            return;
        }
    };

    let mut app = App::new(AppPaths::default());

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let mut native = NativeWindows::new(event_loop.create_proxy());

    let startup_proxy = event_loop.create_proxy();
    let loader = app.startup_loader();
    runtime.spawn(async move {
        let state = loader.await;
        let _ = startup_proxy.send_event(UserEvent::StartupLoaded(state));
    });

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;
        let _ = &runtime;

        match event {
            Event::UserEvent(UserEvent::StartupLoaded(state)) => {
                let mut platform = TaoPlatform { target, native: &mut native };
                app.coordinator
                    .apply_startup(&mut platform, &state, &mut DialogPrompt);
            }

            Event::UserEvent(UserEvent::Signal { sender, signal }) => {
                if let ContentSignal::ViewShown { view_id } = &signal {
                    if let Some(native_window) = native.windows.get_mut(&sender.window_id) {
                        native_window.page_view = Some(ContentId(*view_id));
                    }
                }
                let mut platform = TaoPlatform { target, native: &mut native };
                app.coordinator.handle_content_signal(&mut platform, sender, signal);
            }

            Event::WindowEvent { window_id, event, .. } => {
                if let Some(window) = native.shell_id(window_id) {
                    handle_window_event(&mut app, &mut native, target, window, &event);
                }
            }

            Event::Reopen { .. } => {
                let mut platform = TaoPlatform { target, native: &mut native };
                if let Err(e) = app
                    .coordinator
                    .handle_lifecycle(&mut platform, LifecycleEvent::Reactivate)
                {
                    log::error!("Failed to reopen a window: {}", e);
                }
            }

            Event::LoopDestroyed => {
                app.shutdown();
            }

            _ => {}
        }

        if native.quit_requested {
            *control_flow = ControlFlow::Exit;
        }
    });
}
