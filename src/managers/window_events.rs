//! Native window event translation.
//!
//! Maps OS-level window events (mouse navigation buttons, platform app
//! commands, touch scrolling, focus, full-screen transitions) to the messages
//! and binding changes the coordinator applies to a window.

use crate::ipc::{OutboundMessage, ShellCommand, WindowNotification};

/// Extra mouse buttons used for history navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseNavButton {
    Back,
    Forward,
}

/// Window events delivered by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeWindowEvent {
    MouseNav(MouseNavButton),
    /// Platform "app command", e.g. a hardware browser-back key.
    AppCommand(String),
    /// Touch scrolling started; cursor in screen coordinates.
    ScrollTouchBegin { cursor_x: i32, cursor_y: i32 },
    ScrollTouchEnd,
    Focus,
    Blur,
    EnterFullScreen,
    LeaveFullScreen,
}

/// What the coordinator must do in response to a native event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventAction {
    Send(OutboundMessage),
    BindFullScreenEscape,
    UnbindFullScreenEscape,
}

/// Maps an app command name to a history command.
pub fn app_command(name: &str) -> Option<ShellCommand> {
    match name {
        "browser-backward" => Some(ShellCommand::HistoryBack),
        "browser-forward" => Some(ShellCommand::HistoryForward),
        _ => None,
    }
}

/// Translates one native event. `window_origin` is the top-left of the
/// window's content area in screen coordinates, used for cursor translation.
pub fn translate(event: &NativeWindowEvent, window_origin: (i32, i32)) -> Vec<EventAction> {
    match event {
        NativeWindowEvent::MouseNav(MouseNavButton::Back) => {
            vec![EventAction::Send(ShellCommand::HistoryBack.into())]
        }
        NativeWindowEvent::MouseNav(MouseNavButton::Forward) => {
            vec![EventAction::Send(ShellCommand::HistoryForward.into())]
        }
        NativeWindowEvent::AppCommand(name) => app_command(name)
            .map(|command| vec![EventAction::Send(command.into())])
            .unwrap_or_default(),
        NativeWindowEvent::ScrollTouchBegin { cursor_x, cursor_y } => {
            vec![EventAction::Send(
                WindowNotification::ScrollTouchBegin {
                    x: cursor_x.saturating_sub(window_origin.0),
                    y: cursor_y.saturating_sub(window_origin.1),
                }
                .into(),
            )]
        }
        NativeWindowEvent::ScrollTouchEnd => {
            vec![EventAction::Send(WindowNotification::ScrollTouchEnd.into())]
        }
        NativeWindowEvent::Focus => vec![EventAction::Send(WindowNotification::Focus.into())],
        NativeWindowEvent::Blur => vec![EventAction::Send(WindowNotification::Blur.into())],
        NativeWindowEvent::EnterFullScreen => vec![
            EventAction::Send(WindowNotification::EnterFullScreen.into()),
            EventAction::BindFullScreenEscape,
        ],
        NativeWindowEvent::LeaveFullScreen => vec![
            EventAction::Send(WindowNotification::LeaveFullScreen.into()),
            EventAction::UnbindFullScreenEscape,
        ],
    }
}
