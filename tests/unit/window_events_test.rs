//! Unit tests for native window event translation.

use browser_shell::ipc::{OutboundMessage, ShellCommand, WindowNotification};
use browser_shell::managers::window_events::{
    app_command, translate, EventAction, MouseNavButton, NativeWindowEvent,
};
use rstest::rstest;

fn send(message: impl Into<OutboundMessage>) -> EventAction {
    EventAction::Send(message.into())
}

#[rstest]
#[case(NativeWindowEvent::MouseNav(MouseNavButton::Back), send(ShellCommand::HistoryBack))]
#[case(NativeWindowEvent::MouseNav(MouseNavButton::Forward), send(ShellCommand::HistoryForward))]
#[case(NativeWindowEvent::ScrollTouchEnd, send(WindowNotification::ScrollTouchEnd))]
#[case(NativeWindowEvent::Focus, send(WindowNotification::Focus))]
#[case(NativeWindowEvent::Blur, send(WindowNotification::Blur))]
fn test_single_message_events(#[case] event: NativeWindowEvent, #[case] expected: EventAction) {
    assert_eq!(translate(&event, (0, 0)), vec![expected]);
}

#[rstest]
#[case("browser-backward", Some(ShellCommand::HistoryBack))]
#[case("browser-forward", Some(ShellCommand::HistoryForward))]
#[case("media-play-pause", None)]
fn test_app_commands(#[case] name: &str, #[case] expected: Option<ShellCommand>) {
    assert_eq!(app_command(name), expected);
}

#[test]
fn test_unknown_app_command_does_nothing() {
    let event = NativeWindowEvent::AppCommand("volume-up".to_string());
    assert!(translate(&event, (0, 0)).is_empty());
}

#[test]
fn test_scroll_touch_begin_translates_cursor() {
    let event = NativeWindowEvent::ScrollTouchBegin {
        cursor_x: 500,
        cursor_y: 300,
    };
    assert_eq!(
        translate(&event, (120, -40)),
        vec![send(WindowNotification::ScrollTouchBegin { x: 380, y: 340 })]
    );
}

#[test]
fn test_scroll_touch_begin_clamps_extreme_coordinates() {
    let event = NativeWindowEvent::ScrollTouchBegin {
        cursor_x: i32::MIN,
        cursor_y: i32::MAX,
    };
    assert_eq!(
        translate(&event, (10, -10)),
        vec![send(WindowNotification::ScrollTouchBegin {
            x: i32::MIN,
            y: i32::MAX,
        })]
    );
}

#[test]
fn test_full_screen_transitions_toggle_escape() {
    assert_eq!(
        translate(&NativeWindowEvent::EnterFullScreen, (0, 0)),
        vec![
            send(WindowNotification::EnterFullScreen),
            EventAction::BindFullScreenEscape
        ]
    );
    assert_eq!(
        translate(&NativeWindowEvent::LeaveFullScreen, (0, 0)),
        vec![
            send(WindowNotification::LeaveFullScreen),
            EventAction::UnbindFullScreenEscape
        ]
    );
}
