//! Integration-level unit tests for the ShortcutManager.
//!
//! These tests validate accelerator parsing, per-window bindings, conflict
//! detection, and key event resolution.

use browser_shell::ipc::{KeyInput, ShellCommand};
use browser_shell::managers::shortcut_manager::{
    default_accelerators, is_reserved, reserved_shortcuts_script, Accelerator, BindingId,
    ShortcutManager, ShortcutManagerTrait,
};
use browser_shell::types::errors::ShortcutError;
use browser_shell::types::window::WindowId;
use rstest::rstest;

const W1: WindowId = WindowId(1);
const W2: WindowId = WindowId(2);

#[rstest]
#[case("CmdOrCtrl+1", true, false, false, "1")]
#[case("Ctrl+Shift+Tab", false, true, true, "Tab")]
#[case("ctrl+pagedown", false, true, false, "pagedown")]
#[case("Escape", false, false, false, "Escape")]
#[case("CmdOrCtrl+[", true, false, false, "[")]
fn test_parse_accelerators(
    #[case] keys: &str,
    #[case] primary: bool,
    #[case] ctrl: bool,
    #[case] shift: bool,
    #[case] key: &str,
) {
    let accelerator = Accelerator::parse(keys).unwrap();
    assert_eq!(accelerator.modifiers.primary, primary);
    assert_eq!(accelerator.modifiers.ctrl, ctrl);
    assert_eq!(accelerator.modifiers.shift, shift);
    assert_eq!(accelerator.key, key);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("Ctrl+")]
#[case("Shift")]
#[case("A+B")]
fn test_parse_rejects_invalid(#[case] keys: &str) {
    assert!(matches!(
        Accelerator::parse(keys),
        Err(ShortcutError::InvalidKeys(_))
    ));
}

#[rstest]
#[case(false, KeyInput::new("1").ctrl(), true)]
#[case(false, KeyInput::new("1").meta(), false)]
#[case(true, KeyInput::new("1").meta(), true)]
#[case(true, KeyInput::new("1").ctrl(), false)]
#[case(false, KeyInput::new("1").ctrl().shift(), false)]
fn test_cmd_or_ctrl_resolves_per_platform(
    #[case] mac: bool,
    #[case] input: KeyInput,
    #[case] expected: bool,
) {
    let accelerator = Accelerator::parse("CmdOrCtrl+1").unwrap();
    assert_eq!(accelerator.matches_on(&input, mac), expected);
}

#[test]
fn test_key_comparison_ignores_case() {
    let accelerator = Accelerator::parse("Ctrl+PageDown").unwrap();
    assert!(accelerator.matches_on(&KeyInput::new("pagedown").ctrl(), false));
}

#[test]
fn test_register_and_resolve() {
    let mut manager = ShortcutManager::new();
    manager
        .register_shortcut(W1, "Ctrl+Tab", ShellCommand::NextTab)
        .unwrap();

    assert_eq!(
        manager.resolve(W1, &KeyInput::new("Tab").ctrl()),
        Some(ShellCommand::NextTab)
    );
    assert_eq!(manager.resolve(W2, &KeyInput::new("Tab").ctrl()), None);
    assert_eq!(manager.resolve(W1, &KeyInput::new("Tab")), None);
}

#[test]
fn test_same_accelerator_conflicts_only_within_window() {
    let mut manager = ShortcutManager::new();
    let first = manager
        .register_shortcut(W1, "Ctrl+Tab", ShellCommand::NextTab)
        .unwrap();

    let err = manager
        .register_shortcut(W1, "ctrl+tab", ShellCommand::PrevTab)
        .unwrap_err();
    assert!(matches!(err, ShortcutError::Conflict(_)));

    assert!(manager
        .register_shortcut(W2, "Ctrl+Tab", ShellCommand::NextTab)
        .is_ok());
    assert_eq!(
        manager.has_conflict(W1, &Accelerator::parse("Ctrl+Tab").unwrap()),
        Some(first)
    );
}

#[test]
fn test_unregister_shortcut() {
    let mut manager = ShortcutManager::new();
    let id = manager
        .register_shortcut(W1, "Escape", ShellCommand::LeavePageFullScreen)
        .unwrap();

    manager.unregister_shortcut(id).unwrap();

    assert_eq!(manager.binding_count(W1), 0);
    assert!(matches!(
        manager.unregister_shortcut(id),
        Err(ShortcutError::NotFound(_))
    ));
    assert!(manager.unregister_shortcut(BindingId(999)).is_err());
}

#[test]
fn test_unregister_window_removes_only_that_window() {
    let mut manager = ShortcutManager::new();
    for (keys, command) in default_accelerators() {
        manager.register_shortcut(W1, keys, command.clone()).unwrap();
        manager.register_shortcut(W2, keys, command).unwrap();
    }

    assert_eq!(manager.unregister_window(W1), default_accelerators().len());
    assert_eq!(manager.unregister_window(W1), 0);
    assert_eq!(manager.binding_count(W2), default_accelerators().len());
}

#[test]
fn test_default_table_binds_tab_and_history_commands() {
    let table = default_accelerators();
    let command = |keys: &str| {
        table
            .iter()
            .find(|(k, _)| *k == keys)
            .map(|(_, c)| c.clone())
    };

    assert_eq!(command("CmdOrCtrl+1"), Some(ShellCommand::SetTab(0)));
    assert_eq!(command("CmdOrCtrl+8"), Some(ShellCommand::SetTab(7)));
    assert_eq!(command("CmdOrCtrl+9"), Some(ShellCommand::LastTab));
    assert_eq!(command("Ctrl+PageUp"), Some(ShellCommand::PrevTab));
    assert_eq!(command("CmdOrCtrl+]"), Some(ShellCommand::HistoryForward));
    assert_eq!(command("Escape"), None);
}

#[test]
fn test_reserved_keys() {
    assert!(is_reserved(&KeyInput::new("5").primary()));
    assert!(is_reserved(&KeyInput::new("Tab").ctrl().shift()));
    assert!(!is_reserved(&KeyInput::new("5")));
    // Escape is forwarded to the shell but never withheld from pages.
    assert!(!is_reserved(&KeyInput::new("Escape")));
}

#[test]
fn test_reserved_script_forwards_escape() {
    let script = reserved_shortcuts_script();
    assert!(script.contains("e.key==='Escape'"));
    assert!(script.contains("preventDefault"));
}
