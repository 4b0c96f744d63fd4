//! Shortcut Manager.
//!
//! Parses accelerator strings, keeps per-window accelerator bindings and
//! resolves forwarded key events to shell commands. The same table decides
//! which key events embedded page content must not intercept.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::json;

use crate::ipc::{channels, KeyInput, ShellCommand};
use crate::types::errors::ShortcutError;
use crate::types::window::WindowId;

/// Accelerator bound only while a window is in full-screen.
pub const FULL_SCREEN_ESCAPE: &str = "Escape";

/// Modifier set of an accelerator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// `CmdOrCtrl`: Cmd on macOS, Ctrl elsewhere.
    pub primary: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// A parsed `Modifier+Key` accelerator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accelerator {
    pub modifiers: Modifiers,
    pub key: String,
}

impl Accelerator {
    /// Parses strings such as `CmdOrCtrl+1`, `Ctrl+Shift+Tab` or `Escape`.
    pub fn parse(keys: &str) -> Result<Self, ShortcutError> {
        if keys.trim().is_empty() {
            return Err(ShortcutError::InvalidKeys("Keys cannot be empty".to_string()));
        }

        let mut modifiers = Modifiers::default();
        let mut key = None;
        let parts: Vec<&str> = keys.split('+').map(str::trim).collect();

        for (i, part) in parts.iter().enumerate() {
            let is_modifier = match part.to_lowercase().as_str() {
                "cmdorctrl" | "commandorcontrol" => {
                    modifiers.primary = true;
                    true
                }
                "ctrl" | "control" => {
                    modifiers.ctrl = true;
                    true
                }
                "alt" | "option" => {
                    modifiers.alt = true;
                    true
                }
                "shift" => {
                    modifiers.shift = true;
                    true
                }
                "cmd" | "command" | "meta" | "super" => {
                    modifiers.meta = true;
                    true
                }
                _ => false,
            };

            if is_modifier {
                if i == parts.len() - 1 {
                    return Err(ShortcutError::InvalidKeys(format!(
                        "'{}' ends with a modifier",
                        keys
                    )));
                }
            } else if part.is_empty() {
                return Err(ShortcutError::InvalidKeys(format!("'{}' has an empty key", keys)));
            } else if key.replace(part.to_string()).is_some() {
                return Err(ShortcutError::InvalidKeys(format!(
                    "'{}' names more than one key",
                    keys
                )));
            }
        }

        let key = key.ok_or_else(|| ShortcutError::InvalidKeys(format!("'{}' names no key", keys)))?;
        Ok(Self { modifiers, key })
    }

    /// Matches against a key event on the current platform.
    pub fn matches(&self, input: &KeyInput) -> bool {
        self.matches_on(input, cfg!(target_os = "macos"))
    }

    /// Matches against a key event, resolving `CmdOrCtrl` for the given platform.
    /// Modifiers must match exactly.
    pub fn matches_on(&self, input: &KeyInput, mac: bool) -> bool {
        let (ctrl, _, _, meta) = self.resolved(mac);
        input.key.eq_ignore_ascii_case(&self.key)
            && input.ctrl == ctrl
            && input.alt == self.modifiers.alt
            && input.shift == self.modifiers.shift
            && input.meta == meta
    }

    fn resolved(&self, mac: bool) -> (bool, bool, bool, bool) {
        let m = self.modifiers;
        (
            m.ctrl || (m.primary && !mac),
            m.alt,
            m.shift,
            m.meta || (m.primary && mac),
        )
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        for (on, name) in [
            (m.primary, "CmdOrCtrl"),
            (m.ctrl, "Ctrl"),
            (m.alt, "Alt"),
            (m.shift, "Shift"),
            (m.meta, "Cmd"),
        ] {
            if on {
                write!(f, "{}+", name)?;
            }
        }
        write!(f, "{}", self.key)
    }
}

/// The fixed accelerator table bound on every shell window.
pub fn default_accelerators() -> Vec<(&'static str, ShellCommand)> {
    let mut table = vec![
        ("CmdOrCtrl+1", ShellCommand::SetTab(0)),
        ("CmdOrCtrl+2", ShellCommand::SetTab(1)),
        ("CmdOrCtrl+3", ShellCommand::SetTab(2)),
        ("CmdOrCtrl+4", ShellCommand::SetTab(3)),
        ("CmdOrCtrl+5", ShellCommand::SetTab(4)),
        ("CmdOrCtrl+6", ShellCommand::SetTab(5)),
        ("CmdOrCtrl+7", ShellCommand::SetTab(6)),
        ("CmdOrCtrl+8", ShellCommand::SetTab(7)),
        ("CmdOrCtrl+9", ShellCommand::LastTab),
    ];
    table.extend([
        ("Ctrl+Tab", ShellCommand::NextTab),
        ("Ctrl+Shift+Tab", ShellCommand::PrevTab),
        ("Ctrl+PageDown", ShellCommand::NextTab),
        ("Ctrl+PageUp", ShellCommand::PrevTab),
        ("CmdOrCtrl+[", ShellCommand::HistoryBack),
        ("CmdOrCtrl+]", ShellCommand::HistoryForward),
    ]);
    table
}

/// Identifier of one accelerator binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u64);

#[derive(Debug, Clone)]
struct Binding {
    window: WindowId,
    accelerator: Accelerator,
    command: ShellCommand,
}

/// Trait defining accelerator binding operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(
        &mut self,
        window: WindowId,
        keys: &str,
        command: ShellCommand,
    ) -> Result<BindingId, ShortcutError>;
    fn unregister_shortcut(&mut self, id: BindingId) -> Result<(), ShortcutError>;
    /// Removes every binding of `window`, returning how many were removed.
    fn unregister_window(&mut self, window: WindowId) -> usize;
    fn resolve(&self, window: WindowId, input: &KeyInput) -> Option<ShellCommand>;
    fn has_conflict(&self, window: WindowId, accelerator: &Accelerator) -> Option<BindingId>;
    fn binding_count(&self, window: WindowId) -> usize;
}

/// In-memory accelerator bindings, scoped per window.
#[derive(Debug, Default)]
pub struct ShortcutManager {
    bindings: BTreeMap<BindingId, Binding>,
    next_id: u64,
}

impl ShortcutManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(
        &mut self,
        window: WindowId,
        keys: &str,
        command: ShellCommand,
    ) -> Result<BindingId, ShortcutError> {
        let accelerator = Accelerator::parse(keys)?;

        if let Some(existing) = self.has_conflict(window, &accelerator) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound on {} as binding {}",
                accelerator, window, existing.0
            )));
        }

        self.next_id += 1;
        let id = BindingId(self.next_id);
        self.bindings.insert(
            id,
            Binding {
                window,
                accelerator,
                command,
            },
        );
        Ok(id)
    }

    fn unregister_shortcut(&mut self, id: BindingId) -> Result<(), ShortcutError> {
        self.bindings
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ShortcutError::NotFound(format!("binding {}", id.0)))
    }

    fn unregister_window(&mut self, window: WindowId) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, b| b.window != window);
        before - self.bindings.len()
    }

    fn resolve(&self, window: WindowId, input: &KeyInput) -> Option<ShellCommand> {
        self.bindings
            .values()
            .find(|b| b.window == window && b.accelerator.matches(input))
            .map(|b| b.command.clone())
    }

    fn has_conflict(&self, window: WindowId, accelerator: &Accelerator) -> Option<BindingId> {
        self.bindings
            .iter()
            .find(|(_, b)| b.window == window && &b.accelerator == accelerator)
            .map(|(id, _)| *id)
    }

    fn binding_count(&self, window: WindowId) -> usize {
        self.bindings.values().filter(|b| b.window == window).count()
    }
}

/// True when a key event inside an embedded page view belongs to the shell.
pub fn is_reserved(input: &KeyInput) -> bool {
    default_accelerators()
        .iter()
        .filter_map(|(keys, _)| Accelerator::parse(keys).ok())
        .any(|a| a.matches(input))
}

/// Script attached to embedded page views: reserved shortcuts are withheld from
/// the page and forwarded to the shell; Escape is forwarded but not withheld.
pub fn reserved_shortcuts_script() -> String {
    let mac = cfg!(target_os = "macos");
    let combos: Vec<serde_json::Value> = default_accelerators()
        .iter()
        .filter_map(|(keys, _)| Accelerator::parse(keys).ok())
        .map(|a| {
            let (ctrl, alt, shift, meta) = a.resolved(mac);
            json!({"key": a.key.to_lowercase(), "ctrl": ctrl, "alt": alt, "shift": shift, "meta": meta})
        })
        .collect();

    format!(
        r#"(function(){{var reserved={combos};
function send(e){{window.ipc.postMessage(JSON.stringify({{channel:'{channel}',data:{{key:e.key,ctrl:e.ctrlKey,alt:e.altKey,shift:e.shiftKey,meta:e.metaKey}}}}))}}
document.addEventListener('keydown',function(e){{
if(e.key==='Escape'){{send(e);return}}
var k=(e.key||'').toLowerCase();
for(var i=0;i<reserved.length;i++){{var r=reserved[i];
if(r.key===k&&r.ctrl===e.ctrlKey&&r.alt===e.altKey&&r.shift===e.shiftKey&&r.meta===e.metaKey){{e.preventDefault();e.stopImmediatePropagation();send(e);return}}}}
}},true);}})();"#,
        combos = serde_json::Value::Array(combos),
        channel = channels::KEY_DOWN,
    )
}
