//! Property-based tests for the active-window registry.
//!
//! These tests drive random create / ready / close sequences through the
//! coordinator and check the window count, the first-window identity, and
//! the at-most-once pinned tabs trigger after every step.

use browser_shell::ipc::channels;
use browser_shell::managers::window_coordinator::{CoordinatorConfig, ShellCoordinator};
use browser_shell::platform;
use browser_shell::platform::headless::HeadlessPlatform;
use browser_shell::services::session_watcher::SessionWatcher;
use browser_shell::services::window_state_store::WindowStateStore;
use browser_shell::types::window::ShellWindowHandle;
use proptest::prelude::*;
use tempfile::TempDir;

#[derive(Debug, Clone)]
enum Op {
    Create,
    /// Index into all windows ever created, so stale handles get exercised.
    Ready(usize),
    Close(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Create),
        2 => (0usize..16).prop_map(Op::Ready),
        2 => (0usize..16).prop_map(Op::Close),
    ]
}

fn coordinator(dir: &TempDir) -> ShellCoordinator {
    let store = WindowStateStore::new(Some(dir.path().join("sessionRestore.json")));
    ShellCoordinator::new(
        CoordinatorConfig {
            defaults: WindowStateStore::default_window_state(),
            chrome: platform::window_chrome(),
            quit_when_all_windows_closed: false,
        },
        SessionWatcher::new(store),
    )
}

fn pinned_loads(p: &HeadlessPlatform) -> usize {
    p.sent()
        .iter()
        .filter(|(_, m)| m.channel() == channels::LOAD_PINNED_TABS)
        .count()
}

// **Property: window count and first-window identity**
//
// *For any* sequence of N creates and M closes, the active count equals N - M,
// the first window id is set iff the count is non-zero, and pinned tabs load
// at most once between two moments where the count is zero.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn registry_tracks_live_windows(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let dir = TempDir::new().unwrap();
        let mut c = coordinator(&dir);
        let mut p = HeadlessPlatform::default();

        let mut created: Vec<ShellWindowHandle> = Vec::new();
        let mut live: Vec<ShellWindowHandle> = Vec::new();
        let mut cycle_first: Option<ShellWindowHandle> = None;
        let mut loads_before_cycle = 0;

        for op in ops {
            match op {
                Op::Create => {
                    let handle = c.create_window(&mut p, None).unwrap();
                    if live.is_empty() {
                        cycle_first = Some(handle);
                        loads_before_cycle = pinned_loads(&p);
                    }
                    created.push(handle);
                    live.push(handle);
                }
                Op::Ready(i) => {
                    if let Some(handle) = created.get(i).copied() {
                        let fired = c.handle_ready(&mut p, handle.content_id);
                        if fired {
                            prop_assert_eq!(Some(handle), cycle_first);
                            prop_assert!(live.contains(&handle));
                        }
                    }
                }
                Op::Close(i) => {
                    if let Some(handle) = created.get(i).copied() {
                        p.close(handle.window_id);
                        c.handle_window_closed(&mut p, handle.window_id);
                        live.retain(|h| *h != handle);
                    }
                }
            }

            prop_assert_eq!(c.num_active_windows(), live.len());
            prop_assert_eq!(c.registry().first_window_id().is_some(), !live.is_empty());
            if !live.is_empty() {
                prop_assert_eq!(
                    c.registry().first_window_id(),
                    cycle_first.map(|h| h.content_id)
                );
            }
            prop_assert!(pinned_loads(&p) - loads_before_cycle <= 1);
        }
    }
}
