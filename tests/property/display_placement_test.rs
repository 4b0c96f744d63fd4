//! Property-based tests for display placement validation.
//!
//! These tests verify that the validated geometry is either fully visible on
//! some display or the default geometry, and that pages always survive.

use browser_shell::managers::display_placement::ensure_visible_on_some_display;
use browser_shell::services::window_state_store::WindowStateStore;
use browser_shell::types::window::{PageDescriptor, Rect, WindowState};
use proptest::prelude::*;

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-4000i32..4000, -3000i32..3000, 1u32..4000, 1u32..3000)
        .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
}

fn arb_window() -> impl Strategy<Value = WindowState> {
    (
        proptest::option::of(arb_rect()),
        100u32..3000,
        100u32..2000,
        proptest::collection::vec("https://[a-z]{3,10}\\.org", 0..4),
    )
        .prop_map(|(rect, width, height, urls)| {
            let pages = urls.into_iter().map(PageDescriptor::new).collect();
            match rect {
                Some(rect) => WindowState {
                    x: Some(rect.x),
                    y: Some(rect.y),
                    width: rect.width,
                    height: rect.height,
                    pages,
                },
                None => WindowState {
                    x: None,
                    y: None,
                    width,
                    height,
                    pages,
                },
            }
        })
}

// **Property: result is visible or default**
//
// *For any* requested geometry and display set, the validated geometry keeps
// the requested pages and is either unchanged and fully contained in some
// display (or, when unpositioned, small enough for one), or equal to the
// default geometry.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn placement_is_visible_or_default(
        requested in arb_window(),
        displays in proptest::option::of(proptest::collection::vec(arb_rect(), 0..4)),
    ) {
        let defaults = WindowStateStore::default_window_state();
        let result = ensure_visible_on_some_display(requested.clone(), &defaults, displays.as_deref());

        prop_assert_eq!(&result.pages, &requested.pages);

        if result == requested {
            let displays = displays.unwrap_or_default();
            let visible = match result.bounds() {
                Some(bounds) => displays.iter().any(|d| d.contains(&bounds)),
                None => displays
                    .iter()
                    .any(|d| d.width >= result.width && d.height >= result.height),
            };
            prop_assert!(visible || result.without_pages() == defaults.without_pages());
        } else {
            prop_assert_eq!(result.without_pages(), defaults.without_pages());
        }
    }

    #[test]
    fn window_inside_a_display_is_kept(display in arb_rect(), inset in 0u32..50) {
        prop_assume!(display.width > inset * 2 && display.height > inset * 2);
        let requested = WindowState {
            x: Some(display.x + inset as i32),
            y: Some(display.y + inset as i32),
            width: display.width - inset * 2,
            height: display.height - inset * 2,
            pages: vec![],
        };
        let defaults = WindowStateStore::default_window_state();

        let result = ensure_visible_on_some_display(requested.clone(), &defaults, Some(&[display]));
        prop_assert_eq!(result, requested);
    }

    #[test]
    fn unknown_displays_reject_positioned_windows(rect in arb_rect()) {
        let requested = WindowState {
            x: Some(rect.x),
            y: Some(rect.y),
            width: rect.width,
            height: rect.height,
            pages: vec![],
        };
        let defaults = WindowStateStore::default_window_state();

        let result = ensure_visible_on_some_display(requested, &defaults, None);
        prop_assert_eq!(result, defaults);
    }
}
