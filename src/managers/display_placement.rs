//! Display placement validation.
//!
//! Keeps windows from opening off-screen after the display configuration
//! changed, e.g. when the external monitor a window was last on is gone.

use crate::types::window::{Rect, WindowState};

/// Returns `requested` if it is fully visible on at least one display, otherwise
/// `defaults` geometry carrying `requested`'s pages.
///
/// `displays` is `None` when the platform could not enumerate displays; that
/// counts as "not visible". A request without an explicit position is left to
/// the OS to place, so it only has to fit inside some display.
pub fn ensure_visible_on_some_display(
    requested: WindowState,
    defaults: &WindowState,
    displays: Option<&[Rect]>,
) -> WindowState {
    let Some(displays) = displays else {
        log::warn!("Display enumeration unavailable, using default window placement");
        return with_default_geometry(requested, defaults);
    };

    let visible = match requested.bounds() {
        Some(bounds) => displays.iter().any(|display| display.contains(&bounds)),
        None => displays
            .iter()
            .any(|display| display.width >= requested.width && display.height >= requested.height),
    };

    if visible {
        return requested;
    }
    log::info!(
        "Window at {:?},{:?} {}x{} fits no display, using default placement",
        requested.x,
        requested.y,
        requested.width,
        requested.height
    );
    with_default_geometry(requested, defaults)
}

fn with_default_geometry(requested: WindowState, defaults: &WindowState) -> WindowState {
    WindowState {
        pages: requested.pages,
        ..defaults.without_pages()
    }
}
