//! Browser Shell: window lifecycle coordinator for a desktop browser.
//!
//! Entry point: opens the shell windows with tao + wry.
//! When built without the `gui` feature, runs a console demo on the headless platform.

#[cfg(feature = "gui")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    browser_shell::ui::webview_app::run();
}

#[cfg(not(feature = "gui"))]
#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Browser Shell v{} - Demo Mode             ║", env!("CARGO_PKG_VERSION"));
    println!("║        Window lifecycle on the headless platform           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let dir = std::env::temp_dir().join(format!("browser-shell-demo-{}", std::process::id()));
    let session_file = dir.join("sessionRestore.json");

    demo_first_run(&session_file).await;
    demo_restore(&session_file).await;
    demo_placement();
    demo_shortcuts();

    let _ = std::fs::remove_dir_all(&dir);

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Demo finished");
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn demo_app(session_file: &std::path::Path) -> browser_shell::app::App {
    use browser_shell::app::{App, AppPaths};
    use browser_shell::managers::window_coordinator::CoordinatorConfig;

    let config = CoordinatorConfig {
        quit_when_all_windows_closed: true,
        ..CoordinatorConfig::default()
    };
    App::with_config(
        AppPaths {
            session_file: Some(session_file.to_path_buf()),
            settings_file: Some(session_file.with_file_name("settings.json").to_string_lossy().into_owned()),
        },
        config,
    )
}

#[cfg(not(feature = "gui"))]
struct AutoRestore;

#[cfg(not(feature = "gui"))]
impl browser_shell::services::crash_recovery::RestorePromptTrait for AutoRestore {
    fn ask_restore(&mut self) -> browser_shell::services::crash_recovery::PromptChoice {
        println!("  Restore prompt shown, answering 'Restore Session'");
        browser_shell::services::crash_recovery::PromptChoice::Restore
    }
}

#[cfg(not(feature = "gui"))]
async fn demo_first_run(session_file: &std::path::Path) {
    use browser_shell::ipc::ContentSignal;
    use browser_shell::platform::headless::HeadlessPlatform;
    use browser_shell::types::window::{PageDescriptor, Rect};
    section("First Run");

    let mut app = demo_app(session_file);
    let mut platform = HeadlessPlatform::default();

    let decision = app.startup(&mut platform, &mut AutoRestore).await;
    println!("  Startup decision: {:?}", decision);

    let windows = app.coordinator.windows();
    for handle in &windows {
        app.coordinator.handle_content_signal(&mut platform, *handle, ContentSignal::Ready);
        app.coordinator.handle_content_signal(&mut platform, *handle, ContentSignal::PagesReady);
    }
    let Some(first) = windows.first().copied() else {
        println!("  No window was opened");
        return;
    };
    println!("  Opened {} ({}), sent: {:?}", first.window_id, first.content_id, platform.channels_sent_to(first.window_id));

    app.coordinator.handle_content_signal(&mut platform, first, ContentSignal::NewWindow);
    println!("  new-window request, active windows: {}", app.coordinator.num_active_windows());

    app.coordinator.handle_geometry_changed(first.window_id, Rect::new(40, 40, 1024, 700));
    app.coordinator.handle_content_signal(
        &mut platform,
        first,
        ContentSignal::PagesChanged(vec![
            PageDescriptor::new("https://www.rust-lang.org"),
            PageDescriptor::new("https://docs.rs"),
        ]),
    );
    println!("  Recorded {} window(s) with pages", app.coordinator.session().watched_count());

    // Simulate a crash: the session file keeps cleanExit = false.
    drop(app);
    println!("  ✓ Process ended without a clean quit");
    println!();
}

#[cfg(not(feature = "gui"))]
async fn demo_restore(session_file: &std::path::Path) {
    use browser_shell::ipc::ContentSignal;
    use browser_shell::platform::headless::HeadlessPlatform;
    section("Crash Restore");

    let mut app = demo_app(session_file);
    let mut platform = HeadlessPlatform::default();

    let decision = app.startup(&mut platform, &mut AutoRestore).await;
    println!("  Startup decision: {:?}", decision);

    for handle in app.coordinator.windows() {
        app.coordinator.handle_content_signal(&mut platform, handle, ContentSignal::Ready);
        app.coordinator.handle_content_signal(&mut platform, handle, ContentSignal::PagesReady);
        println!("  {} received {:?}", handle.window_id, platform.channels_sent_to(handle.window_id));
    }

    for handle in app.coordinator.windows() {
        platform.close(handle.window_id);
        app.coordinator.handle_window_closed(&mut platform, handle.window_id);
    }
    println!(
        "  Closed all windows, quit requested: {}, session saved cleanly: {}",
        platform.quit_requested(),
        !app.coordinator.session().is_recording()
    );
    println!("  ✓ Restore OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_placement() {
    use browser_shell::managers::display_placement::ensure_visible_on_some_display;
    use browser_shell::services::window_state_store::WindowStateStore;
    use browser_shell::types::window::{Rect, WindowState};
    section("Display Placement");

    let defaults = WindowStateStore::default_window_state();
    let off_screen = WindowState {
        x: Some(3000),
        y: Some(100),
        ..defaults.clone()
    };
    let displays = [Rect::new(0, 0, 1920, 1080)];
    let placed = ensure_visible_on_some_display(off_screen, &defaults, Some(&displays));
    println!("  Window at x=3000 on a 1920px display moves to {:?},{:?}", placed.x, placed.y);
    println!("  ✓ Placement OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_shortcuts() {
    use browser_shell::ipc::KeyInput;
    use browser_shell::managers::shortcut_manager::{default_accelerators, is_reserved};
    section("Accelerators");

    println!("  {} accelerators bound per window", default_accelerators().len());
    println!("  CmdOrCtrl+1 reserved: {}", is_reserved(&KeyInput::new("1").primary()));
    println!("  Plain 'a' reserved: {}", is_reserved(&KeyInput::new("a")));
    println!("  ✓ Shortcuts OK");
    println!();
}
