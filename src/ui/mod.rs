//! Browser shell UI layer.
//!
//! Uses `tao` for native windows and `wry` for the shell UI webview:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The shell UI (tab strip, page views) is HTML/CSS/JS inside the WebView.
//! Communication with the window coordinator uses wry IPC.

pub mod webview_app;
