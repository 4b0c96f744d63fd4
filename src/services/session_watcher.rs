//! Session Watcher.
//!
//! Tracks the geometry and page list of every watched shell window and
//! persists the session through a background save worker. Bursts of changes
//! are coalesced so only the most recent snapshot is written.

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::services::window_state_store::WindowStateStore;
use crate::types::session::BrowsingSessionState;
use crate::types::window::{PageDescriptor, Rect, ShellWindowHandle, WindowId, WindowState};

/// Trait defining the session watcher interface consumed by the coordinator.
pub trait SessionWatcherTrait {
    fn watch_window(&mut self, window: &ShellWindowHandle, initial: WindowState);
    fn update_geometry(&mut self, window: WindowId, bounds: Rect);
    fn update_pages(&mut self, window: WindowId, pages: Vec<PageDescriptor>);
    /// Drops a window that closed outside the quit path.
    fn unwatch_window(&mut self, window: WindowId);
    /// Freezes the recorded session; later changes and closes are ignored.
    fn stop_recording(&mut self);
    /// Writes the final clean-exit snapshot and waits for it to land.
    fn exit(&mut self);
}

enum SaveRequest {
    Save(BrowsingSessionState),
    Flush(BrowsingSessionState, mpsc::Sender<()>),
}

fn start_save_worker(store: WindowStateStore) -> (mpsc::Sender<SaveRequest>, Option<JoinHandle<()>>) {
    let (tx, rx) = mpsc::channel::<SaveRequest>();

    let worker = std::thread::Builder::new()
        .name("session-save".to_string())
        .spawn(move || {
            while let Ok(request) = rx.recv() {
                // Coalesce bursts: keep only the last pending snapshot, but never drop a flush ack.
                let mut last = request;
                while let Ok(next) = rx.try_recv() {
                    if let SaveRequest::Flush(_, ack) = last {
                        let _ = ack.send(());
                    }
                    last = next;
                }

                match last {
                    SaveRequest::Save(state) => {
                        if let Err(e) = store.save(&state) {
                            log::error!("Failed to save session: {}", e);
                        }
                    }
                    SaveRequest::Flush(state, ack) => {
                        if let Err(e) = store.save(&state) {
                            log::error!("Failed to save session: {}", e);
                        }
                        let _ = ack.send(());
                    }
                }
            }
        });

    match worker {
        Ok(handle) => (tx, Some(handle)),
        Err(e) => {
            // Requests queue up unread; the session simply is not persisted.
            log::error!("Failed to spawn session save worker: {}", e);
            (tx, None)
        }
    }
}

/// Session watcher backed by a [`WindowStateStore`].
pub struct SessionWatcher {
    windows: BTreeMap<WindowId, WindowState>,
    recording: bool,
    exited: bool,
    save_tx: Option<mpsc::Sender<SaveRequest>>,
    worker: Option<JoinHandle<()>>,
}

impl SessionWatcher {
    pub fn new(store: WindowStateStore) -> Self {
        let (tx, worker) = start_save_worker(store);
        Self {
            windows: BTreeMap::new(),
            recording: true,
            exited: false,
            save_tx: Some(tx),
            worker,
        }
    }

    /// Current session as it would be written now, in window creation order.
    pub fn snapshot(&self, clean_exit: bool) -> BrowsingSessionState {
        BrowsingSessionState::new(clean_exit, self.windows.values().cloned().collect())
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn watched_count(&self) -> usize {
        self.windows.len()
    }

    pub fn recorded_state(&self, window: WindowId) -> Option<&WindowState> {
        self.windows.get(&window)
    }

    fn persist(&self) {
        if let Some(tx) = &self.save_tx {
            let _ = tx.send(SaveRequest::Save(self.snapshot(false)));
        }
    }
}

impl SessionWatcherTrait for SessionWatcher {
    fn watch_window(&mut self, window: &ShellWindowHandle, initial: WindowState) {
        if !self.recording {
            return;
        }
        self.windows.insert(window.window_id, initial);
        self.persist();
    }

    fn update_geometry(&mut self, window: WindowId, bounds: Rect) {
        if !self.recording {
            return;
        }
        if let Some(state) = self.windows.get_mut(&window) {
            state.x = Some(bounds.x);
            state.y = Some(bounds.y);
            state.width = bounds.width;
            state.height = bounds.height;
            self.persist();
        }
    }

    fn update_pages(&mut self, window: WindowId, pages: Vec<PageDescriptor>) {
        if !self.recording {
            return;
        }
        if let Some(state) = self.windows.get_mut(&window) {
            state.pages = pages;
            self.persist();
        }
    }

    fn unwatch_window(&mut self, window: WindowId) {
        if !self.recording {
            return;
        }
        if self.windows.remove(&window).is_some() {
            self.persist();
        }
    }

    fn stop_recording(&mut self) {
        self.recording = false;
    }

    fn exit(&mut self) {
        if self.exited {
            return;
        }
        self.exited = true;

        if let Some(tx) = self.save_tx.take() {
            let (ack_tx, ack_rx) = mpsc::channel();
            if tx.send(SaveRequest::Flush(self.snapshot(true), ack_tx)).is_ok() {
                let _ = ack_rx.recv();
            }
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        log::info!("Session watcher flushed {} window(s)", self.windows.len());
    }
}

impl Drop for SessionWatcher {
    fn drop(&mut self) {
        // Dropping the sender lets the worker drain and stop.
        self.save_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
