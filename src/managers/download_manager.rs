//! Download Manager.
//!
//! Attaches download presentation to shell windows. Each download is shown
//! by the window it started from; when that window has no listener (or
//! closes), the most recently registered listening window takes over.

use uuid::Uuid;

use crate::types::download::{DownloadItem, DownloadStatus};
use crate::types::errors::DownloadError;
use crate::types::window::{ShellWindowHandle, WindowId};

/// Trait defining download routing operations.
pub trait DownloadManagerTrait {
    fn register_listener(&mut self, window: &ShellWindowHandle);
    fn unregister_listener(&mut self, window: WindowId);
    fn start_download(&mut self, origin: WindowId, url: &str, size: Option<u64>) -> String;
    fn update_progress(&mut self, id: &str, downloaded: u64) -> Result<(), DownloadError>;
    fn complete_download(&mut self, id: &str) -> Result<(), DownloadError>;
    fn cancel_download(&mut self, id: &str) -> Result<(), DownloadError>;
    fn fail_download(&mut self, id: &str, reason: &str) -> Result<(), DownloadError>;
    fn downloads_for(&self, window: WindowId) -> Vec<&DownloadItem>;
    fn get_download(&self, id: &str) -> Option<&DownloadItem>;
}

/// In-memory download routing table.
#[derive(Debug, Default)]
pub struct DownloadManager {
    listeners: Vec<WindowId>,
    downloads: Vec<DownloadItem>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self, window: WindowId) -> bool {
        self.listeners.contains(&window)
    }

    fn presenter_for(&self, origin: WindowId) -> WindowId {
        if self.is_listening(origin) {
            origin
        } else {
            self.listeners.last().copied().unwrap_or(origin)
        }
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut DownloadItem, DownloadError> {
        self.downloads
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))
    }
}

fn filename_from_url(url: &str) -> String {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').find(|segment| !segment.is_empty()))
        .filter(|segment| !segment.contains(':'))
        .unwrap_or("download")
        .to_string()
}

impl DownloadManagerTrait for DownloadManager {
    fn register_listener(&mut self, window: &ShellWindowHandle) {
        if !self.is_listening(window.window_id) {
            self.listeners.push(window.window_id);
        }
    }

    fn unregister_listener(&mut self, window: WindowId) {
        self.listeners.retain(|w| *w != window);

        let Some(&heir) = self.listeners.last() else {
            return;
        };
        for item in self
            .downloads
            .iter_mut()
            .filter(|d| d.window_id == window && d.status == DownloadStatus::InProgress)
        {
            item.window_id = heir;
        }
    }

    fn start_download(&mut self, origin: WindowId, url: &str, size: Option<u64>) -> String {
        let id = Uuid::new_v4().to_string();
        let window_id = self.presenter_for(origin);
        self.downloads.push(DownloadItem {
            id: id.clone(),
            url: url.to_string(),
            filename: filename_from_url(url),
            size,
            downloaded: 0,
            status: DownloadStatus::InProgress,
            window_id,
        });
        log::debug!("Download {} presented by {}", id, window_id);
        id
    }

    fn update_progress(&mut self, id: &str, downloaded: u64) -> Result<(), DownloadError> {
        let item = self.item_mut(id)?;
        if item.status != DownloadStatus::InProgress {
            return Err(DownloadError::AlreadyCompleted(id.to_string()));
        }
        item.downloaded = downloaded;
        Ok(())
    }

    fn complete_download(&mut self, id: &str) -> Result<(), DownloadError> {
        let item = self.item_mut(id)?;
        if item.status != DownloadStatus::InProgress {
            return Err(DownloadError::AlreadyCompleted(id.to_string()));
        }
        if let Some(size) = item.size {
            item.downloaded = size;
        }
        item.status = DownloadStatus::Completed;
        Ok(())
    }

    fn cancel_download(&mut self, id: &str) -> Result<(), DownloadError> {
        let item = self.item_mut(id)?;
        if item.status != DownloadStatus::InProgress {
            return Err(DownloadError::AlreadyCompleted(id.to_string()));
        }
        item.status = DownloadStatus::Cancelled;
        Ok(())
    }

    fn fail_download(&mut self, id: &str, reason: &str) -> Result<(), DownloadError> {
        let item = self.item_mut(id)?;
        if item.status != DownloadStatus::InProgress {
            return Err(DownloadError::AlreadyCompleted(id.to_string()));
        }
        log::warn!("Download {} failed: {}", id, reason);
        item.status = DownloadStatus::Failed(reason.to_string());
        Ok(())
    }

    fn downloads_for(&self, window: WindowId) -> Vec<&DownloadItem> {
        self.downloads.iter().filter(|d| d.window_id == window).collect()
    }

    fn get_download(&self, id: &str) -> Option<&DownloadItem> {
        self.downloads.iter().find(|d| d.id == id)
    }
}
