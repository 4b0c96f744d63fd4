//! Permission Manager.
//!
//! Tracks permission requests raised by pages until the user decides, keyed
//! by the shell window that owns the prompt. Closing a window denies all of
//! its outstanding requests.

use std::collections::HashSet;

use uuid::Uuid;

use crate::types::errors::PermissionError;
use crate::types::permission::{PermissionRequest, PermissionType, PermissionValue};
use crate::types::window::WindowId;

/// Trait defining permission request operations.
pub trait PermissionManagerTrait {
    fn request(&mut self, window: WindowId, origin: &str, perm_type: PermissionType) -> Result<String, PermissionError>;
    fn resolve(&mut self, id: &str, value: PermissionValue) -> Result<PermissionRequest, PermissionError>;
    fn pending_for(&self, window: WindowId) -> Vec<&PermissionRequest>;
    /// Denies and drops every outstanding request owned by `window`.
    fn deny_all_requests(&mut self, window: WindowId) -> Vec<PermissionRequest>;
}

/// In-memory permission request tracker.
#[derive(Debug, Default)]
pub struct PermissionManager {
    pending: Vec<PermissionRequest>,
    released: HashSet<WindowId>,
}

impl PermissionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `deny_all_requests` ran for the window.
    pub fn is_released(&self, window: WindowId) -> bool {
        self.released.contains(&window)
    }

    /// Forgets closed windows. Called once no shell window is left.
    pub fn clear_released(&mut self) {
        self.released.clear();
    }
}

impl PermissionManagerTrait for PermissionManager {
    fn request(&mut self, window: WindowId, origin: &str, perm_type: PermissionType) -> Result<String, PermissionError> {
        if origin.is_empty() || !origin.contains("://") {
            return Err(PermissionError::InvalidOrigin(origin.to_string()));
        }

        let request = PermissionRequest {
            id: Uuid::new_v4().to_string(),
            window_id: window,
            origin: origin.to_string(),
            permission_type: perm_type,
        };

        // The window is gone; nobody can answer the prompt.
        if self.released.contains(&window) {
            log::debug!("Denied {} for closed {}", request.origin, window);
            return Ok(request.id);
        }

        let id = request.id.clone();
        self.pending.push(request);
        Ok(id)
    }

    fn resolve(&mut self, id: &str, value: PermissionValue) -> Result<PermissionRequest, PermissionError> {
        let index = self
            .pending
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| PermissionError::NotFound(id.to_string()))?;
        let request = self.pending.remove(index);
        log::debug!("{:?} {:?} for {}", value, request.permission_type, request.origin);
        Ok(request)
    }

    fn pending_for(&self, window: WindowId) -> Vec<&PermissionRequest> {
        self.pending.iter().filter(|r| r.window_id == window).collect()
    }

    fn deny_all_requests(&mut self, window: WindowId) -> Vec<PermissionRequest> {
        self.released.insert(window);

        let (denied, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|r| r.window_id == window);
        self.pending = kept;

        if !denied.is_empty() {
            log::info!("Denied {} pending permission request(s) for {}", denied.len(), window);
        }
        denied
    }
}
