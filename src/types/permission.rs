use serde::{Deserialize, Serialize};

use super::window::WindowId;

/// Types of device permissions a page can request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PermissionType {
    Camera,
    Microphone,
    Geolocation,
    Notifications,
    Clipboard,
}

/// The decision for a permission request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PermissionValue {
    Allow,
    Deny,
    Ask,
}

/// A permission request awaiting a decision, owned by the window that raised it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PermissionRequest {
    pub id: String,
    pub window_id: WindowId,
    pub origin: String,
    pub permission_type: PermissionType,
}
