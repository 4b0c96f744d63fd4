// Shell-window type definitions
// Each submodule defines types used across the application.

pub mod download;
pub mod errors;
pub mod permission;
pub mod session;
pub mod window;
