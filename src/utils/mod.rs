//! Utility functions shared by the CLI and the TUI.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration and app data directory (XDG-compliant)
//! - [`logging`] - tracing subscriber setup
//! - [`paths`] - Home expansion and symbol directory validation

pub mod app_data;
pub mod logging;
pub mod paths;

pub use app_data::*;
pub use paths::*;
