//! Installer
//!
//! Platform-dispatching bootstrap for the download tool.

mod operations;
mod platform;

pub use operations::Installer;
pub use platform::HostPlatform;
