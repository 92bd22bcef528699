//! Tool discovery operations

use log::{info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::install::Installer;

/// Looks up one executable by name on a fixed search path.
///
/// The search path is held explicitly so that the lookup after an install
/// sees the same directories as the lookup before it.
#[derive(Debug, Clone)]
pub struct ToolProbe {
    name: String,
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl ToolProbe {
    pub fn new(name: impl Into<String>, search_path: Option<OsString>, cwd: &Path) -> Self {
        Self {
            name: name.into(),
            search_path,
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the tool, if it is discoverable
    pub fn locate(&self) -> Option<PathBuf> {
        self.locate_named(&self.name)
    }

    /// Look up another executable on the same search path
    pub fn locate_named(&self, name: &str) -> Option<PathBuf> {
        which::which_in(name, self.search_path.as_ref(), &self.cwd).ok()
    }
}

/// Returns the path of the tool, running the installer if it is missing.
///
/// A failed installation is a configuration error; the caller must not go on
/// to download anything.
pub async fn ensure_tool_available(
    probe: &ToolProbe,
    installer: &Installer,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = probe.locate() {
        info!("Found {} at {}", probe.name(), path.display());
        return Ok(path);
    }

    warn!("{} not found, attempting automatic install...", probe.name());
    if installer.install_tool().await {
        if let Some(path) = probe.locate() {
            return Ok(path);
        }
    }

    Err(ConfigError::ToolUnavailable {
        tool: probe.name().to_string(),
        manual_url: installer.manual_url().to_string(),
    })
}
