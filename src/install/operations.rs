//! Installer operations
//!
//! Runs the trusted bootstrap script through a host shell. Every failure is
//! reported as `false`; nothing here propagates an error.

use log::{error, info};
use std::io;
use std::path::PathBuf;
use tokio::process::Command;

use crate::config::InstallerConfig;
use crate::install::HostPlatform;
use crate::probe::ToolProbe;

pub struct Installer {
    platform: HostPlatform,
    config: InstallerConfig,
    probe: ToolProbe,
}

impl Installer {
    pub fn new(platform: HostPlatform, config: InstallerConfig, probe: ToolProbe) -> Self {
        Self {
            platform,
            config,
            probe,
        }
    }

    pub fn manual_url(&self) -> &str {
        &self.config.manual_url
    }

    /// Install the tool; true only if it is discoverable afterwards.
    pub async fn install_tool(&self) -> bool {
        let Some(mut command) = self.script_command() else {
            return false;
        };

        match command.status().await {
            Ok(status) if status.success() => {}
            Ok(status) => {
                error!("Automatic install of {} failed ({})", self.probe.name(), status);
                return false;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                error!("Shell or runtime required for automatic install is missing: {}", e);
                return false;
            }
            Err(e) => {
                error!("Failed to run installer for {}: {}", self.probe.name(), e);
                return false;
            }
        }

        if self.probe.locate().is_some() {
            info!("{} installed successfully", self.probe.name());
            true
        } else {
            error!("{} still not found after automatic install", self.probe.name());
            false
        }
    }

    /// Build the shell invocation for this platform, or `None` if no usable
    /// shell exists.
    fn script_command(&self) -> Option<Command> {
        match self.platform {
            HostPlatform::Windows => {
                let Some(shell) = self.windows_shell() else {
                    error!(
                        "No PowerShell found (tried {:?}); cannot install {}",
                        self.config.windows_shells,
                        self.probe.name()
                    );
                    return None;
                };
                info!("Installing {} with {}...", self.probe.name(), shell.display());
                let mut command = Command::new(shell);
                command
                    .args(["-NoLogo", "-NoProfile", "-Command"])
                    .arg(&self.config.windows_script);
                Some(command)
            }
            HostPlatform::Posix => {
                info!(
                    "Installing {} with {}...",
                    self.probe.name(),
                    self.config.posix_shell
                );
                let mut command = Command::new(&self.config.posix_shell);
                command.arg("-c").arg(&self.config.posix_script);
                Some(command)
            }
        }
    }

    fn windows_shell(&self) -> Option<PathBuf> {
        self.config
            .windows_shells
            .iter()
            .find_map(|shell| self.probe.locate_named(shell))
    }
}
