//! Drive client backed by an external bridge executable
//!
//! The bridge owns the drive protocol and its stored credential. It is
//! invoked once per operation:
//!
//! - `whoami` prints the account identity as JSON (`null` when logged out)
//! - `upload-file --path P --parent-file-id ID [--drive-id D]`
//! - `upload-folder --path P --parent-file-id ID [--drive-id D]`
//!
//! The login notification channel is handed over in `DRIVE_NOTIFY_*`
//! environment variables.

use log::debug;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::config::NotifyChannel;
use crate::error::{AuthError, TransferError};
use crate::probe::ToolProbe;
use crate::session::{AccountIdentity, DriveConnector, RemoteDrive};
use crate::transfer::TransferTarget;

/// Locates the bridge executable and binds it to a channel
pub struct CommandDriveConnector {
    probe: ToolProbe,
}

impl CommandDriveConnector {
    pub fn new(probe: ToolProbe) -> Self {
        Self { probe }
    }
}

impl DriveConnector for CommandDriveConnector {
    type Drive = CommandDrive;

    fn connect(&self, channel: NotifyChannel) -> Result<CommandDrive, AuthError> {
        let program = self.probe.locate().ok_or_else(|| {
            AuthError::ClientUnavailable(format!("{} not found on PATH", self.probe.name()))
        })?;
        Ok(CommandDrive { program, channel })
    }
}

pub struct CommandDrive {
    program: PathBuf,
    channel: NotifyChannel,
}

impl CommandDrive {
    fn command(&self, operation: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(operation)
            .env("DRIVE_NOTIFY_EMAIL", &self.channel.email)
            .env("DRIVE_NOTIFY_USER", &self.channel.user)
            .env("DRIVE_NOTIFY_PASSWORD", &self.channel.password)
            .env("DRIVE_NOTIFY_HOST", &self.channel.host)
            .env("DRIVE_NOTIFY_PORT", self.channel.port.to_string());
        command
    }

    fn upload_command(&self, operation: &str, path: &Path, target: &TransferTarget) -> Command {
        let mut command = self.command(operation);
        command
            .arg("--path")
            .arg(path)
            .arg("--parent-file-id")
            .arg(&target.parent_file_id);
        if let Some(drive_id) = &target.drive_id {
            command.arg("--drive-id").arg(drive_id);
        }
        command
    }

    async fn run_upload(mut command: Command, path: &Path) -> Result<(), TransferError> {
        debug!("Running drive client: {:?}", command);
        let status = command.status().await.map_err(TransferError::Spawn)?;
        if status.success() {
            Ok(())
        } else {
            Err(TransferError::Failed {
                path: path.to_path_buf(),
                status: status.to_string(),
            })
        }
    }
}

impl RemoteDrive for CommandDrive {
    async fn personal_info(&self) -> Result<Option<AccountIdentity>, AuthError> {
        let output = self
            .command("whoami")
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| {
                AuthError::ClientFailed(format!("failed to run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            return Err(AuthError::ClientFailed(format!(
                "whoami exited with {}",
                output.status
            )));
        }

        parse_identity(&output.stdout)
    }

    async fn upload_file(&self, path: &Path, target: &TransferTarget) -> Result<(), TransferError> {
        Self::run_upload(self.upload_command("upload-file", path, target), path).await
    }

    async fn upload_folder(
        &self,
        path: &Path,
        target: &TransferTarget,
    ) -> Result<(), TransferError> {
        Self::run_upload(self.upload_command("upload-folder", path, target), path).await
    }
}

/// Parse `whoami` output. Empty output and `null` are a missing identity.
fn parse_identity(stdout: &[u8]) -> Result<Option<AccountIdentity>, AuthError> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<AccountIdentity>>(text)
        .map_err(|e| AuthError::ClientFailed(format!("unreadable whoami output: {}", e)))
}
