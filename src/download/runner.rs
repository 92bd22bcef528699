//! Downloader invocation

use log::{error, info, warn};
use std::path::Path;
use tokio::process::Command;

use crate::error::DownloadError;

/// Run the downloader in `work_dir` and wait for it.
///
/// A non-zero exit is returned with the tool's own code; a tool killed by a
/// signal reports 1.
pub async fn run_downloader(
    program: &Path,
    forwarded_args: &[String],
    work_dir: &Path,
) -> Result<(), DownloadError> {
    info!("Running: {} {}", program.display(), forwarded_args.join(" "));

    let status = Command::new(program)
        .args(forwarded_args)
        .current_dir(work_dir)
        .status()
        .await
        .map_err(|source| DownloadError::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

    if status.success() {
        return Ok(());
    }

    error!("{} failed ({})", program.display(), status);
    Err(DownloadError::Failed {
        code: status.code().unwrap_or(1),
    })
}

/// Show the downloader's own `--help`. Its exit status is not interpreted.
pub async fn print_tool_help(program: Option<&Path>, name: &str) {
    let Some(program) = program else {
        warn!("{} is not installed; its help is unavailable", name);
        return;
    };

    if let Err(e) = Command::new(program).arg("--help").status().await {
        warn!("Failed to run {} --help: {}", program.display(), e);
    }
}
