use log::info;
use std::path::{Path, PathBuf};

use crate::artifact::{
    DirectorySnapshot, ResolvedArtifact, enforce_fallback_policy, resolve_destination,
    verify_exists,
};
use crate::cli::{RelayArgs, usage};
use crate::config::RelayConfig;
use crate::download::{print_tool_help, run_downloader};
use crate::error::RelayError;
use crate::install::{HostPlatform, Installer};
use crate::probe::{ToolProbe, ensure_tool_available};
use crate::session::{DriveConnector, get_authenticated_session};
use crate::transfer::{TransferKind, TransferTarget, upload};

/// What a successful run uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub artifact: ResolvedArtifact,
    pub kind: TransferKind,
    pub target: TransferTarget,
}

pub struct Pipeline<C> {
    config: RelayConfig,
    work_dir: PathBuf,
    platform: HostPlatform,
    connector: C,
}

impl<C: DriveConnector> Pipeline<C> {
    pub fn new(config: RelayConfig, work_dir: &Path, platform: HostPlatform, connector: C) -> Self {
        Self {
            config,
            work_dir: work_dir.to_path_buf(),
            platform,
            connector,
        }
    }

    fn tool_probe(&self) -> ToolProbe {
        ToolProbe::new(
            self.config.downloader.program.clone(),
            self.config.search_path(),
            &self.work_dir,
        )
    }

    /// Own usage followed by the downloader's help. Touches no network.
    pub async fn show_help(&self) {
        println!("{}", usage());
        println!("\n--- {} help below ---\n", self.config.downloader.program);
        let probe = self.tool_probe();
        print_tool_help(probe.locate().as_deref(), probe.name()).await;
    }

    /// Run the whole pipeline once.
    ///
    /// Login happens before the download so that an interactive challenge
    /// shows up immediately instead of after the download finishes.
    pub async fn run(
        &self,
        args: &RelayArgs,
        forwarded: &[String],
    ) -> Result<PipelineOutcome, RelayError> {
        let probe = self.tool_probe();
        let installer = Installer::new(self.platform, self.config.installer.clone(), probe.clone());
        let tool = ensure_tool_available(&probe, &installer).await?;

        let session = get_authenticated_session(&self.connector, &self.config.notify).await?;

        let before = DirectorySnapshot::capture(&self.work_dir)?;
        info!(
            "Captured {} entries in {} before download",
            before.len(),
            self.work_dir.display()
        );

        run_downloader(&tool, forwarded, &self.work_dir).await?;

        let artifact = resolve_destination(&before, forwarded)?;
        enforce_fallback_policy(&artifact, self.config.artifact.fail_on_empty)?;
        verify_exists(&artifact)?;

        let target = self.transfer_target(args);
        let kind = upload(&session, &artifact.path, &target).await?;

        Ok(PipelineOutcome {
            artifact,
            kind,
            target,
        })
    }

    /// Command-line values first, then configured defaults
    fn transfer_target(&self, args: &RelayArgs) -> TransferTarget {
        let parent = args
            .parent_file_id
            .clone()
            .unwrap_or_else(|| self.config.drive.default_parent_file_id.clone());
        let drive_id = args
            .drive_id
            .clone()
            .or_else(|| self.config.drive.default_drive_id.clone());
        TransferTarget::new(parent, drive_id)
    }
}
