//! hfd-relay
//!
//! Fetch a model or dataset with an external downloader, then upload the
//! result to a remote drive.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod install;
pub mod pipeline;
pub mod probe;
pub mod session;
pub mod transfer;

pub use pipeline::{Pipeline, PipelineOutcome};

use log::{error, warn};
use std::ffi::OsString;
use std::path::Path;

use crate::cli::{Invocation, parse_invocation};
use crate::config::RelayConfig;
use crate::error::handlers::handle_error;
use crate::install::HostPlatform;
use crate::probe::ToolProbe;
use crate::session::CommandDriveConnector;

/// Parse `raw_args` (without the program name), run in `work_dir`, and
/// return the process exit code.
pub async fn run<I>(raw_args: I, work_dir: &Path) -> i32
where
    I: IntoIterator<Item = String>,
{
    let invocation = match parse_invocation(raw_args) {
        Ok(invocation) => invocation,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };

    let config = match (RelayConfig::load(work_dir), &invocation) {
        (Ok(config), _) => config,
        // Help never fails on a broken config file
        (Err(e), Invocation::Help) => {
            warn!("{}; showing help with default settings", e);
            RelayConfig::default()
        }
        (Err(e), Invocation::Run { .. }) => {
            error!("{}", e);
            return 1;
        }
    };

    let drive_probe = ToolProbe::new(config.drive.program.clone(), config.search_path(), work_dir);
    let pipeline = Pipeline::new(
        config,
        work_dir,
        HostPlatform::current(),
        CommandDriveConnector::new(drive_probe),
    );

    match invocation {
        Invocation::Help => {
            pipeline.show_help().await;
            0
        }
        Invocation::Run { args, forwarded } => match pipeline.run(&args, &forwarded).await {
            Ok(_) => 0,
            Err(e) => handle_error(&e),
        },
    }
}

/// Arguments as UTF-8 strings, or the first one that is not valid UTF-8.
///
/// Forwarded arguments must reach the downloader unchanged, so nothing is
/// converted lossily.
pub fn utf8_arguments<I>(raw_args: I) -> Result<Vec<String>, OsString>
where
    I: IntoIterator<Item = OsString>,
{
    raw_args.into_iter().map(OsString::into_string).collect()
}
