//! Own options of the relay

use clap::{ArgAction, CommandFactory, Parser};

use crate::cli::split_arguments;

/// Download a model or dataset with hfdownloader and upload it to the drive.
///
/// Options not listed here are passed to hfdownloader unchanged.
#[derive(Debug, Parser, PartialEq)]
#[command(name = "hfd-relay", disable_help_flag = true, args_override_self = true)]
pub struct RelayArgs {
    /// Target folder file_id on the drive [default: root]
    #[arg(long, value_name = "ID")]
    pub parent_file_id: Option<String>,

    /// Drive ID [default: the account's default drive]
    #[arg(long, value_name = "ID")]
    pub drive_id: Option<String>,

    /// Show this help message and the hfdownloader help
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,
}

/// A parsed command line
#[derive(Debug, PartialEq)]
pub enum Invocation {
    Help,
    Run {
        args: RelayArgs,
        forwarded: Vec<String>,
    },
}

/// Parse the arguments after the program name
pub fn parse_invocation<I>(raw: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = String>,
{
    let split = split_arguments(raw);
    let program = std::iter::once("hfd-relay".to_string());
    let args = RelayArgs::try_parse_from(program.chain(split.own))?;

    if args.help {
        return Ok(Invocation::Help);
    }
    Ok(Invocation::Run {
        args,
        forwarded: split.forwarded,
    })
}

/// Rendered usage of the own options
pub fn usage() -> String {
    RelayArgs::command().render_help().to_string()
}
