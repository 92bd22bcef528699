//! Download subprocess boundary
//!
//! The downloader is opaque: its arguments are forwarded untouched and only
//! its exit status is interpreted.

mod runner;

pub use runner::{print_tool_help, run_downloader};
