//! Command-line surface
//!
//! Separates the relay's own options from the tokens forwarded to the
//! downloader, then parses the own options with clap.

mod args;
mod parser;

pub use args::{Invocation, RelayArgs, parse_invocation, usage};
pub use parser::{SplitArgs, split_arguments};
