//! Environment prober
//!
//! Verifies that the external download tool is discoverable on the search
//! path, installing it when it is not.

mod operations;

pub use operations::{ToolProbe, ensure_tool_available};
