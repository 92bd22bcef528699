//! Orchestrator
//!
//! Sequences pre-flight, authentication, download, resolution and transfer.

pub mod core;

pub use self::core::{Pipeline, PipelineOutcome};
