//! Error handling
//!
//! Defines error types and handling for the relay pipeline.

pub mod handlers;
pub mod types;

pub use types::*;
