//! Artifact resolver
//!
//! Snapshots the working directory around the download and decides which
//! path the download actually produced.

mod operations;
mod results;
mod snapshot;

pub use operations::{
    detect_new_items, enforce_fallback_policy, explicit_storage_path, resolve_destination,
    verify_exists,
};
pub use results::{ArtifactSource, FallbackReason, ResolvedArtifact};
pub use snapshot::DirectorySnapshot;
