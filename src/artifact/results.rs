//! Artifact resolution result types

use std::path::PathBuf;

/// Why the working directory itself was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoNewEntries,
    MultipleNewEntries(usize),
}

/// How the artifact path was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Taken from `-s` / `--storage` in the forwarded arguments
    Explicit,
    /// The single new top-level entry
    Detected,
    Fallback(FallbackReason),
}

/// The one path considered the result of the download stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub path: PathBuf,
    pub source: ArtifactSource,
}
