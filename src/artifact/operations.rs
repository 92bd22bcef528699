//! Artifact resolution operations

use log::{info, warn};
use std::path::{Component, Path, PathBuf};

use crate::artifact::{ArtifactSource, DirectorySnapshot, FallbackReason, ResolvedArtifact};
use crate::config::home_dir;
use crate::error::ResolveError;

const STORAGE_SHORT: &str = "-s";
const STORAGE_LONG: &str = "--storage";

/// The storage location the caller gave the downloader, if any.
///
/// `-s` is checked before `--storage`; a flag without a following value is
/// ignored. Relative paths resolve against `base`, and an empty value names
/// `base` itself.
pub fn explicit_storage_path(forwarded_args: &[String], base: &Path) -> Option<PathBuf> {
    let value_after = |flag: &str| {
        forwarded_args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|idx| forwarded_args.get(idx + 1))
    };

    let raw = value_after(STORAGE_SHORT)
        .or_else(|| value_after(STORAGE_LONG))
        .map(String::as_str)
        .or_else(|| {
            forwarded_args
                .iter()
                .find_map(|arg| arg.strip_prefix("--storage="))
        })?;

    if raw.is_empty() {
        return Some(base.to_path_buf());
    }
    Some(absolutize(&expand_home(raw), base))
}

/// New top-level, non-hidden entries of the snapshot root since `before`
pub fn detect_new_items(before: &DirectorySnapshot) -> Result<Vec<PathBuf>, ResolveError> {
    let after = DirectorySnapshot::capture(before.root())?;
    Ok(after.added_since(before))
}

/// Decide which path the download produced.
///
/// An explicit storage flag wins without looking at the filesystem. Otherwise
/// a single new entry is the result, and zero or several fall back to the
/// snapshot root.
pub fn resolve_destination(
    before: &DirectorySnapshot,
    forwarded_args: &[String],
) -> Result<ResolvedArtifact, ResolveError> {
    if let Some(path) = explicit_storage_path(forwarded_args, before.root()) {
        info!("Using explicit storage path {}", path.display());
        return Ok(ResolvedArtifact {
            path,
            source: ArtifactSource::Explicit,
        });
    }

    let mut new_items = detect_new_items(before)?;
    let resolved = match new_items.len() {
        1 => ResolvedArtifact {
            path: new_items.remove(0),
            source: ArtifactSource::Detected,
        },
        0 => {
            warn!(
                "No new entries appeared in {}; falling back to the whole directory",
                before.root().display()
            );
            ResolvedArtifact {
                path: before.root().to_path_buf(),
                source: ArtifactSource::Fallback(FallbackReason::NoNewEntries),
            }
        }
        n => {
            warn!(
                "{} new entries appeared in {}; uploading the whole directory",
                n,
                before.root().display()
            );
            ResolvedArtifact {
                path: before.root().to_path_buf(),
                source: ArtifactSource::Fallback(FallbackReason::MultipleNewEntries(n)),
            }
        }
    };

    info!("Resolved download result: {}", resolved.path.display());
    Ok(resolved)
}

/// Reject the zero-new-entries fallback when `fail_on_empty` is set
pub fn enforce_fallback_policy(
    resolved: &ResolvedArtifact,
    fail_on_empty: bool,
) -> Result<(), ResolveError> {
    if fail_on_empty
        && resolved.source == ArtifactSource::Fallback(FallbackReason::NoNewEntries)
    {
        return Err(ResolveError::NothingProduced(resolved.path.clone()));
    }
    Ok(())
}

/// The resolved path must exist before anything is uploaded
pub fn verify_exists(resolved: &ResolvedArtifact) -> Result<(), ResolveError> {
    if resolved.path.exists() {
        Ok(())
    } else {
        Err(ResolveError::Missing(resolved.path.clone()))
    }
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(raw),
    };
    match home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(raw),
    }
}

/// Join onto `base` when relative and drop `.`/`..` components lexically
fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
