//! Directory snapshots

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;

/// Top-level, non-hidden entry names of one directory at one instant
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    root: PathBuf,
    entries: BTreeSet<OsString>,
}

impl DirectorySnapshot {
    pub fn capture(root: &Path) -> Result<Self, ResolveError> {
        let snapshot_error = |source| ResolveError::Snapshot {
            path: root.to_path_buf(),
            source,
        };

        let mut entries = BTreeSet::new();
        for entry in fs::read_dir(root).map_err(snapshot_error)? {
            let name = entry.map_err(snapshot_error)?.file_name();
            if !is_hidden(&name) {
                entries.insert(name);
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(&OsString::from(name))
    }

    /// Paths present in `self` but not in `earlier`, sorted by name
    pub fn added_since(&self, earlier: &DirectorySnapshot) -> Vec<PathBuf> {
        self.entries
            .difference(&earlier.entries)
            .map(|name| self.root.join(name))
            .collect()
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
