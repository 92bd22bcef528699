//! Transfer result types
//!
//! Describes where an upload goes and what kind of upload ran.

/// Destination of an upload on the remote drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTarget {
    pub parent_file_id: String,
    /// `None` uses the account's default drive
    pub drive_id: Option<String>,
}

impl TransferTarget {
    pub fn new(parent_file_id: impl Into<String>, drive_id: Option<String>) -> Self {
        Self {
            parent_file_id: parent_file_id.into(),
            drive_id,
        }
    }
}

/// Which upload capability was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    File,
    Folder,
}
