//! Transfer operations
//!
//! No local retry or resume: any error from the drive client is returned as is.

use log::info;
use std::path::Path;

use crate::error::TransferError;
use crate::session::{RemoteDrive, Session};
use crate::transfer::{TransferKind, TransferTarget};

/// Upload `path` below the target folder, choosing folder or file upload
pub async fn upload<D: RemoteDrive>(
    session: &Session<D>,
    path: &Path,
    target: &TransferTarget,
) -> Result<TransferKind, TransferError> {
    let account = session
        .identity()
        .nick_name
        .as_deref()
        .unwrap_or(&session.identity().user_id);

    let kind = if path.is_dir() {
        info!(
            "Uploading folder {} to {}'s drive (parent {})...",
            path.display(),
            account,
            target.parent_file_id
        );
        session.drive().upload_folder(path, target).await?;
        TransferKind::Folder
    } else {
        info!(
            "Uploading file {} to {}'s drive (parent {})...",
            path.display(),
            account,
            target.parent_file_id
        );
        session.drive().upload_file(path, target).await?;
        TransferKind::File
    };

    info!("Upload completed.");
    Ok(kind)
}
