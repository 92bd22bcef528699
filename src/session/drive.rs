//! Remote drive client seam

use serde::Deserialize;
use std::future::Future;
use std::path::Path;

use crate::config::NotifyChannel;
use crate::error::{AuthError, TransferError};
use crate::transfer::TransferTarget;

/// Account identity returned by the validity probe
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountIdentity {
    pub user_id: String,
    #[serde(default)]
    pub nick_name: Option<String>,
}

/// The operations the pipeline needs from a drive client.
pub trait RemoteDrive {
    /// Current account identity; `None` means the service no longer honors
    /// the stored credential.
    fn personal_info(&self) -> impl Future<Output = Result<Option<AccountIdentity>, AuthError>>;

    fn upload_file(
        &self,
        path: &Path,
        target: &TransferTarget,
    ) -> impl Future<Output = Result<(), TransferError>>;

    fn upload_folder(
        &self,
        path: &Path,
        target: &TransferTarget,
    ) -> impl Future<Output = Result<(), TransferError>>;
}

/// Builds a drive client bound to the login notification channel.
pub trait DriveConnector {
    type Drive: RemoteDrive;

    fn connect(&self, channel: NotifyChannel) -> Result<Self::Drive, AuthError>;
}
