//! Session operations

use log::info;

use crate::config::NotifyConfig;
use crate::error::AuthError;
use crate::session::{AccountIdentity, DriveConnector, RemoteDrive};

/// A drive client whose credential has been confirmed by a round trip
pub struct Session<D> {
    drive: D,
    identity: AccountIdentity,
}

impl<D: RemoteDrive> Session<D> {
    pub fn drive(&self) -> &D {
        &self.drive
    }

    pub fn identity(&self) -> &AccountIdentity {
        &self.identity
    }
}

/// Connect and validate exactly once.
///
/// A login challenge may be delivered interactively while this runs, so
/// failures are returned to the caller rather than retried.
pub async fn get_authenticated_session<C: DriveConnector>(
    connector: &C,
    notify: &NotifyConfig,
) -> Result<Session<C::Drive>, AuthError> {
    let channel = notify.channel()?;
    let drive = connector.connect(channel)?;

    let identity = drive
        .personal_info()
        .await?
        .filter(|identity| !identity.user_id.trim().is_empty())
        .ok_or(AuthError::EmptyIdentity)?;

    info!(
        "Logged in to drive as {}",
        identity.nick_name.as_deref().unwrap_or(&identity.user_id)
    );

    Ok(Session { drive, identity })
}
