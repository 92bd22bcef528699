//! Session manager
//!
//! Obtains an authenticated handle to the remote drive and proves it is
//! usable before any long-running work starts.

mod command_drive;
mod drive;
mod operations;

pub use command_drive::{CommandDrive, CommandDriveConnector};
pub use drive::{AccountIdentity, DriveConnector, RemoteDrive};
pub use operations::{Session, get_authenticated_session};
