//! Transfer executor
//!
//! Hands the resolved artifact to the drive session as a single-file or
//! whole-folder upload.

pub mod operations;
pub mod results;

pub use operations::upload;
pub use results::{TransferKind, TransferTarget};
