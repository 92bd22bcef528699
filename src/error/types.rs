//! Error types
//!
//! Defines domain-specific error types for each stage of the relay pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Configuration errors: the environment cannot run the pipeline at all.
#[derive(Debug)]
pub enum ConfigError {
    ToolUnavailable { tool: String, manual_url: String },
    Invalid(String),
    Load(config::ConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ToolUnavailable { tool, manual_url } => write!(
                f,
                "{} binary not found and auto-install failed; install it manually: {}",
                tool, manual_url
            ),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::Load(e) => write!(f, "Failed to load configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        ConfigError::Load(error)
    }
}

/// Session manager errors
#[derive(Debug)]
pub enum AuthError {
    ChannelNotConfigured(String),
    ClientUnavailable(String),
    ClientFailed(String),
    EmptyIdentity,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::ChannelNotConfigured(field) => {
                write!(f, "Login notification channel not configured: missing {}", field)
            }
            AuthError::ClientUnavailable(msg) => write!(f, "Drive client unavailable: {}", msg),
            AuthError::ClientFailed(msg) => write!(f, "Drive client call failed: {}", msg),
            AuthError::EmptyIdentity => write!(f, "Drive returned an empty account identity"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Download subprocess errors
#[derive(Debug)]
pub enum DownloadError {
    Spawn { program: PathBuf, source: io::Error },
    Failed { code: i32 },
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Spawn { program, source } => {
                write!(f, "Failed to start {}: {}", program.display(), source)
            }
            DownloadError::Failed { code } => write!(f, "Downloader failed with exit code {}", code),
        }
    }
}

impl std::error::Error for DownloadError {}

/// Artifact resolution errors
#[derive(Debug)]
pub enum ResolveError {
    Snapshot { path: PathBuf, source: io::Error },
    Missing(PathBuf),
    NothingProduced(PathBuf),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Snapshot { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            ResolveError::Missing(path) => write!(
                f,
                "Download seems to have failed: {} does not exist",
                path.display()
            ),
            ResolveError::NothingProduced(path) => write!(
                f,
                "Download seems to have failed: no new entries appeared in {}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Transfer executor errors
#[derive(Debug)]
pub enum TransferError {
    Spawn(io::Error),
    Failed { path: PathBuf, status: String },
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Spawn(e) => write!(f, "Failed to start drive client: {}", e),
            TransferError::Failed { path, status } => {
                write!(f, "Upload of {} failed: {}", path.display(), status)
            }
        }
    }
}

impl std::error::Error for TransferError {}

/// Top-level error that encompasses every stage
#[derive(Debug)]
pub enum RelayError {
    Config(ConfigError),
    Auth(AuthError),
    Download(DownloadError),
    Resolve(ResolveError),
    Transfer(TransferError),
}

impl RelayError {
    /// Process exit status for this failure.
    ///
    /// A failed download mirrors the downloader's own code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            RelayError::Download(DownloadError::Failed { code }) => *code,
            _ => 1,
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Config(e) => write!(f, "Configuration error: {}", e),
            RelayError::Auth(e) => write!(f, "Authentication error: {}", e),
            RelayError::Download(e) => write!(f, "Download error: {}", e),
            RelayError::Resolve(e) => write!(f, "Resolution error: {}", e),
            RelayError::Transfer(e) => write!(f, "Transfer error: {}", e),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<ConfigError> for RelayError {
    fn from(error: ConfigError) -> Self {
        RelayError::Config(error)
    }
}

impl From<AuthError> for RelayError {
    fn from(error: AuthError) -> Self {
        RelayError::Auth(error)
    }
}

impl From<DownloadError> for RelayError {
    fn from(error: DownloadError) -> Self {
        RelayError::Download(error)
    }
}

impl From<ResolveError> for RelayError {
    fn from(error: ResolveError) -> Self {
        RelayError::Resolve(error)
    }
}

impl From<TransferError> for RelayError {
    fn from(error: TransferError) -> Self {
        RelayError::Transfer(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_failure_mirrors_tool_exit_code() {
        let err = RelayError::from(DownloadError::Failed { code: 42 });
        assert_eq!(err.exit_code(), 42);
    }

    #[test]
    fn other_failures_exit_with_one() {
        assert_eq!(RelayError::from(AuthError::EmptyIdentity).exit_code(), 1);
        assert_eq!(
            RelayError::from(ResolveError::Missing(PathBuf::from("/nope"))).exit_code(),
            1
        );
        let tool = ConfigError::ToolUnavailable {
            tool: "hfdownloader".into(),
            manual_url: "https://example.invalid".into(),
        };
        assert_eq!(RelayError::from(tool).exit_code(), 1);
    }
}
