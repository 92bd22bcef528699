#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hfd_relay::artifact::{ArtifactSource, FallbackReason};
use hfd_relay::cli::RelayArgs;
use hfd_relay::config::{NotifyChannel, RelayConfig};
use hfd_relay::error::{AuthError, ConfigError, RelayError, ResolveError, TransferError};
use hfd_relay::install::HostPlatform;
use hfd_relay::session::{AccountIdentity, DriveConnector, RemoteDrive, get_authenticated_session};
use hfd_relay::transfer::{TransferKind, TransferTarget};
use hfd_relay::{Pipeline, PipelineOutcome};
use tempfile::{TempDir, tempdir};

type CallLog = Arc<Mutex<Vec<String>>>;

struct FakeConnector {
    identity: Option<AccountIdentity>,
    calls: CallLog,
}

struct FakeDrive {
    identity: Option<AccountIdentity>,
    calls: CallLog,
}

impl DriveConnector for FakeConnector {
    type Drive = FakeDrive;

    fn connect(&self, channel: NotifyChannel) -> Result<FakeDrive, AuthError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("connect:{}", channel.email));
        Ok(FakeDrive {
            identity: self.identity.clone(),
            calls: Arc::clone(&self.calls),
        })
    }
}

impl RemoteDrive for FakeDrive {
    async fn personal_info(&self) -> Result<Option<AccountIdentity>, AuthError> {
        self.calls.lock().unwrap().push("whoami".to_string());
        Ok(self.identity.clone())
    }

    async fn upload_file(&self, path: &Path, target: &TransferTarget) -> Result<(), TransferError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("file:{}:{}", path.display(), target.parent_file_id));
        Ok(())
    }

    async fn upload_folder(
        &self,
        path: &Path,
        target: &TransferTarget,
    ) -> Result<(), TransferError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("folder:{}:{}", path.display(), target.parent_file_id));
        Ok(())
    }
}

/// Scratch layout: an isolated bin directory and a working directory
struct Harness {
    _root: TempDir,
    bin: PathBuf,
    work: PathBuf,
    config: RelayConfig,
    calls: CallLog,
}

impl Harness {
    fn new() -> Self {
        let root = tempdir().unwrap();
        let bin = root.path().join("bin");
        let work = root.path().join("work");
        fs::create_dir(&bin).unwrap();
        fs::create_dir(&work).unwrap();

        let mut config = RelayConfig::default();
        config.downloader.search_path = Some(bin.to_string_lossy().into_owned());
        config.installer.posix_shell = "sh".to_string();
        config.installer.posix_script = "exit 3".to_string();
        config.notify.email = Some("relay@example.com".to_string());
        config.notify.host = Some("smtp.example.com".to_string());
        config.notify.password = Some("secret".to_string());
        config.notify.password_env = None;

        Self {
            _root: root,
            bin,
            work,
            config,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Install a fake downloader whose body is a shell script
    fn downloader(&self, body: &str) {
        write_script(&self.bin.join("hfdownloader"), body);
    }

    fn pipeline(&self, identity: Option<AccountIdentity>) -> Pipeline<FakeConnector> {
        Pipeline::new(
            self.config.clone(),
            &self.work,
            HostPlatform::Posix,
            FakeConnector {
                identity,
                calls: Arc::clone(&self.calls),
            },
        )
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn uploads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with("file:") || call.starts_with("folder:"))
            .collect()
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn identity() -> Option<AccountIdentity> {
    Some(AccountIdentity {
        user_id: "user-1".to_string(),
        nick_name: Some("relay".to_string()),
    })
}

fn no_args() -> RelayArgs {
    RelayArgs {
        parent_file_id: None,
        drive_id: None,
        help: false,
    }
}

fn forwarded(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

async fn run(harness: &Harness, args: &[&str]) -> Result<PipelineOutcome, RelayError> {
    harness
        .pipeline(identity())
        .run(&no_args(), &forwarded(args))
        .await
}

#[tokio::test]
async fn uploads_the_single_new_directory() {
    let harness = Harness::new();
    harness.downloader("mkdir llama-7b && mkdir .hf-cache");

    let outcome = run(&harness, &["-m", "meta/llama-7b"]).await.unwrap();

    let expected = harness.work.join("llama-7b");
    assert_eq!(outcome.artifact.path, expected);
    assert_eq!(outcome.artifact.source, ArtifactSource::Detected);
    assert_eq!(outcome.kind, TransferKind::Folder);
    assert_eq!(
        harness.uploads(),
        vec![format!("folder:{}:root", expected.display())]
    );
}

#[tokio::test]
async fn uploads_a_single_new_file() {
    let harness = Harness::new();
    harness.downloader("echo weights > model.gguf");

    let outcome = run(&harness, &[]).await.unwrap();

    assert_eq!(outcome.kind, TransferKind::File);
    assert_eq!(outcome.artifact.path, harness.work.join("model.gguf"));
}

#[tokio::test]
async fn explicit_storage_wins_over_new_entries() {
    let harness = Harness::new();
    let out = harness.work.parent().unwrap().join("out");
    // $1 is -s, $2 the storage path
    harness.downloader("touch cache.tmp && mkdir -p \"$2\"");

    let outcome = run(&harness, &["-s", out.to_str().unwrap()]).await.unwrap();

    assert_eq!(outcome.artifact.path, out);
    assert_eq!(outcome.artifact.source, ArtifactSource::Explicit);
    assert_eq!(harness.uploads(), vec![format!("folder:{}:root", out.display())]);
}

#[tokio::test]
async fn ambiguous_result_uploads_the_working_directory() {
    let harness = Harness::new();
    harness.downloader("mkdir a && touch b.txt");

    let outcome = run(&harness, &[]).await.unwrap();

    assert_eq!(outcome.artifact.path, harness.work);
    assert_eq!(
        outcome.artifact.source,
        ArtifactSource::Fallback(FallbackReason::MultipleNewEntries(2))
    );
    assert_eq!(outcome.kind, TransferKind::Folder);
}

#[tokio::test]
async fn strict_policy_fails_when_nothing_appears() {
    let mut harness = Harness::new();
    harness.config.artifact.fail_on_empty = true;
    harness.downloader("exit 0");

    let err = run(&harness, &[]).await.unwrap_err();

    assert!(matches!(
        err,
        RelayError::Resolve(ResolveError::NothingProduced(_))
    ));
    assert!(harness.uploads().is_empty());
}

#[tokio::test]
async fn missing_result_is_never_uploaded() {
    let harness = Harness::new();
    let out = harness.work.join("not-there");
    harness.downloader("exit 0");

    let err = run(&harness, &["--storage", out.to_str().unwrap()])
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Resolve(ResolveError::Missing(_))));
    assert_eq!(err.exit_code(), 1);
    assert!(harness.uploads().is_empty());
}

#[tokio::test]
async fn download_failure_propagates_the_tool_exit_code() {
    let harness = Harness::new();
    harness.downloader("exit 7");

    let err = run(&harness, &[]).await.unwrap_err();

    assert_eq!(err.exit_code(), 7);
    assert!(harness.uploads().is_empty());
}

#[tokio::test]
async fn empty_identity_stops_before_the_download() {
    let harness = Harness::new();
    harness.downloader("touch downloaded");

    let err = harness
        .pipeline(None)
        .run(&no_args(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Auth(AuthError::EmptyIdentity)));
    assert_eq!(err.exit_code(), 1);
    assert!(!harness.work.join("downloaded").exists());
}

#[tokio::test]
async fn blank_user_id_counts_as_empty_identity() {
    let harness = Harness::new();
    harness.downloader("touch downloaded");
    let blank = Some(AccountIdentity {
        user_id: "  ".to_string(),
        nick_name: None,
    });

    let err = harness.pipeline(blank).run(&no_args(), &[]).await.unwrap_err();

    assert!(matches!(err, RelayError::Auth(AuthError::EmptyIdentity)));
    assert!(!harness.work.join("downloaded").exists());
}

#[tokio::test]
async fn unconfigured_channel_is_an_auth_failure() {
    let mut harness = Harness::new();
    harness.config.notify.email = None;
    harness.downloader("touch downloaded");

    let err = run(&harness, &[]).await.unwrap_err();

    assert!(matches!(
        err,
        RelayError::Auth(AuthError::ChannelNotConfigured(_))
    ));
    assert!(harness.calls().is_empty());
    assert!(!harness.work.join("downloaded").exists());
}

#[tokio::test]
async fn failed_install_stops_before_authentication() {
    let harness = Harness::new();

    let err = run(&harness, &[]).await.unwrap_err();

    assert!(matches!(
        err,
        RelayError::Config(ConfigError::ToolUnavailable { .. })
    ));
    assert_eq!(err.exit_code(), 1);
    assert!(harness.calls().is_empty());
}

#[tokio::test]
async fn successful_install_continues_the_pipeline() {
    let mut harness = Harness::new();
    let tool = harness.bin.join("hfdownloader");
    harness.config.installer.posix_script = format!(
        "printf '#!/bin/sh\\nmkdir fetched\\n' > '{0}' && chmod 755 '{0}'",
        tool.display()
    );

    let outcome = run(&harness, &[]).await.unwrap();

    assert!(tool.exists());
    assert_eq!(outcome.artifact.path, harness.work.join("fetched"));
}

#[tokio::test]
async fn authentication_happens_before_the_download() {
    let harness = Harness::new();
    harness.downloader("mkdir model");

    run(&harness, &[]).await.unwrap();

    let calls = harness.calls();
    assert_eq!(calls[0], "connect:relay@example.com");
    assert_eq!(calls[1], "whoami");
    assert!(calls[2].starts_with("folder:"));
}

#[tokio::test]
async fn command_line_target_overrides_defaults() {
    let mut harness = Harness::new();
    harness.config.drive.default_drive_id = Some("configured".to_string());
    harness.downloader("mkdir model");
    let args = RelayArgs {
        parent_file_id: Some("folder-42".to_string()),
        drive_id: Some("drive-9".to_string()),
        help: false,
    };

    let outcome = harness
        .pipeline(identity())
        .run(&args, &[])
        .await
        .unwrap();

    assert_eq!(
        outcome.target,
        TransferTarget::new("folder-42", Some("drive-9".to_string()))
    );
    assert!(harness.uploads()[0].ends_with(":folder-42"));
}

#[tokio::test]
async fn configured_drive_is_used_when_not_given() {
    let mut harness = Harness::new();
    harness.config.drive.default_drive_id = Some("configured".to_string());
    harness.downloader("mkdir model");

    let outcome = run(&harness, &[]).await.unwrap();

    assert_eq!(
        outcome.target,
        TransferTarget::new("root", Some("configured".to_string()))
    );
}

#[tokio::test]
async fn session_carries_the_validated_identity() {
    let harness = Harness::new();
    let connector = FakeConnector {
        identity: identity(),
        calls: Arc::clone(&harness.calls),
    };

    let session = get_authenticated_session(&connector, &harness.config.notify)
        .await
        .unwrap();

    assert_eq!(session.identity().user_id, "user-1");
    assert_eq!(session.identity().nick_name.as_deref(), Some("relay"));
}

#[tokio::test]
async fn help_runs_tool_help_without_touching_the_drive() {
    let harness = Harness::new();
    let marker = harness.work.join("help-shown");
    harness.downloader(&format!(
        "[ \"$1\" = --help ] && touch '{}'",
        marker.display()
    ));

    harness.pipeline(identity()).show_help().await;

    assert!(marker.exists());
    assert!(harness.calls().is_empty());
}

#[tokio::test]
async fn help_without_the_tool_skips_install_and_drive() {
    let mut harness = Harness::new();
    let installed = harness.bin.join("installed");
    harness.config.installer.posix_script = format!("touch '{}'", installed.display());

    harness.pipeline(identity()).show_help().await;

    assert!(!installed.exists());
    assert!(harness.calls().is_empty());
}
