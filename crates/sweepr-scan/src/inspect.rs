use std::path::Path;

use sweepr_core::models::descriptor::RepoDescriptor;
use sweepr_core::models::sync_state::SyncState;

use crate::command::{self, FETCH_TIMEOUT, REMOTE_TIMEOUT, STATUS_TIMEOUT};

/// Remote configuration extracted from a repository.
#[derive(Debug, Clone, Default)]
pub struct RemoteMetadata {
    pub remote_url: Option<String>,
    pub account: Option<String>,
}

/// Query the configured `origin` URL and derive the account from it.
///
/// Every failure mode (no remote, no git binary, timeout) is a valid
/// terminal state and yields both fields absent.
pub async fn remote_metadata(repo: &Path) -> RemoteMetadata {
    let url = match command::run_git(repo, &["remote", "get-url", "origin"], REMOTE_TIMEOUT).await {
        Ok(out) if out.success => out.stdout.trim().to_string(),
        Ok(_) => {
            tracing::debug!(repo = %repo.display(), "no origin remote configured");
            return RemoteMetadata::default();
        }
        Err(e) => {
            tracing::debug!(repo = %repo.display(), error = %e, "remote lookup failed");
            return RemoteMetadata::default();
        }
    };
    if url.is_empty() {
        return RemoteMetadata::default();
    }
    let account = parse_account(&url);
    RemoteMetadata {
        remote_url: Some(url),
        account,
    }
}

/// Derive `host/owner` from a remote URL, with one `.com` dropped from the
/// host: `https://github.com/acme/widget.git` → `github/acme`,
/// `git@gitlab.com:acme/widget.git` → `gitlab/acme`.
///
/// Only those two shapes are recognized; anything else is `None`.
pub fn parse_account(url: &str) -> Option<String> {
    parse_http_account(url).or_else(|| parse_ssh_account(url))
}

fn parse_http_account(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let mut parts = rest.splitn(3, '/');
    let host = parts.next()?;
    let owner = parts.next()?;
    // A repository segment must follow the owner.
    parts.next()?;
    if host.is_empty() || owner.is_empty() {
        return None;
    }
    Some(format!("{}/{owner}", host.replacen(".com", "", 1)))
}

fn parse_ssh_account(url: &str) -> Option<String> {
    let (_, rest) = url.split_once('@')?;
    let (host, path) = rest.split_once(':')?;
    let (owner, _) = path.split_once('/')?;
    if host.is_empty() || owner.is_empty() {
        return None;
    }
    Some(format!("{}/{owner}", host.replacen(".com", "", 1)))
}

/// Classify a repository's working tree against its remote.
///
/// A clean tree is probed with `git fetch --dry-run`, but the result is
/// `Synced` whether or not the probe reaches the network: offline must not
/// read as out of date.
pub async fn classify(repo: &Path) -> SyncState {
    let out = match command::run_git(repo, &["status", "--porcelain"], STATUS_TIMEOUT).await {
        Ok(out) if out.success => out,
        _ => return SyncState::Unknown,
    };

    if out.stdout.trim().is_empty() {
        if let Err(e) = command::run_git(repo, &["fetch", "--dry-run"], FETCH_TIMEOUT).await {
            tracing::debug!(repo = %repo.display(), error = %e, "fetch probe failed");
        }
        SyncState::Synced
    } else {
        SyncState::Dirty
    }
}

/// Approximate a repository's on-disk footprint from its `.git` tree.
///
/// Falls back to the directory-entry size of the repository root when the
/// measurement command is unavailable; worst case `0`, never an error.
pub async fn estimate_size(repo: &Path) -> u64 {
    match command::disk_usage(&repo.join(".git")).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(repo = %repo.display(), error = %e, "disk usage fallback");
            match tokio::fs::metadata(repo).await {
                Ok(meta) => meta.len(),
                Err(_) => 0,
            }
        }
    }
}

/// Assemble the descriptor for one repository root.
///
/// The three probes are independent and run concurrently; each resolves
/// internally to a safe default, so this cannot fail.
pub async fn build_descriptor(repo: &Path) -> RepoDescriptor {
    let (remote, sync_status, size_bytes) =
        tokio::join!(remote_metadata(repo), classify(repo), estimate_size(repo));

    let mut descriptor = RepoDescriptor::new(repo);
    descriptor.remote_url = remote.remote_url;
    descriptor.account = remote.account;
    descriptor.sync_status = sync_status;
    descriptor.size_bytes = size_bytes;
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    #[test]
    fn test_parse_account_https() {
        assert_eq!(
            parse_account("https://github.com/acme/widget.git"),
            Some("github/acme".to_string())
        );
        assert_eq!(
            parse_account("http://github.com/acme/widget"),
            Some("github/acme".to_string())
        );
    }

    #[test]
    fn test_parse_account_ssh() {
        assert_eq!(
            parse_account("git@gitlab.com:acme/widget.git"),
            Some("gitlab/acme".to_string())
        );
    }

    #[test]
    fn test_parse_account_keeps_non_com_host() {
        assert_eq!(
            parse_account("git@git.sr.ht:acme/widget.git"),
            Some("git.sr.ht/acme".to_string())
        );
    }

    #[test]
    fn test_parse_account_unrecognized_shapes() {
        assert_eq!(parse_account("not a url"), None);
        assert_eq!(parse_account("https://github.com/acme"), None);
        assert_eq!(parse_account("ftp://github.com/acme/widget"), None);
        assert_eq!(parse_account("git@github.com"), None);
    }

    #[tokio::test]
    async fn test_classify_non_repo_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(classify(dir.path()).await, SyncState::Unknown);
    }

    #[tokio::test]
    async fn test_classify_clean_repo_offline_is_synced() {
        if !git_available() {
            eprintln!("git not found, skipping");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        git(dir.path(), &["init", "-q"]);
        // No remote configured, so the fetch probe fails; still synced.
        assert_eq!(classify(dir.path()).await, SyncState::Synced);
    }

    #[tokio::test]
    async fn test_classify_pending_changes_is_dirty() {
        if !git_available() {
            eprintln!("git not found, skipping");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        git(dir.path(), &["init", "-q"]);
        std::fs::write(dir.path().join("uncommitted.txt"), "wip").unwrap();
        assert_eq!(classify(dir.path()).await, SyncState::Dirty);
    }

    #[tokio::test]
    async fn test_remote_metadata_without_remote() {
        let dir = tempfile::tempdir().unwrap();
        let meta = remote_metadata(dir.path()).await;
        assert!(meta.remote_url.is_none());
        assert!(meta.account.is_none());
    }

    #[tokio::test]
    async fn test_remote_metadata_reads_origin() {
        if !git_available() {
            eprintln!("git not found, skipping");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        git(dir.path(), &["init", "-q"]);
        git(
            dir.path(),
            &[
                "remote",
                "add",
                "origin",
                "https://github.com/acme/widget.git",
            ],
        );
        let meta = remote_metadata(dir.path()).await;
        assert_eq!(
            meta.remote_url.as_deref(),
            Some("https://github.com/acme/widget.git")
        );
        assert_eq!(meta.account.as_deref(), Some("github/acme"));
    }

    #[tokio::test]
    async fn test_estimate_size_degrades_without_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        // No .git tree to measure; the directory-entry fallback still answers.
        let size = estimate_size(dir.path()).await;
        let expected = std::fs::metadata(dir.path()).unwrap().len();
        assert_eq!(size, expected);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_estimate_size_measures_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        std::fs::create_dir(&git_dir).unwrap();
        std::fs::write(git_dir.join("blob"), vec![0u8; 4096]).unwrap();
        assert!(estimate_size(dir.path()).await >= 4096);
    }

    #[tokio::test]
    async fn test_build_descriptor_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("widget");
        std::fs::create_dir_all(repo.join(".git")).unwrap();

        let d = build_descriptor(&repo).await;
        assert_eq!(d.name, "widget");
        assert_eq!(d.local_path, repo);
        assert!(d.exists_locally);
        assert!(d.remote_url.is_none());
        assert!(d.account.is_none());
    }
}
