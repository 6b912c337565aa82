use std::path::Path;

use sweepr_auth::{CredentialStore, MemoryStore, Session};
use sweepr_core::config::Config;
use sweepr_core::models::descriptor::RepoDescriptor;
use sweepr_core::models::sync_state::SyncState;
use sweepr_scan::inspect::parse_account;
use sweepr_scan::Scanner;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.max_scan_depth, 5);
    assert_eq!(config.scan_concurrency, 64);
    assert!(config.email.is_none());
    assert_eq!(config.api_base().as_str(), "https://app.sweepr.dev/");
}

#[test]
fn test_config_roundtrip() {
    let config = Config::default();
    let serialized = toml_roundtrip(&config);
    assert_eq!(config.max_scan_depth, serialized.max_scan_depth);
    assert_eq!(config.scan_concurrency, serialized.scan_concurrency);
}

fn toml_roundtrip(config: &Config) -> Config {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    config.save_to(&path).unwrap();
    Config::load_from(&path).unwrap()
}

#[test]
fn test_session_lifecycle_with_memory_store() {
    let store = MemoryStore::new();
    let mut config = Config::default();

    let session = Session {
        email: "dev@example.com".to_string(),
        access_token: "token".to_string(),
        refresh_token: None,
    };
    session.save(&store, &mut config).unwrap();

    let loaded = Session::load(&store, &config).unwrap().unwrap();
    assert_eq!(loaded.email, "dev@example.com");

    Session::clear(&store, &mut config).unwrap();
    assert!(Session::load(&store, &config).unwrap().is_none());
    assert_eq!(store.get("access-token").unwrap(), None);
}

#[test]
fn test_account_derivation() {
    assert_eq!(
        parse_account("https://github.com/acme/widget.git").as_deref(),
        Some("github/acme")
    );
    assert_eq!(
        parse_account("git@gitlab.com:acme/widget.git").as_deref(),
        Some("gitlab/acme")
    );
    assert_eq!(parse_account("file:///mnt/backup/widget"), None);
}

#[tokio::test]
async fn test_scan_reports_each_repo_once() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("a/.git")).unwrap();
    std::fs::create_dir_all(dir.path().join("b/c/.git")).unwrap();
    std::fs::create_dir_all(dir.path().join("node_modules/x/.git")).unwrap();

    let repos = Scanner::new(5, 8).scan(dir.path()).await;

    let mut names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a", "c"]);

    // local_path is the unique key within one scan.
    let mut paths: Vec<_> = repos.iter().map(|r| r.local_path.clone()).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), repos.len());

    for repo in &repos {
        assert!(repo.exists_locally);
        assert!(repo.local_path.is_absolute());
    }
}

#[test]
fn test_sync_payload_wire_shape() {
    let mut repo = RepoDescriptor::new(Path::new("/home/dev/projects/widget"));
    repo.remote_url = Some("https://github.com/acme/widget.git".to_string());
    repo.account = Some("github/acme".to_string());
    repo.sync_status = SyncState::Dirty;
    repo.size_bytes = 1024;

    let payload = serde_json::json!({ "repositories": [repo] });
    let entry = &payload["repositories"][0];
    assert_eq!(entry["name"], "widget");
    assert_eq!(entry["local_path"], "/home/dev/projects/widget");
    assert_eq!(entry["sync_status"], "dirty");
    assert_eq!(entry["size_bytes"], 1024);
    assert_eq!(entry["exists_locally"], true);
    assert!(entry.get("category").is_none());
}
