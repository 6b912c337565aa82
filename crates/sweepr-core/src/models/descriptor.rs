use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::sync_state::SyncState;

/// One scanned repository, as shipped to the dashboard.
///
/// This is the single canonical shape for repository records across the
/// CLI and the sync payload. Fields the scanner cannot determine stay
/// `None` and are omitted from the wire format; dashboard-managed fields
/// (`category`, `tags`) ride along here so no consumer has to invent an ad
/// hoc variant of this struct.
///
/// Constructed once per scan and immutable afterwards; `local_path` is the
/// unique key within one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub name: String,
    pub local_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub sync_status: SyncState,
    pub size_bytes: u64,
    pub exists_locally: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl RepoDescriptor {
    /// A descriptor with nothing but its location known.
    pub fn new(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            local_path: path.to_path_buf(),
            remote_url: None,
            account: None,
            sync_status: SyncState::Unknown,
            size_bytes: 0,
            exists_locally: true,
            category: None,
            tags: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_base_name() {
        let d = RepoDescriptor::new(Path::new("/home/dev/projects/widget"));
        assert_eq!(d.name, "widget");
        assert_eq!(d.local_path, PathBuf::from("/home/dev/projects/widget"));
        assert!(d.exists_locally);
        assert_eq!(d.sync_status, SyncState::Unknown);
        assert_eq!(d.size_bytes, 0);
    }

    #[test]
    fn test_absent_fields_are_omitted_on_the_wire() {
        let d = RepoDescriptor::new(Path::new("/tmp/widget"));
        let json = serde_json::to_value(&d).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("remote_url"));
        assert!(!obj.contains_key("account"));
        assert!(!obj.contains_key("category"));
        assert!(!obj.contains_key("tags"));
        assert_eq!(obj["sync_status"], "unknown");
        assert_eq!(obj["exists_locally"], true);
    }

    #[test]
    fn test_present_fields_serialize() {
        let mut d = RepoDescriptor::new(Path::new("/tmp/widget"));
        d.remote_url = Some("https://github.com/acme/widget.git".to_string());
        d.account = Some("github/acme".to_string());
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["remote_url"], "https://github.com/acme/widget.git");
        assert_eq!(json["account"], "github/acme");
    }
}
