use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use tokio::sync::Semaphore;

use sweepr_core::models::descriptor::RepoDescriptor;

use crate::inspect;

/// The one dependency-cache directory name never descended into.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// What a single directory visit produced.
enum Visit {
    Repo(RepoDescriptor),
    Subdirs(Vec<PathBuf>),
    Skip,
}

/// Bounded-depth, bounded-fan-out walker that locates repository roots.
///
/// Sibling subtrees are traversed concurrently; a semaphore caps how many
/// directories are being listed or probed at once. Per-directory errors
/// are swallowed where they occur: a scan never fails, it only yields
/// fewer repositories.
pub struct Scanner {
    max_depth: usize,
    gate: Arc<Semaphore>,
}

impl Scanner {
    pub fn new(max_depth: usize, concurrency: usize) -> Self {
        Self {
            max_depth,
            gate: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Scan one root. A root that is itself a repository yields exactly
    /// one descriptor and no recursion. Result order is not meaningful.
    pub async fn scan(&self, root: &Path) -> Vec<RepoDescriptor> {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        self.walk(root, 0).await
    }

    /// Scan several roots in turn, skipping ones that do not exist.
    pub async fn scan_paths(&self, roots: &[PathBuf]) -> Vec<RepoDescriptor> {
        let mut repos = Vec::new();
        for root in roots {
            if root.exists() {
                repos.extend(self.scan(root).await);
            }
        }
        repos
    }

    fn walk(&self, dir: PathBuf, depth: usize) -> BoxFuture<'_, Vec<RepoDescriptor>> {
        async move {
            if depth > self.max_depth {
                return Vec::new();
            }

            let subdirs = {
                let _permit = self
                    .gate
                    .acquire()
                    .await
                    .expect("scan gate is never closed");
                match self.visit(&dir).await {
                    Visit::Repo(descriptor) => return vec![descriptor],
                    Visit::Subdirs(subdirs) => subdirs,
                    Visit::Skip => return Vec::new(),
                }
                // Permit dropped here: holding it across the fan-out would
                // let parents starve the children out of the gate.
            };

            let branches = join_all(
                subdirs
                    .into_iter()
                    .map(|subdir| self.walk(subdir, depth + 1)),
            )
            .await;
            branches.into_iter().flatten().collect()
        }
        .boxed()
    }

    /// Inspect one directory: repository root, list of children, or nothing.
    async fn visit(&self, dir: &Path) -> Visit {
        // Any `.git` entry marks a repository root (worktrees carry a file,
        // not a directory). Recursion stops here either way.
        if tokio::fs::metadata(dir.join(".git")).await.is_ok() {
            return Visit::Repo(inspect::build_descriptor(dir).await);
        }

        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return Visit::Skip;
            }
        };

        let mut subdirs = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name();
                    let name = name.to_string_lossy();
                    if name.starts_with('.') || name == DEPENDENCY_CACHE_DIR {
                        continue;
                    }
                    match entry.file_type().await {
                        Ok(file_type) if file_type.is_dir() => subdirs.push(entry.path()),
                        _ => {}
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "directory listing cut short");
                    break;
                }
            }
        }
        Visit::Subdirs(subdirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_repo(root: &Path, rel: &str) {
        std::fs::create_dir_all(root.join(rel).join(".git")).unwrap();
    }

    fn names(mut repos: Vec<RepoDescriptor>) -> Vec<String> {
        repos.sort_by(|a, b| a.local_path.cmp(&b.local_path));
        repos.into_iter().map(|r| r.name).collect()
    }

    #[tokio::test]
    async fn test_finds_repos_up_to_max_depth() {
        let dir = tempfile::tempdir().unwrap();
        fake_repo(dir.path(), "a/deep");

        let shallow = Scanner::new(1, 8).scan(dir.path()).await;
        assert!(shallow.is_empty());

        let exact = Scanner::new(2, 8).scan(dir.path()).await;
        assert_eq!(names(exact), vec!["deep"]);
    }

    #[tokio::test]
    async fn test_root_itself_a_repo_yields_one_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        fake_repo(dir.path(), ".");
        fake_repo(dir.path(), "inner");

        let repos = Scanner::new(0, 8).scan(dir.path()).await;
        assert_eq!(repos.len(), 1);
        let expected = std::path::absolute(dir.path()).unwrap();
        assert_eq!(repos[0].local_path, expected);
    }

    #[tokio::test]
    async fn test_nested_repos_report_only_the_outer() {
        let dir = tempfile::tempdir().unwrap();
        fake_repo(dir.path(), "outer");
        fake_repo(dir.path(), "outer/vendor/inner");

        let repos = Scanner::new(5, 8).scan(dir.path()).await;
        assert_eq!(names(repos), vec!["outer"]);
    }

    #[tokio::test]
    async fn test_hidden_and_cache_directories_are_never_entered() {
        let dir = tempfile::tempdir().unwrap();
        fake_repo(dir.path(), ".config/hidden");
        fake_repo(dir.path(), "node_modules/pkg");

        let repos = Scanner::new(5, 8).scan(dir.path()).await;
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_mixed_tree_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        fake_repo(dir.path(), "a");
        fake_repo(dir.path(), "b/c");
        fake_repo(dir.path(), "node_modules/x");

        let repos = Scanner::new(5, 8).scan(dir.path()).await;
        assert_eq!(names(repos), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_missing_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let repos = Scanner::new(3, 8).scan(&missing).await;
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_scan_paths_skips_missing_roots() {
        let dir = tempfile::tempdir().unwrap();
        fake_repo(dir.path(), "a");

        let scanner = Scanner::new(3, 8);
        let repos = scanner
            .scan_paths(&[dir.path().to_path_buf(), dir.path().join("nope")])
            .await;
        assert_eq!(names(repos), vec!["a"]);
    }

    #[tokio::test]
    async fn test_tiny_concurrency_gate_still_completes() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..6 {
            fake_repo(dir.path(), &format!("proj{i}/src_repo"));
        }

        let repos = Scanner::new(4, 1).scan(dir.path()).await;
        assert_eq!(repos.len(), 6);
    }
}
