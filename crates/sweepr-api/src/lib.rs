pub mod client;

pub use client::ApiClient;

use async_trait::async_trait;
use serde::Deserialize;

use sweepr_core::error::SweeprError;
use sweepr_core::models::descriptor::RepoDescriptor;

/// Tokens handed back by a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub email: String,
}

/// Outcome of dispatching a descriptor batch to the dashboard.
///
/// Per-item upsert failures land in `errors`; `upserted < total` is
/// partial success, not failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncReport {
    #[serde(default)]
    pub success: bool,
    pub upserted: u32,
    pub total: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl SyncReport {
    pub fn is_partial(&self) -> bool {
        self.upserted < self.total
    }
}

/// Trait for the hosted dashboard backend.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Exchange email/password credentials for a token pair.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInTokens, SweeprError>;

    /// Upsert a batch of repository descriptors, keyed by name.
    async fn sync_repositories(&self, repos: &[RepoDescriptor])
        -> Result<SyncReport, SweeprError>;
}
