use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use sweepr_core::error::SweeprError;
use sweepr_core::models::descriptor::RepoDescriptor;

use crate::{DashboardApi, SignInTokens, SyncReport};

/// HTTP client for the hosted dashboard backend.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: url::Url,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: url::Url, api_key: Option<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if let Some(key) = api_key {
            if let Ok(val) = HeaderValue::from_str(&key) {
                headers.insert("apikey", val);
            }
        }
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("sweepr/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("failed to build reqwest client");

        Self {
            client,
            base_url,
            access_token: None,
        }
    }

    /// Attach the bearer token used by authenticated endpoints.
    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    user: Option<TokenUser>,
}

#[derive(Deserialize)]
struct TokenUser {
    email: Option<String>,
}

/// Error body shapes the backend emits across its endpoints.
#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
}

impl ErrorBody {
    fn message(self, fallback: &str) -> String {
        self.error_description
            .or(self.msg)
            .or(self.error)
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInTokens, SweeprError> {
        let url = self.url("/auth/v1/token?grant_type=password");
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| SweeprError::AuthFailed {
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body: ErrorBody = resp.json().await.unwrap_or_default();
            return Err(SweeprError::AuthFailed {
                message: body.message(&format!("login failed ({status})")),
            });
        }

        let tokens: TokenResponse = resp.json().await.map_err(|e| SweeprError::Api {
            status: 0,
            message: format!("JSON parse error: {e}"),
        })?;

        Ok(SignInTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            email: tokens
                .user
                .and_then(|u| u.email)
                .unwrap_or_else(|| email.to_string()),
        })
    }

    async fn sync_repositories(
        &self,
        repos: &[RepoDescriptor],
    ) -> Result<SyncReport, SweeprError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(SweeprError::NotLoggedIn)?;

        let url = self.url("/functions/v1/cli-sync");
        tracing::debug!(count = repos.len(), "dispatching descriptor batch");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "repositories": repos }))
            .send()
            .await
            .map_err(|e| SweeprError::Api {
                status: 0,
                message: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body: ErrorBody = resp.json().await.unwrap_or_default();
            return Err(SweeprError::Api {
                status,
                message: body.message("sync request failed"),
            });
        }

        resp.json().await.map_err(|e| SweeprError::Api {
            status: 0,
            message: format!("JSON parse error: {e}"),
        })
    }
}
