use chrono::Utc;

use sweepr_core::config::Config;
use sweepr_core::error::SweeprError;

use crate::CredentialStore;

/// Keychain key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access-token";
/// Keychain key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh-token";

/// An authenticated dashboard session.
///
/// Tokens are held by the credential store, the email (and login timestamp)
/// by the config file. Every authenticated operation receives a `Session`
/// explicitly; nothing reads credential state ambiently.
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl Session {
    /// Load the saved session, if any.
    ///
    /// A config with an email but no token in the store (or vice versa) is
    /// treated as logged out rather than an error.
    pub fn load(
        store: &dyn CredentialStore,
        config: &Config,
    ) -> Result<Option<Session>, SweeprError> {
        let email = match &config.email {
            Some(e) => e.clone(),
            None => return Ok(None),
        };
        let access_token = match store.get(ACCESS_TOKEN_KEY)? {
            Some(t) => t,
            None => {
                tracing::debug!("config has an email but no token in the credential store");
                return Ok(None);
            }
        };
        let refresh_token = store.get(REFRESH_TOKEN_KEY)?;
        Ok(Some(Session {
            email,
            access_token,
            refresh_token,
        }))
    }

    /// Persist this session: tokens into the store, email into the config.
    ///
    /// The caller still owns writing the config file to disk.
    pub fn save(
        &self,
        store: &dyn CredentialStore,
        config: &mut Config,
    ) -> Result<(), SweeprError> {
        store.store(ACCESS_TOKEN_KEY, &self.access_token)?;
        match &self.refresh_token {
            Some(t) => store.store(REFRESH_TOKEN_KEY, t)?,
            None => store.delete(REFRESH_TOKEN_KEY)?,
        }
        config.email = Some(self.email.clone());
        config.logged_in_at = Some(Utc::now());
        Ok(())
    }

    /// Remove any saved session from the store and config.
    pub fn clear(store: &dyn CredentialStore, config: &mut Config) -> Result<(), SweeprError> {
        store.delete(ACCESS_TOKEN_KEY)?;
        store.delete(REFRESH_TOKEN_KEY)?;
        config.email = None;
        config.logged_in_at = None;
        Ok(())
    }
}
