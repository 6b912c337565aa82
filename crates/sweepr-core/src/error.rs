use std::path::PathBuf;

/// Central error type for the sweepr system.
#[derive(Debug, thiserror::Error)]
pub enum SweeprError {
    #[error("not logged in — run `sweepr login` first")]
    NotLoggedIn,

    #[error("authentication failed: {message}")]
    AuthFailed { message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("git error: {message}")]
    Git { message: String },

    #[error("command failed: {message}")]
    CommandFailed { message: String },

    #[error("command `{command}` timed out after {seconds}s")]
    CommandTimeout { command: String, seconds: u64 },

    #[error("path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("credential error: {message}")]
    Credential { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}
