//! Content source trait describing where manifests and post bodies come from.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource `{path}` does not exist")]
    Missing { path: String },
    /// A non-2xx answer other than 404. The response body is discarded and
    /// never becomes post content.
    #[error("resource `{path}` answered with status {status}")]
    Status { path: String, status: u16 },
    #[error("transport failure for `{path}`: {message}")]
    Transport { path: String, message: String },
    #[error("invalid resource path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },
}

impl FetchError {
    pub fn transport(path: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Fetches text resources by site-relative path.
///
/// Paths are the ones found in the site itself: the manifest location and
/// each post's `file` field.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}
