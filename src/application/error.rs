use thiserror::Error;

use crate::application::source::FetchError;
use crate::infra::error::InfraError;

/// Failure to obtain or decode the post manifest.
#[derive(Debug, Error)]
pub enum ManifestLoadError {
    #[error("failed to fetch manifest `{path}`: {source}")]
    Fetch {
        path: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to parse manifest `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to fetch the body of a single post.
#[derive(Debug, Error)]
#[error("failed to load post `{id}` from `{file}`: {source}")]
pub struct PostLoadError {
    pub id: String,
    pub file: String,
    #[source]
    pub source: FetchError,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
