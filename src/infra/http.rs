//! Content source backed by a remote site over HTTP.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::application::source::{ContentSource, FetchError};
use crate::infra::error::InfraError;

#[derive(Clone, Debug)]
pub struct HttpContentSource {
    client: Client,
    base: Url,
}

impl HttpContentSource {
    /// Build a source rooted at `base`. A missing trailing `/` is added so
    /// relative paths resolve beneath the last path segment.
    pub fn new(base: &str) -> Result<Self, InfraError> {
        let mut base = Url::parse(base)
            .map_err(|err| InfraError::configuration(format!("invalid site url `{base}`: {err}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| InfraError::http(err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("folio/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|err| FetchError::invalid_path(path, err.to_string()))
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url(path)?;
        debug!(%url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::transport(path, err))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::Missing {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| FetchError::transport(path, err))
    }
}
