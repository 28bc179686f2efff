//! Content source reading a site checked out on local disk.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::source::{ContentSource, FetchError};

#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a site-relative path under the root. Paths may not leave it.
    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FetchError::invalid_path(path, "path escapes the site root"));
                }
            }
        }
        if resolved == self.root {
            return Err(FetchError::invalid_path(path, "path is empty"));
        }
        Ok(resolved)
    }
}

#[async_trait]
impl ContentSource for DirectorySource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let file = self.resolve(path)?;
        debug!(file = %file.display(), "reading");

        tokio::fs::read_to_string(&file)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => FetchError::Missing {
                    path: path.to_string(),
                },
                _ => FetchError::transport(path, err),
            })
    }
}
