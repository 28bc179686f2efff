//! Post cache and single-post resolution.

use std::{collections::HashMap, sync::Arc};

use metrics::counter;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument};

use crate::application::display::SectionDisplay;
use crate::application::error::PostLoadError;
use crate::application::manifest::{ManifestLoader, METRIC_FETCH_FAILURE};
use crate::application::source::ContentSource;
use crate::application::surface::Surface;
use crate::domain::posts::PostSummary;

pub const POST_ERROR_PLACEHOLDER: &str = "<p>Failed to load post content.</p>";
pub(crate) const METRIC_POST_FETCH: &str = "folio_post_fetch_total";
pub(crate) const METRIC_POST_CACHE_HIT: &str = "folio_post_cache_hit_total";
pub(crate) const METRIC_POST_CACHE_MISS: &str = "folio_post_cache_miss_total";

/// Raw post bodies keyed by post id, kept for the whole session.
///
/// Failed fetches are cached too (as the placeholder body), so a broken post
/// is never retried.
#[derive(Clone, Default)]
pub struct PostCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl PostCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<String> {
        let guard = self.entries.read().await;
        guard.get(id).cloned()
    }

    pub async fn put(&self, id: String, body: String) {
        let mut guard = self.entries.write().await;
        guard.insert(id, body);
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.entries.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    Shown,
    /// The manifest has no entry for the id; nothing was fetched.
    NotFound,
}

#[derive(Clone)]
pub struct PostService {
    manifest: ManifestLoader,
    cache: PostCache,
    source: Arc<dyn ContentSource>,
    surface: Arc<dyn Surface>,
    display: SectionDisplay,
}

impl PostService {
    pub fn new(
        manifest: ManifestLoader,
        cache: PostCache,
        source: Arc<dyn ContentSource>,
        surface: Arc<dyn Surface>,
        display: SectionDisplay,
    ) -> Self {
        Self {
            manifest,
            cache,
            source,
            surface,
            display,
        }
    }

    pub fn cache(&self) -> &PostCache {
        &self.cache
    }

    /// Show the post `id` in the blog section, fetching its body on first use.
    #[instrument(skip(self))]
    pub async fn open_post(&self, id: &str) -> PostOutcome {
        let manifest = self.manifest.ensure_loaded().await;
        let Some(post) = manifest.find(id) else {
            debug!("post not in manifest");
            return PostOutcome::NotFound;
        };

        let body = match self.cache.get(id).await {
            Some(body) => {
                counter!(METRIC_POST_CACHE_HIT).increment(1);
                body
            }
            None => {
                counter!(METRIC_POST_CACHE_MISS).increment(1);
                let body = self.fetch_body(post).await;
                self.cache.put(post.id.clone(), body.clone()).await;
                body
            }
        };

        self.surface.populate_post(post, &body);
        self.display.show_post_view(id);
        PostOutcome::Shown
    }

    async fn fetch_body(&self, post: &PostSummary) -> String {
        counter!(METRIC_POST_FETCH).increment(1);
        match self.source.fetch_text(&post.file).await {
            Ok(body) => body,
            Err(source) => {
                counter!(METRIC_FETCH_FAILURE, "kind" => "post").increment(1);
                let err = PostLoadError {
                    id: post.id.clone(),
                    file: post.file.clone(),
                    source,
                };
                error!(error = %err, "post load error");
                POST_ERROR_PLACEHOLDER.to_string()
            }
        }
    }
}
