//! Memoized loading of the post manifest.
//!
//! The manifest is requested at most once per session. The first caller moves
//! the loader from `NotStarted` to `InFlight`, storing a shared handle to the
//! load; everyone arriving while it runs awaits that same handle. Completion
//! renders the blog list (or the inline error) as part of the load itself.

use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt, Shared};
use metrics::counter;
use tracing::{debug, error, info, instrument};

use crate::application::error::ManifestLoadError;
use crate::application::source::ContentSource;
use crate::application::surface::Surface;
use crate::domain::posts::Manifest;
use crate::util::lock::mutex_lock;

const SOURCE: &str = "application::manifest::ManifestLoader";
pub const MANIFEST_ERROR_MESSAGE: &str = "Failed to load posts. Check console.";
pub(crate) const METRIC_MANIFEST_FETCH: &str = "folio_manifest_fetch_total";
pub(crate) const METRIC_FETCH_FAILURE: &str = "folio_fetch_failure_total";

type PendingLoad = Shared<BoxFuture<'static, LoadOutcome>>;

#[derive(Clone)]
enum LoadOutcome {
    Loaded(Arc<Manifest>),
    Failed,
}

enum ManifestLoadState {
    NotStarted,
    InFlight(PendingLoad),
    Loaded(Arc<Manifest>),
    Failed,
}

/// Observable kind of the loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestStatus {
    NotStarted,
    InFlight,
    Loaded,
    Failed,
}

#[derive(Clone)]
pub struct ManifestLoader {
    inner: Arc<LoaderInner>,
}

struct LoaderInner {
    path: String,
    source: Arc<dyn ContentSource>,
    surface: Arc<dyn Surface>,
    state: Mutex<ManifestLoadState>,
}

impl ManifestLoader {
    pub fn new(
        path: impl Into<String>,
        source: Arc<dyn ContentSource>,
        surface: Arc<dyn Surface>,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                path: path.into(),
                source,
                surface,
                state: Mutex::new(ManifestLoadState::NotStarted),
            }),
        }
    }

    pub fn status(&self) -> ManifestStatus {
        match &*mutex_lock(&self.inner.state, SOURCE, "status") {
            ManifestLoadState::NotStarted => ManifestStatus::NotStarted,
            ManifestLoadState::InFlight(_) => ManifestStatus::InFlight,
            ManifestLoadState::Loaded(_) => ManifestStatus::Loaded,
            ManifestLoadState::Failed => ManifestStatus::Failed,
        }
    }

    /// Resolve the manifest, starting the load if nobody has yet.
    ///
    /// Never fails: a failed load yields an empty manifest, now and for every
    /// later call.
    pub async fn ensure_loaded(&self) -> Arc<Manifest> {
        let pending = {
            let mut state = mutex_lock(&self.inner.state, SOURCE, "ensure_loaded");
            match &*state {
                ManifestLoadState::Loaded(manifest) => return Arc::clone(manifest),
                ManifestLoadState::Failed => return Arc::new(Manifest::default()),
                ManifestLoadState::InFlight(pending) => {
                    debug!(path = %self.inner.path, "joining in-flight manifest load");
                    pending.clone()
                }
                ManifestLoadState::NotStarted => {
                    let pending = Arc::clone(&self.inner).load().boxed().shared();
                    *state = ManifestLoadState::InFlight(pending.clone());
                    pending
                }
            }
        };

        let outcome = pending.await;
        self.settle(&outcome);
        match outcome {
            LoadOutcome::Loaded(manifest) => manifest,
            LoadOutcome::Failed => Arc::new(Manifest::default()),
        }
    }

    fn settle(&self, outcome: &LoadOutcome) {
        let mut state = mutex_lock(&self.inner.state, SOURCE, "settle");
        if matches!(*state, ManifestLoadState::InFlight(_)) {
            *state = match outcome {
                LoadOutcome::Loaded(manifest) => ManifestLoadState::Loaded(Arc::clone(manifest)),
                LoadOutcome::Failed => ManifestLoadState::Failed,
            };
        }
    }
}

impl LoaderInner {
    #[instrument(skip_all, fields(path = %self.path))]
    async fn load(self: Arc<Self>) -> LoadOutcome {
        match self.fetch().await {
            Ok(manifest) => {
                info!(posts = manifest.len(), "manifest loaded");
                self.surface.render_post_list(manifest.posts());
                LoadOutcome::Loaded(Arc::new(manifest))
            }
            Err(err) => {
                counter!(METRIC_FETCH_FAILURE, "kind" => "manifest").increment(1);
                self.surface.render_post_list_error(MANIFEST_ERROR_MESSAGE);
                error!(error = %err, "blog manifest load error");
                LoadOutcome::Failed
            }
        }
    }

    async fn fetch(&self) -> Result<Manifest, ManifestLoadError> {
        counter!(METRIC_MANIFEST_FETCH).increment(1);
        let raw = self
            .source
            .fetch_text(&self.path)
            .await
            .map_err(|source| ManifestLoadError::Fetch {
                path: self.path.clone(),
                source,
            })?;

        Manifest::from_json(&raw).map_err(|source| ManifestLoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
