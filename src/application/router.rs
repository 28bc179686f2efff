//! Hash router: turns the current fragment into a visible section.

use tracing::{debug, info, instrument};

use crate::application::display::SectionDisplay;
use crate::application::location::Location;
use crate::application::manifest::ManifestLoader;
use crate::application::posts::{PostOutcome, PostService};
use crate::domain::route::{Route, Section, resolve_route};

#[derive(Clone)]
pub struct Router {
    location: Location,
    manifest: ManifestLoader,
    posts: PostService,
    display: SectionDisplay,
}

impl Router {
    pub fn new(
        location: Location,
        manifest: ManifestLoader,
        posts: PostService,
        display: SectionDisplay,
    ) -> Self {
        Self {
            location,
            manifest,
            posts,
            display,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn display(&self) -> &SectionDisplay {
        &self.display
    }

    pub fn posts(&self) -> &PostService {
        &self.posts
    }

    pub fn manifest(&self) -> &ManifestLoader {
        &self.manifest
    }

    pub fn current_route(&self) -> Route {
        resolve_route(&self.location.fragment())
    }

    /// Go to `target`.
    ///
    /// A target equal to the current fragment would not change the location,
    /// so the dispatch is forced instead; clicking the active link still
    /// re-renders and scrolls.
    pub fn navigate(&self, target: &str) {
        if !self.location.assign(target) {
            debug!(target, "navigating to current fragment, forcing dispatch");
            self.location.force_change();
        }
    }

    /// Show whatever the current fragment points at.
    #[instrument(skip(self), fields(fragment = %self.location.fragment()))]
    pub async fn dispatch(&self) {
        let route = self.current_route();
        info!(%route, "dispatching route");

        match route {
            Route::Post(id) => {
                self.manifest.ensure_loaded().await;
                self.display.show_section(Section::Blog, false);
                if self.posts.open_post(&id).await == PostOutcome::NotFound {
                    debug!(post_id = %id, "unknown post, returning to blog list");
                    self.navigate(&Route::Blog.fragment());
                }
            }
            other => self.display.show_section(other.section(), true),
        }
    }
}
