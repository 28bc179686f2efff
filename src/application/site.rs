//! Site controller: owns all session state and handles inbound commands.
//!
//! Clicks, history moves and hash changes arrive as [`Command`] messages. The
//! [`EventLoop`] drains them, running each handler as its own task so that a
//! pending fetch never holds up later navigation.

use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinSet;
use tracing::{debug, error, instrument, warn};

use crate::application::display::SectionDisplay;
use crate::application::location::Location;
use crate::application::manifest::ManifestLoader;
use crate::application::posts::{PostCache, PostService};
use crate::application::projects::ProjectBoard;
use crate::application::router::Router;
use crate::application::source::ContentSource;
use crate::application::surface::Surface;
use crate::domain::navigation::{NavLink, default_links};
use crate::domain::projects::ProjectCard;
use crate::domain::route::Route;

pub const DEFAULT_MANIFEST_PATH: &str = "posts/manifest.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A link carrying a target fragment was activated.
    Navigate(String),
    /// The location fragment changed (or a change was forced).
    HashChanged,
    /// A blog list entry was clicked.
    EntryClicked(String),
    /// The "back to list" control in the post view.
    BackToBlog,
    Back,
    Forward,
    FilterProjects(String),
}

#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub manifest_path: String,
    pub start_fragment: String,
    pub nav: Vec<NavLink>,
    pub projects: Vec<ProjectCard>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            start_fragment: String::new(),
            nav: default_links(),
            projects: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct SiteController {
    router: Router,
    projects: ProjectBoard,
    inbox: UnboundedSender<Command>,
}

impl SiteController {
    /// Wire a site over `source` and `surface`. The returned [`EventLoop`]
    /// processes everything submitted to the controller.
    pub fn build(
        source: Arc<dyn ContentSource>,
        surface: Arc<dyn Surface>,
        options: SiteOptions,
    ) -> (Self, EventLoop) {
        let SiteOptions {
            manifest_path,
            start_fragment,
            nav,
            projects,
        } = options;

        let (inbox, receiver) = unbounded_channel();
        let location = Location::new(&start_fragment, inbox.clone());
        let display = SectionDisplay::new(Arc::clone(&surface), nav);
        let manifest = ManifestLoader::new(manifest_path, Arc::clone(&source), Arc::clone(&surface));
        let posts = PostService::new(
            manifest.clone(),
            PostCache::new(),
            source,
            Arc::clone(&surface),
            display.clone(),
        );
        let router = Router::new(location, manifest, posts, display);
        let projects = ProjectBoard::new(surface, projects);

        let controller = Self {
            router,
            projects,
            inbox,
        };
        let events = EventLoop {
            controller: controller.clone(),
            inbox: receiver,
        };
        (controller, events)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn projects(&self) -> &ProjectBoard {
        &self.projects
    }

    pub fn submit(&self, command: Command) {
        if self.inbox.send(command).is_err() {
            warn!("command dropped: event loop has shut down");
        }
    }

    /// Load the manifest, then show whatever the starting fragment points at.
    pub async fn start(&self) {
        self.router.manifest().ensure_loaded().await;
        self.router.dispatch().await;
    }

    #[instrument(skip(self))]
    pub async fn handle(&self, command: Command) {
        match command {
            Command::Navigate(target) => self.router.navigate(&target),
            Command::HashChanged => self.router.dispatch().await,
            Command::EntryClicked(id) => self.router.navigate(&Route::Post(id).fragment()),
            Command::BackToBlog => self.router.navigate(&Route::Blog.fragment()),
            Command::Back => {
                if !self.router.location().back() {
                    debug!("no earlier history entry");
                }
            }
            Command::Forward => {
                if !self.router.location().forward() {
                    debug!("no later history entry");
                }
            }
            Command::FilterProjects(filter) => {
                self.projects.apply(&filter);
            }
        }
    }
}

pub struct EventLoop {
    controller: SiteController,
    inbox: UnboundedReceiver<Command>,
}

impl EventLoop {
    pub fn controller(&self) -> &SiteController {
        &self.controller
    }

    /// Handle queued commands until the inbox is empty and every handler has
    /// finished. Commands submitted while handlers are pending are picked up
    /// immediately. Returns the number of commands handled.
    pub async fn run_until_idle(&mut self) -> usize {
        let mut tasks = JoinSet::new();
        let mut handled = 0;

        loop {
            while let Ok(command) = self.inbox.try_recv() {
                handled += 1;
                self.spawn(&mut tasks, command);
            }
            if tasks.is_empty() {
                break;
            }

            tokio::select! {
                command = self.inbox.recv() => {
                    if let Some(command) = command {
                        handled += 1;
                        self.spawn(&mut tasks, command);
                    }
                }
                joined = tasks.join_next() => {
                    if let Some(Err(err)) = joined {
                        error!(error = %err, "command handler failed");
                    }
                }
            }
        }

        handled
    }

    fn spawn(&self, tasks: &mut JoinSet<()>, command: Command) {
        let controller = self.controller.clone();
        tasks.spawn(async move { controller.handle(command).await });
    }
}
