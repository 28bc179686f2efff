use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::application::surface::Surface;
use crate::domain::projects::{ProjectCard, ProjectFilter};
use crate::util::lock::mutex_lock;

const SOURCE: &str = "application::projects::ProjectBoard";

/// Project cards with a single active category filter.
#[derive(Clone)]
pub struct ProjectBoard {
    surface: Arc<dyn Surface>,
    cards: Arc<[ProjectCard]>,
    active: Arc<Mutex<ProjectFilter>>,
}

impl ProjectBoard {
    pub fn new(surface: Arc<dyn Surface>, cards: Vec<ProjectCard>) -> Self {
        Self {
            surface,
            cards: cards.into(),
            active: Arc::new(Mutex::new(ProjectFilter::All)),
        }
    }

    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    pub fn active_filter(&self) -> ProjectFilter {
        mutex_lock(&self.active, SOURCE, "active_filter").clone()
    }

    /// Activate `filter` and show only the matching cards. Returns how many
    /// cards remain visible.
    pub fn apply(&self, filter: &str) -> usize {
        let filter = ProjectFilter::from(filter);
        self.surface.set_project_filter_active(filter.as_str());

        let mut visible = 0;
        for (index, card) in self.cards.iter().enumerate() {
            let matches = filter.matches(card);
            visible += usize::from(matches);
            self.surface.set_project_visible(index, matches);
        }

        debug!(filter = filter.as_str(), visible, "project filter applied");
        *mutex_lock(&self.active, SOURCE, "apply") = filter;
        visible
    }
}
