//! Section display: which top-level region is visible and what the blog shows.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::application::surface::{BlogPane, Surface};
use crate::domain::navigation::NavLink;
use crate::domain::route::{ActiveSection, BlogView, Section};
use crate::util::lock::mutex_lock;

const SOURCE: &str = "application::display::SectionDisplay";

#[derive(Debug, Clone)]
struct DisplayState {
    section: Section,
    blog_view: BlogView,
}

#[derive(Clone)]
pub struct SectionDisplay {
    surface: Arc<dyn Surface>,
    nav: Arc<[NavLink]>,
    state: Arc<Mutex<DisplayState>>,
}

impl SectionDisplay {
    pub fn new(surface: Arc<dyn Surface>, nav: Vec<NavLink>) -> Self {
        Self {
            surface,
            nav: nav.into(),
            state: Arc::new(Mutex::new(DisplayState {
                section: Section::Home,
                blog_view: BlogView::List,
            })),
        }
    }

    pub fn nav(&self) -> &[NavLink] {
        &self.nav
    }

    /// Make `section` the only visible section.
    ///
    /// With `reset_blog_to_list`, entering Blog always lands on the post list;
    /// without it the blog keeps whichever pane it last showed.
    pub fn show_section(&self, section: Section, reset_blog_to_list: bool) {
        for other in Section::ALL {
            self.surface.set_section_visible(other, false);
        }
        self.surface.set_section_visible(section, true);

        let mut state = mutex_lock(&self.state, SOURCE, "show_section");
        if section == Section::Blog && reset_blog_to_list {
            state.blog_view = BlogView::List;
            self.surface.set_blog_pane(BlogPane::List);
        }
        state.section = section;
        drop(state);

        for (index, link) in self.nav.iter().enumerate() {
            self.surface
                .set_nav_link_active(index, link.targets(section));
        }

        debug!(%section, reset_blog_to_list, "section shown");
        self.surface.scroll_to_top();
    }

    /// Swap the blog from its list to the single-post pane.
    pub fn show_post_view(&self, id: &str) {
        mutex_lock(&self.state, SOURCE, "show_post_view").blog_view = BlogView::Post(id.to_string());
        self.surface.set_blog_pane(BlogPane::Post);
        self.surface.scroll_to_top();
    }

    pub fn active(&self) -> ActiveSection {
        let state = mutex_lock(&self.state, SOURCE, "active");
        match state.section {
            Section::Home => ActiveSection::Home,
            Section::Blog => ActiveSection::Blog(state.blog_view.clone()),
            Section::Projects => ActiveSection::Projects,
        }
    }
}
