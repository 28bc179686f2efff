//! In-memory page that implements [`Surface`].
//!
//! It holds exactly the state the browser page would: which regions are
//! visible, the rendered blog list, the post fields and the navigation marks.
//! The CLI prints it; tests inspect it through [`HeadlessPage::snapshot`].

use std::sync::Mutex;

use tracing::error;

use crate::application::surface::{BlogPane, Surface};
use crate::domain::navigation::NavLink;
use crate::domain::posts::PostSummary;
use crate::domain::projects::{ProjectCard, ProjectFilter};
use crate::domain::route::Section;
use crate::presentation::views::{
    BlogListErrorTemplate, BlogListTemplate, PostHeaderView, PostTagsTemplate, render_template,
};
use crate::util::lock::mutex_lock;

const SOURCE: &str = "presentation::page::HeadlessPage";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub date: String,
    pub tags_html: String,
    pub body_html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkState {
    pub label: String,
    pub section: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectState {
    pub title: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Visible sections in page order.
    pub visible_sections: Vec<Section>,
    pub blog_list_visible: bool,
    pub post_view_visible: bool,
    pub blog_list_html: String,
    /// Ids of the clickable list entries, in display order.
    pub blog_entries: Vec<String>,
    pub list_renders: usize,
    pub post: PostFields,
    pub nav: Vec<NavLinkState>,
    pub projects: Vec<ProjectState>,
    pub active_filter: String,
    pub scroll_requests: usize,
}

pub struct HeadlessPage {
    state: Mutex<PageSnapshot>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new(&[], &[])
    }
}

impl HeadlessPage {
    /// A freshly loaded page: Home visible, blog showing its (empty) list.
    pub fn new(nav: &[NavLink], projects: &[ProjectCard]) -> Self {
        let snapshot = PageSnapshot {
            visible_sections: vec![Section::Home],
            blog_list_visible: true,
            post_view_visible: false,
            blog_list_html: String::new(),
            blog_entries: Vec::new(),
            list_renders: 0,
            post: PostFields::default(),
            nav: nav
                .iter()
                .map(|link| NavLinkState {
                    label: link.label.clone(),
                    section: link.section.clone(),
                    active: false,
                })
                .collect(),
            projects: projects
                .iter()
                .map(|card| ProjectState {
                    title: card.title.clone(),
                    visible: true,
                })
                .collect(),
            active_filter: ProjectFilter::All.as_str().to_string(),
            scroll_requests: 0,
        };

        Self {
            state: Mutex::new(snapshot),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        mutex_lock(&self.state, SOURCE, "snapshot").clone()
    }
}

impl Surface for HeadlessPage {
    fn set_section_visible(&self, section: Section, visible: bool) {
        let mut state = mutex_lock(&self.state, SOURCE, "set_section_visible");
        let current = std::mem::take(&mut state.visible_sections);
        state.visible_sections = Section::ALL
            .into_iter()
            .filter(|candidate| {
                if *candidate == section {
                    visible
                } else {
                    current.contains(candidate)
                }
            })
            .collect();
    }

    fn set_blog_pane(&self, pane: BlogPane) {
        let mut state = mutex_lock(&self.state, SOURCE, "set_blog_pane");
        state.blog_list_visible = pane == BlogPane::List;
        state.post_view_visible = pane == BlogPane::Post;
    }

    fn set_nav_link_active(&self, index: usize, active: bool) {
        let mut state = mutex_lock(&self.state, SOURCE, "set_nav_link_active");
        if let Some(link) = state.nav.get_mut(index) {
            link.active = active;
        }
    }

    fn scroll_to_top(&self) {
        mutex_lock(&self.state, SOURCE, "scroll_to_top").scroll_requests += 1;
    }

    fn render_post_list(&self, posts: &[PostSummary]) {
        let html = render_template(BlogListTemplate { entries: posts }).unwrap_or_else(|err| {
            error!(error = %err, origin = err.origin(), "blog list render failed");
            String::new()
        });

        let mut state = mutex_lock(&self.state, SOURCE, "render_post_list");
        state.blog_list_html = html;
        state.blog_entries = posts.iter().map(|post| post.id.clone()).collect();
        state.list_renders += 1;
    }

    fn render_post_list_error(&self, message: &str) {
        let html = render_template(BlogListErrorTemplate { message }).unwrap_or_else(|err| {
            error!(error = %err, origin = err.origin(), "blog list error render failed");
            String::new()
        });

        let mut state = mutex_lock(&self.state, SOURCE, "render_post_list_error");
        state.blog_list_html = html;
        state.blog_entries.clear();
    }

    fn populate_post(&self, post: &PostSummary, body: &str) {
        let header = PostHeaderView::from_summary(post);
        let tags_html = render_template(PostTagsTemplate { tags: &post.tags }).unwrap_or_else(|err| {
            error!(error = %err, origin = err.origin(), "post tags render failed");
            String::new()
        });

        mutex_lock(&self.state, SOURCE, "populate_post").post = PostFields {
            title: header.title,
            date: header.date,
            tags_html,
            body_html: body.to_string(),
        };
    }

    fn set_project_filter_active(&self, filter: &str) {
        mutex_lock(&self.state, SOURCE, "set_project_filter_active").active_filter =
            filter.to_string();
    }

    fn set_project_visible(&self, index: usize, visible: bool) {
        let mut state = mutex_lock(&self.state, SOURCE, "set_project_visible");
        if let Some(project) = state.projects.get_mut(index) {
            project.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_page_shows_home_and_blog_list() {
        let page = HeadlessPage::default();
        let snapshot = page.snapshot();
        assert_eq!(snapshot.visible_sections, [Section::Home]);
        assert!(snapshot.blog_list_visible);
        assert!(!snapshot.post_view_visible);
        assert_eq!(snapshot.active_filter, "all");
    }

    #[test]
    fn visible_sections_stay_in_page_order() {
        let page = HeadlessPage::default();
        page.set_section_visible(Section::Projects, true);
        page.set_section_visible(Section::Blog, true);
        assert_eq!(
            page.snapshot().visible_sections,
            [Section::Home, Section::Blog, Section::Projects]
        );

        page.set_section_visible(Section::Home, false);
        assert_eq!(
            page.snapshot().visible_sections,
            [Section::Blog, Section::Projects]
        );
    }

    #[test]
    fn post_body_is_stored_verbatim() {
        let page = HeadlessPage::default();
        let post = PostSummary {
            id: "p1".into(),
            title: "T1".into(),
            date: "D1".into(),
            tags: vec!["x".into()],
            ..Default::default()
        };

        page.populate_post(&post, "<script>author markup</script>");

        let fields = page.snapshot().post;
        assert_eq!(fields.title, "> T1");
        assert_eq!(fields.body_html, "<script>author markup</script>");
        assert!(fields.tags_html.contains("#x"));
    }

    #[test]
    fn list_error_replaces_entries() {
        let page = HeadlessPage::default();
        page.render_post_list(&[PostSummary {
            id: "p1".into(),
            ..Default::default()
        }]);
        page.render_post_list_error("Failed to load posts. Check console.");

        let snapshot = page.snapshot();
        assert!(snapshot.blog_entries.is_empty());
        assert!(snapshot.blog_list_html.contains("Failed to load posts"));
    }
}
