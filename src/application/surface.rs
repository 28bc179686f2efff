//! Presentation seam: everything the site core needs from the page it drives.

use crate::domain::posts::PostSummary;
use crate::domain::route::Section;

/// The two panes inside the blog section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogPane {
    List,
    Post,
}

/// Visible page state owned by the presentation layer.
///
/// Calls are fire-and-forget: a surface cannot fail the navigation that
/// drives it.
pub trait Surface: Send + Sync {
    fn set_section_visible(&self, section: Section, visible: bool);

    fn set_blog_pane(&self, pane: BlogPane);

    /// Mark the navigation link at `index` (declaration order) active or not.
    fn set_nav_link_active(&self, index: usize, active: bool);

    /// Request a smooth scroll to the top of the page. Best effort.
    fn scroll_to_top(&self);

    /// Replace the blog list with clickable entries, one per post.
    fn render_post_list(&self, posts: &[PostSummary]);

    /// Replace the blog list with an inline error message.
    fn render_post_list_error(&self, message: &str);

    /// Fill the single-post fields. `body` is rendered verbatim.
    fn populate_post(&self, post: &PostSummary, body: &str);

    fn set_project_filter_active(&self, filter: &str);

    fn set_project_visible(&self, index: usize, visible: bool);
}
