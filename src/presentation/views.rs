use askama::{Error as AskamaError, Template};
use thiserror::Error;

use crate::domain::posts::PostSummary;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) origin: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(origin: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            origin,
            public_message,
            error,
        }
    }

    pub fn origin(&self) -> &'static str {
        self.origin
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

/// Clickable blog list, one entry per post in manifest order.
#[derive(Template)]
#[template(path = "blog/list.html")]
pub struct BlogListTemplate<'a> {
    pub entries: &'a [PostSummary],
}

/// Inline message shown in place of the blog list.
#[derive(Template)]
#[template(path = "blog/list_error.html")]
pub struct BlogListErrorTemplate<'a> {
    pub message: &'a str,
}

#[derive(Template)]
#[template(path = "blog/tags.html")]
pub struct PostTagsTemplate<'a> {
    pub tags: &'a [String],
}

/// Text shown in the single-post header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostHeaderView {
    pub title: String,
    pub date: String,
}

impl PostHeaderView {
    pub fn from_summary(post: &PostSummary) -> Self {
        Self {
            title: format!("> {}", post.title),
            date: format!("// {}", post.date),
        }
    }
}
