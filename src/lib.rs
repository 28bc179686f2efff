//! Headless core of a personal site.
//!
//! The site is driven entirely by its location fragment: the router resolves
//! the fragment to a route, lazily loads the blog manifest and post bodies
//! through a [`application::source::ContentSource`], and projects the result
//! onto a [`application::surface::Surface`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub(crate) mod util;
