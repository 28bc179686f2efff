//! Domain types: routes, navigation, manifest entries and project cards.

pub mod navigation;
pub mod posts;
pub mod projects;
pub mod route;
