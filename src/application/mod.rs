//! Application layer: the router, its collaborators and the seams they use.

pub mod display;
pub mod error;
pub mod location;
pub mod manifest;
pub mod posts;
pub mod projects;
pub mod router;
pub mod site;
pub mod source;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;
