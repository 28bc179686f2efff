//! Presentation layer: the headless page and its HTML/text renderings.

pub mod page;
pub mod terminal;
pub mod views;
