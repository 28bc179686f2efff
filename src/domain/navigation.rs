use serde::{Deserialize, Serialize};

use super::route::Section;

/// A navigation link and the section it declares.
///
/// The declared section is kept as written; links naming a section the site
/// does not have are rendered but never marked active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub section: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            section: section.into(),
        }
    }

    pub fn targets(&self, section: Section) -> bool {
        self.section == section.as_str()
    }
}

/// One link per section, in section order.
pub fn default_links() -> Vec<NavLink> {
    Section::ALL
        .into_iter()
        .map(|section| {
            let name = section.as_str();
            let mut label = name.to_string();
            label[..1].make_ascii_uppercase();
            NavLink::new(label, name)
        })
        .collect()
}
