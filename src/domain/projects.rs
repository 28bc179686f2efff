//! Project cards and the category filter applied to them.

use serde::{Deserialize, Serialize};

const ALL_FILTER: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectCard {
    pub title: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(String),
}

impl ProjectFilter {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectFilter::All => ALL_FILTER,
            ProjectFilter::Category(name) => name,
        }
    }

    pub fn matches(&self, card: &ProjectCard) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Category(name) => card.categories.iter().any(|c| c == name),
        }
    }
}

impl From<&str> for ProjectFilter {
    fn from(value: &str) -> Self {
        if value == ALL_FILTER {
            ProjectFilter::All
        } else {
            ProjectFilter::Category(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(categories: &[&str]) -> ProjectCard {
        ProjectCard {
            title: "card".into(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn all_matches_every_card() {
        assert!(ProjectFilter::from("all").matches(&card(&[])));
        assert!(ProjectFilter::All.matches(&card(&["rust"])));
    }

    #[test]
    fn category_matches_whole_names_only() {
        let filter = ProjectFilter::from("game");
        assert!(filter.matches(&card(&["tools", "game"])));
        assert!(!filter.matches(&card(&["gamedev"])));
        assert_eq!(filter.as_str(), "game");
    }
}
