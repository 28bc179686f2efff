//! Fragment grammar and the typed routes derived from it.
//!
//! The location fragment is the only navigation state the site keeps. It is
//! parsed into a [`Route`] as soon as it enters the router; the string form is
//! only used at the boundary (parsing input, writing the fragment back).

use std::fmt;

const POST_ROUTE: &str = "post";

/// Mutually exclusive top-level page regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Blog,
    Projects,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Home, Section::Blog, Section::Projects];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Blog => "blog",
            Section::Projects => "projects",
        }
    }

    /// Look up a section by its route name. Names are matched exactly.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Blog,
    Projects,
    Post(String),
}

impl Route {
    /// The section a route is displayed in. Single posts live inside Blog.
    pub fn section(&self) -> Section {
        match self {
            Route::Home => Section::Home,
            Route::Blog | Route::Post(_) => Section::Blog,
            Route::Projects => Section::Projects,
        }
    }

    /// Serialize back to a fragment (without the leading `#`).
    pub fn fragment(&self) -> String {
        match self {
            Route::Post(id) => format!("{POST_ROUTE}/{id}"),
            other => other.section().as_str().to_string(),
        }
    }
}

impl From<Section> for Route {
    fn from(section: Section) -> Self {
        match section {
            Section::Home => Route::Home,
            Section::Blog => Route::Blog,
            Section::Projects => Route::Projects,
        }
    }
}

impl From<&str> for Route {
    fn from(fragment: &str) -> Self {
        resolve_route(fragment)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.fragment())
    }
}

/// Resolve a raw fragment into a route.
///
/// Total: anything unrecognised falls back to [`Route::Home`]. A single
/// leading `#` and then a single leading `/` are stripped; the remainder is
/// split on its first `/` and everything after it is kept verbatim, so
/// `post/a/b` names the post `a/b`.
pub fn resolve_route(fragment: &str) -> Route {
    let trimmed = fragment.strip_prefix('#').unwrap_or(fragment);
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Route::Home;
    }

    let (name, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

    if name == POST_ROUTE && !rest.is_empty() {
        return Route::Post(rest.to_string());
    }

    Section::from_name(name).map_or(Route::Home, Route::from)
}

/// What the blog section is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlogView {
    #[default]
    List,
    Post(String),
}

/// Derived display state: the visible section and, for Blog, its sub-view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveSection {
    Home,
    Blog(BlogView),
    Projects,
}

impl ActiveSection {
    pub fn section(&self) -> Section {
        match self {
            ActiveSection::Home => Section::Home,
            ActiveSection::Blog(_) => Section::Blog,
            ActiveSection::Projects => Section::Projects,
        }
    }
}
