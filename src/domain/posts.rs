//! Blog manifest entries.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;

/// Metadata for a single post as listed in the manifest.
///
/// Fields are not validated. A missing or `null` field becomes an empty
/// value; numbers and booleans are kept as their text. Only a record that is
/// not an object fails the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSummary {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub excerpt: String,
    #[serde(deserialize_with = "lenient_text")]
    pub file: String,
}

fn value_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(value_text)
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.into_iter().map(value_text).collect()),
        other => Err(D::Error::custom(format!(
            "expected a list of tags, found `{other}`"
        ))),
    }
}

/// Ordered list of post summaries. Manifest order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    posts: Vec<PostSummary>,
}

impl Manifest {
    pub fn new(posts: Vec<PostSummary>) -> Self {
        Self { posts }
    }

    /// Parse a manifest document: a JSON array of post records.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<PostSummary>>(raw).map(Self::new)
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// First entry carrying `id`.
    pub fn find(&self, id: &str) -> Option<&PostSummary> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_in_manifest_order() {
        let manifest = Manifest::from_json(
            r#"[
                {"id":"b","title":"Second","date":"Jan 2","tags":["x","y"],"excerpt":"e","file":"posts/b.html"},
                {"id":"a","title":"First","date":"Jan 1","tags":[],"excerpt":"","file":"posts/a.html"}
            ]"#,
        )
        .expect("valid manifest");

        let ids: Vec<&str> = manifest.posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(manifest.posts()[0].tags, ["x", "y"]);
    }

    #[test]
    fn missing_fields_become_empty_values() {
        let manifest = Manifest::from_json(r#"[{"id":"only-id"}]"#).expect("lenient parse");
        let post = manifest.find("only-id").expect("entry present");
        assert!(post.title.is_empty());
        assert!(post.tags.is_empty());
        assert!(post.file.is_empty());
    }

    #[test]
    fn null_and_non_string_fields_keep_the_manifest() {
        let manifest = Manifest::from_json(
            r#"[
                {"id":"p1","title":null,"date":"Jan 1","tags":null,"excerpt":"e","file":"posts/p1.html"},
                {"id":"p2","title":"Second","date":2024,"tags":["x",7,true],"excerpt":false,"file":"posts/p2.html"}
            ]"#,
        )
        .expect("lenient parse");

        assert_eq!(manifest.len(), 2);
        let first = manifest.find("p1").expect("p1 present");
        assert_eq!(first.title, "");
        assert!(first.tags.is_empty());

        let second = manifest.find("p2").expect("p2 present");
        assert_eq!(second.date, "2024");
        assert_eq!(second.tags, ["x", "7", "true"]);
        assert_eq!(second.excerpt, "false");

        let header = crate::presentation::views::PostHeaderView::from_summary(second);
        assert_eq!(header.date, "// 2024");
        assert_eq!(
            crate::presentation::views::PostHeaderView::from_summary(first).title,
            "> "
        );
    }

    #[test]
    fn numeric_ids_still_resolve_routes() {
        let manifest = Manifest::from_json(r#"[{"id":42,"title":"Answer"}]"#).expect("lenient parse");
        assert_eq!(manifest.find("42").map(|p| p.title.as_str()), Some("Answer"));
    }

    #[test]
    fn non_array_documents_are_rejected() {
        assert!(Manifest::from_json(r#"{"posts":[]}"#).is_err());
        assert!(Manifest::from_json("<html>404</html>").is_err());
    }

    #[test]
    fn non_object_entries_are_rejected() {
        assert!(Manifest::from_json(r#"[{"id":"ok"}, "stray"]"#).is_err());
        assert!(Manifest::from_json(r#"[{"id":"ok","tags":"rust"}]"#).is_err());
    }

    #[test]
    fn find_returns_the_first_matching_entry() {
        let manifest = Manifest::new(vec![
            PostSummary {
                id: "dup".into(),
                title: "one".into(),
                ..Default::default()
            },
            PostSummary {
                id: "dup".into(),
                title: "two".into(),
                ..Default::default()
            },
        ]);
        assert_eq!(manifest.find("dup").map(|p| p.title.as_str()), Some("one"));
        assert!(manifest.find("missing").is_none());
    }
}
