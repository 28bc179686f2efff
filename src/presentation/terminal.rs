//! Plain-text rendering of a page snapshot for the command line.

use std::fmt::Write as _;

use crate::domain::route::Section;
use crate::presentation::page::PageSnapshot;

/// Describe `snapshot` as the user would see it at `fragment`.
pub fn render_snapshot(fragment: &str, snapshot: &PageSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "location: #{fragment}");

    let nav: Vec<String> = snapshot
        .nav
        .iter()
        .map(|link| {
            if link.active {
                format!("[{}]", link.label)
            } else {
                link.label.clone()
            }
        })
        .collect();
    if !nav.is_empty() {
        let _ = writeln!(out, "nav: {}", nav.join(" | "));
    }

    let sections: Vec<&str> = snapshot
        .visible_sections
        .iter()
        .map(|section| section.as_str())
        .collect();
    let _ = writeln!(out, "section: {}", sections.join(", "));

    if snapshot.visible_sections.contains(&Section::Blog) {
        if snapshot.post_view_visible {
            let _ = writeln!(out, "{}", snapshot.post.title);
            let _ = writeln!(out, "{}", snapshot.post.date);
            if !snapshot.post.tags_html.is_empty() {
                let _ = writeln!(out, "{}", snapshot.post.tags_html);
            }
            let _ = writeln!(out, "{}", snapshot.post.body_html);
        } else if snapshot.blog_entries.is_empty() {
            let _ = writeln!(out, "{}", snapshot.blog_list_html.trim());
        } else {
            for id in &snapshot.blog_entries {
                let _ = writeln!(out, "  - {id}");
            }
        }
    }

    if snapshot.visible_sections.contains(&Section::Projects) {
        let _ = writeln!(out, "filter: {}", snapshot.active_filter);
        for project in snapshot.projects.iter().filter(|p| p.visible) {
            let _ = writeln!(out, "  * {}", project.title);
        }
    }

    out
}
