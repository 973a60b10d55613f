//! CLI output formatting.
//!
//! # Outline
//!
//! ```text
//! 写前端的图图
//!     Description: Hello, welcome to 写前端的图图 blog
//!     Base: /
//!     Output: ./dist
//!
//! Navigation
//! 001 主页 → /
//! 002 JavaScript → /javascript/
//!     JavaScript (16 chapters, depth 3)
//!         001 Chapter3
//!         002 Chapter4
//! ```
//!
//! Sidebar sections no nav entry points at are listed under `Unlinked`.
//!
//! # Document Report
//!
//! ```text
//! Chapters
//! 001 /javascript/Chapter3 → javascript/Chapter3.md
//!     Title: 第三章 基本概念
//! 002 /javascript/Chapter4 → javascript/Chapter4.md (missing)
//!
//! Orphans
//!     javascript/Chapter99.md
//!
//! Checked 2 chapters: 1 missing, 1 orphan
//! ```
//!
//! Each view has a `format_*` function returning lines (pure, tested) and a
//! `print_*` wrapper writing them to stdout.

use crate::config::{SidebarGroup, SiteConfig, ThemeConfig};
use crate::documents::DocumentReport;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Group header plus its numbered chapters, starting at `depth`.
fn group_lines(theme: &ThemeConfig, group: &SidebarGroup, depth: usize) -> Vec<String> {
    let mut detail = format!(
        "{}, depth {}",
        plural(group.children.len(), "chapter"),
        theme.resolve_sidebar_depth(group)
    );
    if group.collapsable {
        detail.push_str(", collapsable");
    }
    let mut lines = vec![format!("{}{} ({})", indent(depth), group.title, detail)];
    for (i, child) in group.children.iter().enumerate() {
        let label = if child.is_empty() { "(README)" } else { child };
        lines.push(format!("{}{} {}", indent(depth + 1), format_index(i + 1), label));
    }
    lines
}

pub fn format_outline(config: &SiteConfig) -> Vec<String> {
    let theme = &config.theme;
    let mut lines = vec![
        config.title.clone(),
        format!("{}Description: {}", indent(1), config.description),
        format!("{}Base: {}", indent(1), config.base),
        format!("{}Output: {}", indent(1), config.dest),
    ];
    for tag in &config.head {
        let attrs: Vec<String> = tag.attrs.iter().map(|(k, v)| format!("{k}=\"{v}\"")).collect();
        lines.push(format!("{}Head: <{} {}>", indent(1), tag.tag, attrs.join(" ")));
    }

    lines.push(String::new());
    lines.push("Navigation".to_string());
    for (i, link) in theme.nav.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), link.text, link.link));
        for group in theme.section(&link.link).unwrap_or_default() {
            lines.extend(group_lines(theme, group, 1));
        }
    }

    let unlinked: Vec<_> = theme
        .sidebar
        .sections
        .iter()
        .filter(|(path, _)| !theme.nav.iter().any(|n| &n.link == *path))
        .collect();
    if !unlinked.is_empty() {
        lines.push(String::new());
        lines.push("Unlinked".to_string());
        for (path, groups) in unlinked {
            lines.push(format!("{}{}", indent(1), path));
            for group in groups {
                lines.extend(group_lines(theme, group, 2));
            }
        }
    }
    lines
}

pub fn print_outline(config: &SiteConfig) {
    for line in format_outline(config) {
        println!("{}", line);
    }
}

/// One-line summary printed after a successful `check`.
pub fn format_check_summary(config: &SiteConfig) -> String {
    format!(
        "{}, {}, {}",
        plural(config.theme.nav.len(), "nav link"),
        plural(config.theme.sidebar.sections.len(), "section"),
        plural(config.chapter_count(), "chapter"),
    )
}

pub fn format_document_report(report: &DocumentReport) -> Vec<String> {
    let mut lines = vec!["Chapters".to_string()];
    for (i, chapter) in report.chapters.iter().enumerate() {
        let status = if chapter.exists { "" } else { " (missing)" };
        lines.push(format!(
            "{} {} → {}{}",
            format_index(i + 1),
            chapter.url,
            chapter.path.display(),
            status
        ));
        if let Some(title) = &chapter.title {
            lines.push(format!("{}Title: {}", indent(1), title));
        }
    }

    if !report.orphans.is_empty() {
        lines.push(String::new());
        lines.push("Orphans".to_string());
        for orphan in &report.orphans {
            lines.push(format!("{}{}", indent(1), orphan.display()));
        }
    }

    let missing = report.dangling().count();
    lines.push(String::new());
    lines.push(format!(
        "Checked {}: {} missing, {}",
        plural(report.chapters.len(), "chapter"),
        missing,
        plural(report.orphans.len(), "orphan")
    ));
    lines
}

pub fn print_document_report(report: &DocumentReport) {
    for line in format_document_report(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NavLink, Sidebar};
    use crate::documents::ChapterRef;
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn small_config() -> SiteConfig {
        let mut sections = IndexMap::new();
        sections.insert(
            "/javascript/".to_string(),
            vec![SidebarGroup::new("JavaScript", &["Chapter3", "Chapter4"])],
        );
        let mut config = SiteConfig::default();
        config.theme = ThemeConfig {
            nav: vec![
                NavLink::new("主页", "/"),
                NavLink::new("JavaScript", "/javascript/"),
            ],
            sidebar_depth: None,
            sidebar: Sidebar {
                depth: Some(3),
                sections,
            },
        };
        config
    }

    #[test]
    fn outline_lists_nav_groups_and_chapters() {
        let lines = format_outline(&small_config());
        let nav_start = lines.iter().position(|l| l == "Navigation").unwrap();
        assert_eq!(
            &lines[nav_start..],
            &[
                "Navigation",
                "001 主页 → /",
                "002 JavaScript → /javascript/",
                "    JavaScript (2 chapters, depth 3)",
                "        001 Chapter3",
                "        002 Chapter4",
            ]
        );
    }

    #[test]
    fn outline_header_shows_site_fields() {
        let lines = format_outline(&small_config());
        assert_eq!(lines[0], "写前端的图图");
        assert!(lines.contains(&"    Base: /".to_string()));
        assert!(lines.contains(&"    Output: ./dist".to_string()));
        assert!(lines.contains(&"    Head: <link href=\"/image/login.jpg\" rel=\"icon\">".to_string()));
    }

    #[test]
    fn outline_marks_collapsable_groups() {
        let mut config = small_config();
        let group = &mut config.theme.sidebar.sections.get_mut("/javascript/").unwrap()[0];
        group.collapsable = true;
        group.depth = Some(1);
        let lines = format_outline(&config);
        assert!(lines.contains(&"    JavaScript (2 chapters, depth 1, collapsable)".to_string()));
    }

    #[test]
    fn outline_lists_unlinked_sections() {
        let mut config = small_config();
        config
            .theme
            .sidebar
            .sections
            .insert("/css/".into(), vec![SidebarGroup::new("CSS", &["flex"])]);
        let lines = format_outline(&config);
        let start = lines.iter().position(|l| l == "Unlinked").unwrap();
        assert_eq!(lines[start + 1], "    /css/");
        assert_eq!(lines[start + 2], "        CSS (1 chapter, depth 3)");
        assert_eq!(lines[start + 3], "            001 flex");
    }

    #[test]
    fn outline_without_unlinked_sections_has_no_heading() {
        let lines = format_outline(&SiteConfig::default());
        assert!(!lines.iter().any(|l| l == "Unlinked"));
    }

    #[test]
    fn check_summary_counts() {
        assert_eq!(
            format_check_summary(&SiteConfig::default()),
            "4 nav links, 3 sections, 40 chapters"
        );
    }

    #[test]
    fn document_report_lines() {
        let report = DocumentReport {
            chapters: vec![
                ChapterRef {
                    section: "/javascript/".into(),
                    group: "JavaScript".into(),
                    id: "Chapter3".into(),
                    path: PathBuf::from("javascript/Chapter3.md"),
                    url: "/javascript/Chapter3".into(),
                    title: Some("基本概念".into()),
                    exists: true,
                },
                ChapterRef {
                    section: "/javascript/".into(),
                    group: "JavaScript".into(),
                    id: "Chapter4".into(),
                    path: PathBuf::from("javascript/Chapter4.md"),
                    url: "/javascript/Chapter4".into(),
                    title: None,
                    exists: false,
                },
            ],
            orphans: vec![PathBuf::from("javascript/Chapter99.md")],
        };
        assert_eq!(
            format_document_report(&report),
            vec![
                "Chapters",
                "001 /javascript/Chapter3 → javascript/Chapter3.md",
                "    Title: 基本概念",
                "002 /javascript/Chapter4 → javascript/Chapter4.md (missing)",
                "",
                "Orphans",
                "    javascript/Chapter99.md",
                "",
                "Checked 2 chapters: 1 missing, 1 orphan",
            ]
        );
    }
}
