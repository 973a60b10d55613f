//! Shared test utilities for the blogcfg test suite.
//!
//! Lookup helpers panic with the available alternatives on a miss, so a
//! failing assertion names what *was* there.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let config = SiteConfig::default();
//! let group = find_group(&config, "/javascript/", "JavaScript");
//! assert_eq!(group_children(group)[0], "Chapter3");
//!
//! let docs = setup_docs(&config);
//! let report = check_documents(docs.path(), &config).unwrap();
//! assert!(report.is_ok());
//! ```

use std::fs;
use tempfile::TempDir;

use crate::config::{SidebarGroup, SiteConfig};
use crate::documents::chapter_path;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a docs tree with one markdown file per chapter the config lists.
///
/// Each file starts with `# <Section title> <chapter id>` so title
/// extraction has something to find.
pub fn setup_docs(config: &SiteConfig) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (section, groups) in &config.theme.sidebar.sections {
        for group in groups {
            for child in &group.children {
                let path = tmp.path().join(chapter_path(section, child));
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(&path, format!("# {} {child}\n\nBody.\n", group.title)).unwrap();
            }
        }
    }
    tmp
}

// =========================================================================
// Config lookups: panic with a clear message on miss
// =========================================================================

/// Groups of a sidebar section. Panics if the section is not declared.
pub fn find_section<'a>(config: &'a SiteConfig, path: &str) -> &'a [SidebarGroup] {
    config.theme.section(path).unwrap_or_else(|| {
        let paths: Vec<&str> = config
            .theme
            .sidebar
            .sections
            .keys()
            .map(String::as_str)
            .collect();
        panic!("sidebar section '{path}' not found. Available: {paths:?}")
    })
}

/// Find a group by title within a section. Panics if not found.
pub fn find_group<'a>(config: &'a SiteConfig, section: &str, title: &str) -> &'a SidebarGroup {
    let groups = find_section(config, section);
    groups.iter().find(|g| g.title == title).unwrap_or_else(|| {
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        panic!("group '{title}' not found in '{section}'. Available: {titles:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Chapter identifiers of a group, in order.
pub fn group_children(group: &SidebarGroup) -> Vec<&str> {
    group.children.iter().map(String::as_str).collect()
}

/// `(text, link)` pairs of the navigation bar, in order.
pub fn nav_links(config: &SiteConfig) -> Vec<(&str, &str)> {
    config
        .theme
        .nav
        .iter()
        .map(|n| (n.text.as_str(), n.link.as_str()))
        .collect()
}
