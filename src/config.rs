//! Site configuration module.
//!
//! Holds the typed declaration of the blog (title, head tags, navigation bar,
//! sidebar chapters) and the loading, layering and validation around it.
//!
//! The declaration is embedded: [`SiteConfig::default`] *is* the blog, and
//! [`load`] hands it out after validation. A sparse `config.toml` in the
//! source directory can override any part of it:
//!
//! ```text
//! embedded declaration   ← SiteConfig::default()
//!   └── config.toml      ← optional overlay (load_config)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! title = "写前端的图图"
//! description = "Hello, welcome to 写前端的图图 blog"
//! base = "/"               # Must start and end with "/"
//! dest = "./dist"          # Renderer output directory
//!
//! [[head]]
//! tag = "link"
//! attrs = { rel = "icon", href = "/image/login.jpg" }
//!
//! [theme]
//! sidebar_depth = 4        # Theme-level depth default
//!
//! [[theme.nav]]
//! text = "JavaScript"
//! link = "/javascript/"    # "/" or a sidebar section
//!
//! [theme.sidebar]
//! depth = 3                # Sidebar-level depth default (wins over theme)
//!
//! [[theme.sidebar.sections."/javascript/"]]
//! title = "JavaScript"
//! collapsable = false
//! children = ["Chapter3", "Chapter4"]
//! # depth = 2             # Per-group depth (wins over both defaults)
//! ```
//!
//! ## Overlay Semantics
//!
//! Tables merge key by key; arrays and scalars replace. Overriding
//! `theme.nav` replaces the whole bar, overriding one sidebar section
//! replaces only that section's groups. Unknown keys are rejected.

use crate::documents::chapter_path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Root configuration record handed to the renderer.
///
/// Missing keys in an overlay fall back to the embedded declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, shown in the header and the document `<title>`.
    pub title: String,
    /// Subtitle and meta description.
    pub description: String,
    /// URL path the site is served under.
    pub base: String,
    /// Directory the renderer writes the built site to.
    pub dest: String,
    /// Elements injected into every page's `<head>`, in order.
    pub head: Vec<HeadTag>,
    /// Navigation bar and sidebar.
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "写前端的图图".to_string(),
            description: "Hello, welcome to 写前端的图图 blog".to_string(),
            base: "/".to_string(),
            dest: "./dist".to_string(),
            head: vec![HeadTag::new(
                "link",
                [("rel", "icon"), ("href", "/image/login.jpg")],
            )],
            theme: ThemeConfig::default(),
        }
    }
}

/// A `<head>` element descriptor: tag name plus attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadTag {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl HeadTag {
    pub fn new<'a>(tag: &str, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Top navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    /// Label shown in the bar.
    pub text: String,
    /// Target path: `/` or a sidebar section path.
    pub link: String,
}

impl NavLink {
    pub fn new(text: &str, link: &str) -> Self {
        Self {
            text: text.to_string(),
            link: link.to_string(),
        }
    }
}

/// Theme settings: navigation bar, sidebar, and the theme-level depth default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub nav: Vec<NavLink>,
    /// Depth default declared next to `nav`/`sidebar`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_depth: Option<u32>,
    pub sidebar: Sidebar,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            nav: vec![
                NavLink::new("主页", "/"),
                NavLink::new("JavaScript", "/javascript/"),
                NavLink::new("ECMAScript6", "/es6/"),
                NavLink::new("数据结构与算法", "/DataStructures-Algorithms/"),
            ],
            sidebar_depth: Some(4),
            sidebar: Sidebar::default(),
        }
    }
}

impl ThemeConfig {
    /// Groups declared for a section path, if any.
    pub fn section(&self, path: &str) -> Option<&[SidebarGroup]> {
        self.sidebar.sections.get(path).map(Vec::as_slice)
    }

    /// Effective outline depth for a group of this theme's sidebar.
    ///
    /// Group value, then the sidebar default, then the theme default, then 0.
    pub fn resolve_sidebar_depth(&self, group: &SidebarGroup) -> u32 {
        resolve_sidebar_depth(group, self.sidebar.depth, self.sidebar_depth)
    }
}

/// Sidebar: section path → ordered groups, plus the sidebar-level depth default.
///
/// Sections keep their declared order: the renderer picks the first section
/// whose path prefixes the page, so a `/` catch-all has to stay last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sidebar {
    /// Depth default declared inside the sidebar itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    pub sections: IndexMap<String, Vec<SidebarGroup>>,
}

impl Default for Sidebar {
    fn default() -> Self {
        let mut sections = IndexMap::new();
        sections.insert(
            "/javascript/".to_string(),
            vec![SidebarGroup::new(
                "JavaScript",
                &[
                    "Chapter3", "Chapter4", "Chapter5", "Chapter6", "Chapter7", "Chapter8",
                    "Chapter10", "Chapter11", "Chapter12", "Chapter13", "Chapter14", "Chapter15",
                    "Chapter16", "Chapter20", "Chapter21", "Chapter22",
                ],
            )],
        );
        sections.insert(
            "/es6/".to_string(),
            vec![SidebarGroup::new(
                "ECMAScript6",
                &[
                    "chapter2", "chapter3", "chapter4", "chapter6", "chapter7", "chapter8",
                    "chapter9", "chapter10", "chapter11", "chapter12", "chapter13", "chapter14",
                    "chapter15", "chapter16", "chapter17", "chapter18", "chapter19", "chapter20",
                ],
            )],
        );
        sections.insert(
            "/DataStructures-Algorithms/".to_string(),
            vec![SidebarGroup::new(
                "数据结构与算法",
                &[
                    "chapter3", "chapter4", "chapter5", "chapter6", "chapter7", "chapter8",
                ],
            )],
        );
        Self {
            depth: Some(3),
            sections,
        }
    }
}

/// A titled, ordered cluster of chapters in one sidebar section.
///
/// `title` and `children` are required even in overlays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroup {
    pub title: String,
    #[serde(default)]
    pub collapsable: bool,
    /// Chapter identifiers, resolved relative to the section path.
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl SidebarGroup {
    /// A non-collapsable group without its own depth.
    pub fn new(title: &str, children: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            collapsable: false,
            children: children.iter().map(|c| c.to_string()).collect(),
            depth: None,
        }
    }
}

/// Resolve a group's outline depth against the enclosing defaults.
///
/// The nearest value wins: the group's own `depth`, then the sidebar-level
/// default, then the theme-level default. Falls back to 0.
pub fn resolve_sidebar_depth(
    group: &SidebarGroup,
    sidebar_default: Option<u32>,
    theme_default: Option<u32>,
) -> u32 {
    group.depth.or(sidebar_default).or(theme_default).unwrap_or(0)
}

impl SiteConfig {
    /// Check required fields and cross-references.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("base", &self.base),
            ("dest", &self.dest),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name.into()));
            }
        }
        if self.theme.nav.is_empty() {
            return Err(ConfigError::MissingField("theme.nav".into()));
        }
        if self.theme.sidebar.sections.is_empty() {
            return Err(ConfigError::MissingField("theme.sidebar.sections".into()));
        }
        if !is_slash_wrapped(&self.base) {
            return Err(ConfigError::Validation(format!(
                "base must start and end with '/': {:?}",
                self.base
            )));
        }
        if let Some(tag) = self.head.iter().find(|t| t.tag.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "head tag name must not be empty (attrs: {:?})",
                tag.attrs
            )));
        }

        let last = self.theme.sidebar.sections.len() - 1;
        for (index, (path, groups)) in self.theme.sidebar.sections.iter().enumerate() {
            if !is_slash_wrapped(path) {
                return Err(ConfigError::Validation(format!(
                    "sidebar section must start and end with '/': {path:?}"
                )));
            }
            if path == "/" && index != last {
                return Err(ConfigError::Validation(
                    "sidebar section \"/\" matches every page and must be declared last".into(),
                ));
            }
            for (i, group) in groups.iter().enumerate() {
                if group.title.trim().is_empty() {
                    return Err(ConfigError::MissingField(format!(
                        "theme.sidebar.sections.{path:?}[{i}].title"
                    )));
                }
                if group.children.is_empty() {
                    return Err(ConfigError::MissingField(format!(
                        "theme.sidebar.sections.{path:?}[{i}].children"
                    )));
                }
                if let Some(child) = group
                    .children
                    .iter()
                    .find(|c| c.split('/').any(|s| s == ".."))
                {
                    return Err(ConfigError::Validation(format!(
                        "chapter {child:?} in {path} leaves the docs directory"
                    )));
                }
                // Spellings of one document ("a" and "a.md") count as duplicates.
                let mut seen = HashSet::new();
                if let Some(dup) = group
                    .children
                    .iter()
                    .find(|c| !seen.insert(chapter_path(path, c)))
                {
                    return Err(ConfigError::Validation(format!(
                        "duplicate chapter {dup:?} in sidebar group {:?} of {path}",
                        group.title
                    )));
                }
            }
        }

        for link in &self.theme.nav {
            if link.link != "/" && !self.theme.sidebar.sections.contains_key(&link.link) {
                return Err(ConfigError::Validation(format!(
                    "nav entry {:?} links to {:?}, which is neither \"/\" nor a sidebar section",
                    link.text, link.link
                )));
            }
        }
        Ok(())
    }

    /// Total number of chapter references across all sidebar groups.
    pub fn chapter_count(&self) -> usize {
        self.theme
            .sidebar
            .sections
            .values()
            .flatten()
            .map(|g| g.children.len())
            .sum()
    }
}

fn is_slash_wrapped(path: &str) -> bool {
    path.starts_with('/') && path.ends_with('/')
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Return the embedded declaration, validated.
///
/// Every call builds a fresh, independent value.
pub fn load() -> Result<SiteConfig, ConfigError> {
    let config = SiteConfig::default();
    config.validate()?;
    Ok(config)
}

/// Returns the embedded declaration as a `toml::Value::Table`.
///
/// This is the base layer overlays are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Layer `overlay` onto `base` in place.
///
/// Tables merge key by key; anything else in the overlay replaces the base
/// value. Keys already in `base` keep their position, new keys are appended.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    let (mut base_table, overlay_table) = match (base, overlay) {
        (toml::Value::Table(b), toml::Value::Table(o)) => (b, o),
        (_, overlay) => return overlay,
    };
    for (key, overlay_val) in overlay_table {
        match base_table.get_mut(&key) {
            Some(slot) => {
                let base_val = std::mem::replace(slot, toml::Value::Boolean(false));
                *slot = merge_toml(base_val, overlay_val);
            }
            None => {
                base_table.insert(key, overlay_val);
            }
        }
    }
    toml::Value::Table(base_table)
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config overlay");
        return Ok(None);
    }
    tracing::debug!(path = %config_path.display(), "reading config overlay");
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    tracing::info!(
        sections = config.theme.sidebar.sections.len(),
        chapters = config.chapter_count(),
        "config resolved"
    );
    Ok(config)
}

/// Load the embedded declaration overlaid with `config.toml` from `root`.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns the embedded declaration as a fully-commented `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Blog site configuration
# =======================
# Every key is optional in an overlay: values below are the embedded
# declaration, and a config.toml only needs the keys it changes.
#
# Tables merge key by key; arrays replace. Overriding [[theme.nav]] replaces
# the whole navigation bar, overriding one sidebar section replaces only that
# section. Unknown keys cause an error.

title = "写前端的图图"
description = "Hello, welcome to 写前端的图图 blog"

# URL path the site is served under. Must start and end with "/".
base = "/"

# Directory the renderer writes the built site to.
dest = "./dist"

# ---------------------------------------------------------------------------
# <head> elements injected into every page
# ---------------------------------------------------------------------------
[[head]]
tag = "link"
attrs = { rel = "icon", href = "/image/login.jpg" }

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# Heading levels shown in the page outline when neither the group nor the
# sidebar sets a depth.
sidebar_depth = 4

# Navigation bar. Each link is "/" or one of the sidebar sections below.
[[theme.nav]]
text = "主页"
link = "/"

[[theme.nav]]
text = "JavaScript"
link = "/javascript/"

[[theme.nav]]
text = "ECMAScript6"
link = "/es6/"

[[theme.nav]]
text = "数据结构与算法"
link = "/DataStructures-Algorithms/"

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
[theme.sidebar]
# Depth default for every group in the sidebar. Wins over theme.sidebar_depth.
depth = 3

# Each section maps a path to its ordered groups. A group may set its own
# `depth`, which wins over both defaults. Sections are matched in the order
# they are declared, so a "/" catch-all section has to come last.
[[theme.sidebar.sections."/javascript/"]]
title = "JavaScript"
collapsable = false
children = [
    "Chapter3", "Chapter4", "Chapter5", "Chapter6", "Chapter7", "Chapter8",
    "Chapter10", "Chapter11", "Chapter12", "Chapter13", "Chapter14", "Chapter15",
    "Chapter16", "Chapter20", "Chapter21", "Chapter22",
]

[[theme.sidebar.sections."/es6/"]]
title = "ECMAScript6"
collapsable = false
children = [
    "chapter2", "chapter3", "chapter4", "chapter6", "chapter7", "chapter8",
    "chapter9", "chapter10", "chapter11", "chapter12", "chapter13", "chapter14",
    "chapter15", "chapter16", "chapter17", "chapter18", "chapter19", "chapter20",
]

[[theme.sidebar.sections."/DataStructures-Algorithms/"]]
title = "数据结构与算法"
collapsable = false
children = ["chapter3", "chapter4", "chapter5", "chapter6", "chapter7", "chapter8"]
"##
}
