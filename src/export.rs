//! Renderer export.
//!
//! The external renderer reads its configuration as a plain object:
//!
//! ```json
//! {
//!   "title": "...", "description": "...", "base": "/", "dest": "./dist",
//!   "head": [["link", { "href": "/image/login.jpg", "rel": "icon" }]],
//!   "themeConfig": {
//!     "nav": [{ "text": "主页", "link": "/" }],
//!     "sidebarDepth": 4,
//!     "sidebar": {
//!       "/javascript/": [{ "title": "JavaScript", "collapsable": false, "children": ["Chapter3"] }],
//!       "sidebarDepth": 3
//!     }
//!   }
//! }
//! ```
//!
//! Both depth defaults are emitted where they were declared, and only when
//! set. Resolving them is the renderer's business; [`crate::config`] offers
//! the same precedence for our own tooling.

use crate::config::{NavLink, SidebarGroup, SiteConfig};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct RendererConfig<'a> {
    title: &'a str,
    description: &'a str,
    base: &'a str,
    dest: &'a str,
    head: Vec<(&'a str, &'a BTreeMap<String, String>)>,
    #[serde(rename = "themeConfig")]
    theme_config: RendererTheme<'a>,
}

#[derive(Serialize)]
struct RendererTheme<'a> {
    nav: &'a [NavLink],
    #[serde(rename = "sidebarDepth", skip_serializing_if = "Option::is_none")]
    sidebar_depth: Option<u32>,
    sidebar: RendererSidebar<'a>,
}

#[derive(Serialize)]
struct RendererSidebar<'a> {
    #[serde(flatten)]
    sections: IndexMap<&'a str, Vec<RendererGroup<'a>>>,
    #[serde(rename = "sidebarDepth", skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
}

#[derive(Serialize)]
struct RendererGroup<'a> {
    title: &'a str,
    collapsable: bool,
    children: &'a [String],
    #[serde(rename = "sidebarDepth", skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
}

impl<'a> From<&'a SidebarGroup> for RendererGroup<'a> {
    fn from(group: &'a SidebarGroup) -> Self {
        Self {
            title: &group.title,
            collapsable: group.collapsable,
            children: &group.children,
            depth: group.depth,
        }
    }
}

impl<'a> From<&'a SiteConfig> for RendererConfig<'a> {
    fn from(config: &'a SiteConfig) -> Self {
        let theme = &config.theme;
        Self {
            title: &config.title,
            description: &config.description,
            base: &config.base,
            dest: &config.dest,
            head: config
                .head
                .iter()
                .map(|h| (h.tag.as_str(), &h.attrs))
                .collect(),
            theme_config: RendererTheme {
                nav: &theme.nav,
                sidebar_depth: theme.sidebar_depth,
                sidebar: RendererSidebar {
                    sections: theme
                        .sidebar
                        .sections
                        .iter()
                        .map(|(path, groups)| {
                            let groups = groups.iter().map(RendererGroup::from).collect::<Vec<_>>();
                            (path.as_str(), groups)
                        })
                        .collect(),
                    depth: theme.sidebar.depth,
                },
            },
        }
    }
}

/// Convert a config into the object the renderer consumes.
pub fn to_renderer_json(config: &SiteConfig) -> Result<serde_json::Value, ExportError> {
    Ok(serde_json::to_value(RendererConfig::from(config))?)
}

/// Pretty-printed renderer JSON, as printed by `blogcfg show`.
pub fn render_json(config: &SiteConfig) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&RendererConfig::from(config))?)
}
