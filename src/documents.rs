//! Chapter documents on disk.
//!
//! Every sidebar child names a markdown document under its section:
//!
//! ```text
//! docs/
//! ├── javascript/
//! │   ├── README.md          # child "" (section landing page)
//! │   ├── Chapter3.md        # child "Chapter3" of "/javascript/"
//! │   └── Chapter99.md       # listed by no group → orphan
//! └── es6/
//!     └── chapter2.md
//! ```
//!
//! The renderer decides how to fail on a dangling reference; this module
//! finds them before it gets the chance. Orphans are reported, not rejected:
//! a draft chapter can live in the tree before it is added to the sidebar.

use crate::config::SiteConfig;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Docs directory not found: {0}")]
    MissingRoot(PathBuf),
}

/// One sidebar child resolved against the docs tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterRef {
    /// Section path, e.g. `/javascript/`.
    pub section: String,
    /// Title of the group that lists the chapter.
    pub group: String,
    /// Identifier as written in the sidebar.
    pub id: String,
    /// Document path relative to the docs root.
    pub path: PathBuf,
    /// Public URL under the site base.
    pub url: String,
    /// First level-one heading, when the document exists and has one.
    pub title: Option<String>,
    pub exists: bool,
}

/// Result of checking a config against a docs tree.
#[derive(Debug, Default)]
pub struct DocumentReport {
    /// Every chapter reference, in sidebar order.
    pub chapters: Vec<ChapterRef>,
    /// Markdown files in section directories no group lists (relative paths).
    pub orphans: Vec<PathBuf>,
}

impl DocumentReport {
    pub fn dangling(&self) -> impl Iterator<Item = &ChapterRef> {
        self.chapters.iter().filter(|c| !c.exists)
    }

    /// True when every reference resolves to a document.
    pub fn is_ok(&self) -> bool {
        self.dangling().next().is_none()
    }
}

/// Directory of a section relative to the docs root (`/javascript/` → `javascript`).
fn section_dir(section: &str) -> PathBuf {
    PathBuf::from(section.trim_matches('/'))
}

/// Document path of a chapter relative to the docs root.
///
/// - `("/javascript/", "Chapter3")` → `javascript/Chapter3.md`
/// - `("/javascript/", "")` → `javascript/README.md`
/// - `("/javascript/", "advanced/")` → `javascript/advanced/README.md`
/// - `("/javascript/", "Chapter3.md")` → `javascript/Chapter3.md`
/// - `("/javascript/", "/es6/chapter2")` → `es6/chapter2.md`
///
/// An identifier starting with `/` is resolved from the docs root, never
/// from the filesystem root.
pub fn chapter_path(section: &str, id: &str) -> PathBuf {
    let (dir, id) = if id.starts_with('/') {
        (PathBuf::new(), id.trim_start_matches('/'))
    } else {
        (section_dir(section), id)
    };
    if id.is_empty() || id.ends_with('/') {
        return dir.join(id.trim_end_matches('/')).join("README.md");
    }
    if id.ends_with(".md") {
        dir.join(id)
    } else {
        dir.join(format!("{id}.md"))
    }
}

/// Public URL of a chapter: base + section + identifier, without `.md`.
///
/// `("/", "/javascript/", "Chapter3")` → `/javascript/Chapter3`
pub fn chapter_url(base: &str, section: &str, id: &str) -> String {
    let base = base.trim_end_matches('/');
    let id = id.trim_end_matches(".md");
    if id.starts_with('/') {
        format!("{base}{id}")
    } else {
        format!("{base}{section}{id}")
    }
}

/// Text of the first level-one heading, ignoring YAML front matter.
pub fn extract_title(markdown: &str) -> Option<String> {
    let mut in_title = false;
    let mut title = String::new();
    for event in Parser::new_ext(markdown, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_title = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let trimmed = title.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_title = false;
            }
            Event::Text(text) | Event::Code(text) if in_title => title.push_str(&text),
            _ => {}
        }
    }
    None
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn is_readme(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.eq_ignore_ascii_case("README.md"))
        .unwrap_or(false)
}

/// Resolve every sidebar child under `docs_root` and collect orphans.
pub fn check_documents(
    docs_root: &Path,
    config: &SiteConfig,
) -> Result<DocumentReport, DocumentError> {
    if !docs_root.is_dir() {
        return Err(DocumentError::MissingRoot(docs_root.to_path_buf()));
    }

    let mut report = DocumentReport::default();
    let mut referenced = HashSet::new();

    for (section, groups) in &config.theme.sidebar.sections {
        for group in groups {
            for id in &group.children {
                let path = chapter_path(section, id);
                let full = docs_root.join(&path);
                let exists = full.is_file();
                let title = if exists {
                    match fs::read_to_string(&full) {
                        Ok(text) => extract_title(&text),
                        Err(err) => {
                            tracing::warn!(path = %full.display(), error = %err, "unreadable chapter document");
                            None
                        }
                    }
                } else {
                    tracing::debug!(path = %full.display(), "chapter document missing");
                    None
                };
                referenced.insert(path.clone());
                report.chapters.push(ChapterRef {
                    section: section.clone(),
                    group: group.title.clone(),
                    id: id.clone(),
                    url: chapter_url(&config.base, section, id),
                    path,
                    title,
                    exists,
                });
            }
        }
    }

    for section in config.theme.sidebar.sections.keys() {
        let dir = docs_root.join(section_dir(section));
        if !dir.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown(path) || is_readme(path) {
                continue;
            }
            let relative = path.strip_prefix(docs_root).unwrap_or(path).to_path_buf();
            if !referenced.contains(&relative) {
                tracing::warn!(path = %relative.display(), "document not listed in the sidebar");
                report.orphans.push(relative);
            }
        }
    }

    Ok(report)
}
