//! End-to-end checks through the public library API: declaration → overlay
//! → validation → renderer JSON → document report.

use blogcfg::config::{self, ConfigError, SiteConfig};
use blogcfg::{documents, export, output};
use std::fs;
use tempfile::TempDir;

const TWO_CHAPTERS: &str = r#"
[[theme.nav]]
text = "主页"
link = "/"

[[theme.nav]]
text = "JavaScript"
link = "/javascript/"

[theme.sidebar]
sections = { "/javascript/" = [{ title = "JavaScript", collapsable = false, children = ["Chapter3", "Chapter4"] }] }
"#;

#[test]
fn declared_sidebar_comes_back_in_order() {
    let overlay: toml::Value = toml::from_str(TWO_CHAPTERS).unwrap();
    let base = toml::Value::Table(Default::default());
    let site = config::resolve_config(base, Some(overlay)).unwrap();

    assert_eq!(site.theme.sidebar.sections.len(), 1);
    let groups = site.theme.section("/javascript/").unwrap();
    assert_eq!(groups[0].children.len(), 2);
    assert_eq!(groups[0].children, vec!["Chapter3", "Chapter4"]);
    assert_eq!(site.theme.nav.len(), 2);
}

#[test]
fn overlay_file_replaces_one_section() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), TWO_CHAPTERS).unwrap();

    let site = config::load_config(tmp.path()).unwrap();
    let js = &site.theme.section("/javascript/").unwrap()[0];
    assert_eq!(js.children, vec!["Chapter3", "Chapter4"]);
    // Sections the overlay does not mention are kept
    assert!(site.theme.section("/es6/").is_some());
}

#[test]
fn load_twice_is_structurally_equal() {
    let a = config::load().unwrap();
    let b = config::load().unwrap();
    assert_eq!(a, b);
}

#[test]
fn gen_config_output_loads_as_overlay() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), config::stock_config_toml()).unwrap();
    assert_eq!(config::load_config(tmp.path()).unwrap(), SiteConfig::default());
}

#[test]
fn overlay_with_dangling_nav_fails_to_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        r#"
[[theme.nav]]
text = "CSS"
link = "/css/"
"#,
    )
    .unwrap();
    let err = config::load_config(tmp.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn overlay_with_blank_title_fails_to_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "title = \"\"\n").unwrap();
    let err = config::load_config(tmp.path()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField(_)));
}

#[test]
fn renderer_json_matches_declaration() {
    let site = config::load().unwrap();
    let value = export::to_renderer_json(&site).unwrap();
    let nav = value["themeConfig"]["nav"].as_array().unwrap();
    assert_eq!(nav.len(), site.theme.nav.len());
    for (link, exported) in site.theme.nav.iter().zip(nav) {
        assert_eq!(exported["text"], link.text.as_str());
        assert_eq!(exported["link"], link.link.as_str());
    }
    let sidebar = value["themeConfig"]["sidebar"].as_object().unwrap();
    for path in site.theme.sidebar.sections.keys() {
        assert!(sidebar.contains_key(path), "{path} missing from export");
    }
}

#[test]
fn documents_check_against_real_tree() {
    let site = config::load().unwrap();
    let docs = TempDir::new().unwrap();
    let dir = docs.path().join("javascript");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Chapter3.md"), "# 第3章 语言基础\n").unwrap();

    let report = documents::check_documents(docs.path(), &site).unwrap();
    assert!(!report.is_ok());
    let found: Vec<_> = report.chapters.iter().filter(|c| c.exists).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title.as_deref(), Some("第3章 语言基础"));
    assert_eq!(report.dangling().count(), site.chapter_count() - 1);

    let lines = output::format_document_report(&report);
    assert!(lines.last().unwrap().starts_with("Checked 40 chapters: 39 missing"));
}
