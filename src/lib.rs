//! # blogcfg
//!
//! Typed site configuration for the 写前端的图图 blog. The pages themselves are
//! built by an external static-site renderer; this crate owns what that
//! renderer is told: title and description, base path and output directory,
//! head tags, the navigation bar, and the sidebar that orders each section's
//! chapters.
//!
//! # Flow
//!
//! ```text
//! SiteConfig::default()  ──┐
//! config.toml (optional) ──┴─ merge ─→ validate ─→ SiteConfig ─→ renderer JSON
//!                                                      │
//!                                         docs/ ───────┴─→ document report
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | The typed declaration, overlay loading, validation, sidebar depth resolution |
//! | [`export`] | Converts a `SiteConfig` into the object shape the renderer reads |
//! | [`documents`] | Resolves sidebar chapters to markdown files; finds dangling and orphan documents |
//! | [`output`] | CLI output formatting for outlines and document reports |
//!
//! # Design Decisions
//!
//! ## One Declaration, Typed
//!
//! The blog's configuration grew through several near-identical snapshots with
//! longer chapter lists. Only the latest one lives here, as
//! [`config::SiteConfig::default`]. Required fields are struct fields, so a
//! missing title is a compile error rather than a renderer crash; what types
//! cannot express (empty strings, nav links to undeclared sections, repeated
//! chapters) is checked by [`config::SiteConfig::validate`].
//!
//! ## Two Depth Defaults
//!
//! The sidebar depth default has been declared both inside the sidebar and
//! next to it, with different values. Both placements are kept as separate
//! fields, and [`config::resolve_sidebar_depth`] fixes the precedence:
//! group, then sidebar, then theme, then 0.

pub mod config;
pub mod documents;
pub mod export;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
