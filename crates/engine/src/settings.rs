//! Knobs of the engine that depend on the site the categories serve.

use serde::Deserialize;

/// Site dependent settings of [`Engine`](crate::Engine).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineSettings {
    /// Prefix of every URL built from the hierarchy.
    pub base_path: String,
    /// Root slugs that stay visible in breadcrumb display names.
    pub display_root_slugs: Vec<String>,
    /// Slug of the root whose subtree forms the default section.
    pub section_root_slug: String,
    /// Slugs added to the default section even outside its subtree.
    pub section_extra_slugs: Vec<String>,
    /// Slug of the root whose descendants the alternate URL backfill covers.
    pub backfill_root_slug: String,
    /// Let editors submit their own slug instead of deriving it from the name.
    pub allow_slug_change: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_path: "/categories/".to_string(),
            display_root_slugs: vec!["magazine".to_string(), "nextgov-categories".to_string()],
            section_root_slug: "categories".to_string(),
            section_extra_slugs: vec!["govexec-sponsored".to_string()],
            backfill_root_slug: "categories".to_string(),
            allow_slug_change: false,
        }
    }
}
