//! Handles settings for the admin tool. Configuration is read from an
//! optional `settings.toml` in the working directory, overlaid with
//! `CATEGORIES__*` environment variables (e.g. `CATEGORIES__APP__LEVEL=debug`).
use config::{Config, ConfigError, Environment, File};
use engine::EngineSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Urls {
    pub base_path: String,
    pub display_root_slugs: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Section {
    pub root_slug: String,
    pub extra_slugs: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Backfill {
    pub root_slug: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Admin {
    pub allow_slug_change: bool,
}

impl Default for Urls {
    fn default() -> Self {
        let defaults = EngineSettings::default();
        Self {
            base_path: defaults.base_path,
            display_root_slugs: defaults.display_root_slugs,
        }
    }
}

impl Default for Section {
    fn default() -> Self {
        let defaults = EngineSettings::default();
        Self {
            root_slug: defaults.section_root_slug,
            extra_slugs: defaults.section_extra_slugs,
        }
    }
}

impl Default for Backfill {
    fn default() -> Self {
        Self {
            root_slug: EngineSettings::default().backfill_root_slug,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Option<Database>,
    pub urls: Urls,
    pub section: Section,
    pub backfill: Backfill,
    pub admin: Admin,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("CATEGORIES").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            base_path: self.urls.base_path.clone(),
            display_root_slugs: self.urls.display_root_slugs.clone(),
            section_root_slug: self.section.root_slug.clone(),
            section_extra_slugs: self.section.extra_slugs.clone(),
            backfill_root_slug: self.backfill.root_slug.clone(),
            allow_slug_change: self.admin.allow_slug_change,
        }
    }
}
