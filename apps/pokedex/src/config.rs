use std::{fs, path::Path};

use anyhow::Context;
use catalog_core::DEFAULT_API_BASE_URL;
use serde::Deserialize;
use shared::domain::{DEFAULT_ARTWORK_URL_TEMPLATE, PAGE_LIMIT};

pub const DEFAULT_CONFIG_FILE: &str = "pokedex.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub artwork_url_template: String,
    pub page_limit: u32,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            artwork_url_template: DEFAULT_ARTWORK_URL_TEMPLATE.into(),
            page_limit: PAGE_LIMIT,
            log_filter: "warn".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    artwork_url_template: Option<String>,
    page_limit: Option<u32>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then environment overrides.
///
/// A missing file is not an error; an explicitly named one is.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            apply_file_settings(&mut settings, file_cfg);
        }
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    if let Some(v) = env("POKEDEX_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__ARTWORK_URL_TEMPLATE") {
        settings.artwork_url_template = v;
    }

    if let Some(v) = env("APP__PAGE_LIMIT") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.page_limit = parsed;
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings.page_limit = settings.page_limit.max(1);
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.artwork_url_template {
        settings.artwork_url_template = v;
    }
    if let Some(v) = file_cfg.page_limit {
        settings.page_limit = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
