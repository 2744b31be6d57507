use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use client_core::{
    DocumentPayloadSource, FilePayloadSource, MissingPayloadSource, PayloadSource, SaveOrdering,
};
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_PATH: &str = "explorer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub bootstrap_path: Option<PathBuf>,
    pub save_ordering: SaveOrdering,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8081".into(),
            bootstrap_path: None,
            save_ordering: SaveOrdering::default(),
        }
    }
}

impl Settings {
    /// Picks how the bootstrap file is read: HTML pages go through the
    /// `<script id="data">` island, anything else is taken as raw JSON.
    pub fn payload_source(&self) -> Box<dyn PayloadSource> {
        let Some(path) = &self.bootstrap_path else {
            return Box::new(MissingPayloadSource);
        };
        if is_html(path) {
            Box::new(DocumentPayloadSource::new(FilePayloadSource::new(path)))
        } else {
            Box::new(FilePayloadSource::new(path))
        }
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Defaults, then the optional config file, then the environment.
pub fn load_settings(config_path: &Path) -> Settings {
    let mut settings = Settings::default();

    match fs::read_to_string(config_path) {
        Ok(raw) => apply_file(&mut settings, &raw),
        Err(_) => debug!(path = %config_path.display(), "no config file, using defaults"),
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!("ignoring unreadable config file: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.get("server_url") {
        settings.server_url = v.clone();
    }
    if let Some(v) = file_cfg.get("bootstrap_path") {
        settings.bootstrap_path = Some(PathBuf::from(v));
    }
    if let Some(v) = file_cfg.get("save_ordering") {
        apply_save_ordering(settings, v);
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("EXPLORER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("EXPLORER_BOOTSTRAP_PATH") {
        settings.bootstrap_path = Some(PathBuf::from(v));
    }
    if let Some(v) = var("APP__BOOTSTRAP_PATH") {
        settings.bootstrap_path = Some(PathBuf::from(v));
    }

    if let Some(v) = var("APP__SAVE_ORDERING") {
        apply_save_ordering(settings, &v);
    }
}

fn apply_save_ordering(settings: &mut Settings, raw: &str) {
    match raw.parse::<SaveOrdering>() {
        Ok(ordering) => settings.save_ordering = ordering,
        Err(err) => warn!("{err}; keeping {}", settings.save_ordering),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
