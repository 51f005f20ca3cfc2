use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub requests_pathname_prefix: String,
    /// JSON file with the page spec; the built-in demo page is served when
    /// unset.
    pub page_path: Option<String>,
    pub serve_scripts_locally: bool,
    pub serve_css_locally: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8050".into(),
            requests_pathname_prefix: "/".into(),
            page_path: None,
            serve_scripts_locally: false,
            serve_css_locally: false,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("dashboard.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("requests_pathname_prefix") {
                settings.requests_pathname_prefix = v.clone();
            }
            if let Some(v) = file_cfg.get("page_path") {
                settings.page_path = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("serve_scripts_locally") {
                settings.serve_scripts_locally = v == "true";
            }
            if let Some(v) = file_cfg.get("serve_css_locally") {
                settings.serve_css_locally = v == "true";
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__REQUESTS_PATHNAME_PREFIX") {
        settings.requests_pathname_prefix = v;
    }
    if let Ok(v) = std::env::var("APP__PAGE_PATH") {
        settings.page_path = Some(v);
    }
    if let Ok(v) = std::env::var("APP__SERVE_SCRIPTS_LOCALLY") {
        settings.serve_scripts_locally = v == "true";
    }
    if let Ok(v) = std::env::var("APP__SERVE_CSS_LOCALLY") {
        settings.serve_css_locally = v == "true";
    }

    settings
}

/// Prefix handling mirrors the client: always leading-slash, never
/// trailing-slash, empty means root.
pub fn normalize_pathname_prefix(raw: &str) -> String {
    let mut prefix = raw.trim().trim_end_matches('/').to_string();
    if !prefix.is_empty() && !prefix.starts_with('/') {
        prefix.insert(0, '/');
    }
    prefix
}
