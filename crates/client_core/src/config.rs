use std::fs;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const SETTINGS_FILE: &str = "guestbook.toml";

/// Environment variables consulted for the API base URL, later entries win.
const API_BASE_URL_VARS: [&str; 3] = ["NEXT_PUBLIC_API_BASE_URL", "API_BASE_URL", "APP__API_BASE_URL"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

/// Loads settings from `guestbook.toml` in the working directory and the
/// process environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let raw = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match raw.parse::<toml::Table>() {
            Ok(file_cfg) => {
                match file_cfg.get("api_base_url") {
                    Some(toml::Value::String(v)) if !v.trim().is_empty() => {
                        settings.api_base_url = v.trim().to_string();
                    }
                    Some(toml::Value::String(_)) | None => {}
                    Some(other) => warn!(
                        file = SETTINGS_FILE,
                        kind = other.type_str(),
                        "ignoring non-string api_base_url"
                    ),
                }
            }
            Err(err) => warn!(file = SETTINGS_FILE, error = %err, "ignoring unreadable settings file"),
        }
    }

    for key in API_BASE_URL_VARS {
        if let Some(v) = env(key).filter(|v| !v.trim().is_empty()) {
            settings.api_base_url = v.trim().to_string();
        }
    }

    validate_base_url(&settings.api_base_url)?;
    Ok(settings)
}

pub fn validate_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
