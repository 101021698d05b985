use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use shared::routes::COLLECTION_PATH;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;
pub const SETTINGS_FILE: &str = "records.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_url: String,
    pub toast_duration_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

impl ClientSettings {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn collection_url(&self) -> Result<Url, ConfigError> {
        collection_url(&self.api_url)
    }
}

/// `<api_url>/formData`, keeping any base path the api url already has.
pub fn collection_url(api_url: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(api_url.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: api_url.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(api_url.to_string()));
    }
    url.path_segments_mut()
        .map_err(|()| ConfigError::UnsupportedScheme(api_url.to_string()))?
        .pop_if_empty()
        .push(COLLECTION_PATH.trim_start_matches('/'));
    Ok(url)
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the settings file (if readable), then environment overrides.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<ClientSettings>(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed settings file");
                ClientSettings::default()
            }
        },
        Err(_) => ClientSettings::default(),
    };

    if let Some(v) = env("RECORDS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("RECORDS_TOAST_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.toast_duration_ms = parsed,
            Err(_) => tracing::warn!(value = %v, "ignoring non-numeric RECORDS_TOAST_MS"),
        }
    }

    settings
}
