//! Configuration file and well-known locations.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable overriding the configured backend URL.
pub const BASE_URL_ENV: &str = "COMMITDIFF_BASE_URL";

/// Cached config directory path.
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the commitdiff config directory (cached).
pub fn config_dir() -> &'static Path {
    CONFIG_DIR.get_or_init(|| {
        directories::ProjectDirs::from("", "", "commitdiff")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(dirs_fallback)
    })
}

/// Directory for runtime output such as the log file.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "commitdiff")
        .map(|d| d.data_local_dir().to_path_buf())
        .unwrap_or_else(|| config_dir().to_path_buf())
}

/// Fallback config directory if `directories` fails.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(|h| Path::new(&h).join(".config").join("commitdiff"))
        .unwrap_or_else(|_| PathBuf::from(".commitdiff"))
}

/// Contents of `config.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL (scheme, host, optional path prefix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Theme name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Workspace to prefill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    /// Repository slug to prefill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_slug: Option<String>,
}

impl Config {
    /// Load `config.json` from the config directory.
    pub fn load() -> Self {
        Self::load_from(&config_dir().join("config.json"))
    }

    /// Load from an explicit path. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Resolve the backend URL: explicit override, then environment, then file, then default.
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        let env_value = std::env::var(BASE_URL_ENV).ok();
        pick_base_url(cli_override, env_value.as_deref(), self.base_url.as_deref())
    }
}

fn pick_base_url(cli: Option<&str>, env: Option<&str>, file: Option<&str>) -> String {
    [cli, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}
