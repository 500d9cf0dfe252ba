//! Persistent CLI configuration and settings resolution.
//!
//! Precedence for every setting: command-line flag, then environment, then
//! the config file, then the built-in default.

use std::fmt;
use std::path::{Path, PathBuf};

use habit_core::gateway::DEFAULT_API_BASE_URL;
use habit_core::snapshot::DEFAULT_SNAPSHOT_FILE;
use habit_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "habit-score";
const CONFIG_FILE_NAME: &str = "cli-config.json";

pub const API_URL_ENV: &str = "HABIT_API_URL";
pub const SNAPSHOT_PATH_ENV: &str = "HABIT_SNAPSHOT_PATH";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

/// Where an effective setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    Flag,
    Env,
    File,
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Flag => "flag",
            Self::Env => "env",
            Self::File => "config file",
            Self::Default => "default",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub api_base_url_source: SettingSource,
    pub snapshot_path: PathBuf,
    pub snapshot_path_source: SettingSource,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

pub fn default_snapshot_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DEFAULT_SNAPSHOT_FILE)
}

fn normalize_path_option(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|path| !path.as_os_str().is_empty())
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.take());
        self.snapshot_path = normalize_path_option(self.snapshot_path.take());
    }
}

pub fn resolve_settings(
    flag_api_url: Option<String>,
    flag_snapshot_path: Option<PathBuf>,
    lookup_env: impl Fn(&str) -> Option<String>,
    file: &CliConfig,
) -> Settings {
    let (api_base_url, api_base_url_source) = normalize_text_option(flag_api_url)
        .map(|url| (url, SettingSource::Flag))
        .or_else(|| {
            normalize_text_option(lookup_env(API_URL_ENV)).map(|url| (url, SettingSource::Env))
        })
        .or_else(|| {
            normalize_text_option(file.api_base_url.clone()).map(|url| (url, SettingSource::File))
        })
        .unwrap_or_else(|| (DEFAULT_API_BASE_URL.to_string(), SettingSource::Default));

    let (snapshot_path, snapshot_path_source) = normalize_path_option(flag_snapshot_path)
        .map(|path| (path, SettingSource::Flag))
        .or_else(|| {
            normalize_text_option(lookup_env(SNAPSHOT_PATH_ENV))
                .map(|path| (PathBuf::from(path), SettingSource::Env))
        })
        .or_else(|| {
            normalize_path_option(file.snapshot_path.clone())
                .map(|path| (path, SettingSource::File))
        })
        .unwrap_or_else(|| (default_snapshot_path(), SettingSource::Default));

    Settings {
        api_base_url,
        api_base_url_source,
        snapshot_path,
        snapshot_path_source,
    }
}
