use std::path::{Path, PathBuf};

use habit_core::util::{is_http_url, normalize_text_option};

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, resolve_settings, CliConfig, Settings};
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    api_url: Option<String>,
    snapshot_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let path = default_config_path();
    match command {
        ConfigCommands::Init => {
            let config = run_config_init(&path, api_url, snapshot_path)?;
            println!("Saved config to {}", path.display());
            if let Some(url) = config.api_base_url.as_deref() {
                println!("API URL:  {url}");
            }
            if let Some(snapshot) = config.snapshot_path.as_deref() {
                println!("Snapshot: {}", snapshot.display());
            }
            Ok(())
        }
        ConfigCommands::Show => {
            let file = CliConfig::load_from_path(&path).map_err(CliError::Config)?;
            let settings =
                resolve_settings(api_url, snapshot_path, |name| std::env::var(name).ok(), &file);
            for line in format_settings_lines(&path, &settings) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Merge explicit values into the config file at `path` and save it.
pub fn run_config_init(
    path: &Path,
    api_url: Option<String>,
    snapshot_path: Option<PathBuf>,
) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::load_from_path(path).map_err(CliError::Config)?;

    if let Some(url) = normalize_text_option(api_url) {
        if !is_http_url(&url) {
            return Err(CliError::Config(
                "API URL must start with http:// or https://".to_string(),
            ));
        }
        config.api_base_url = Some(url);
    }
    if let Some(snapshot_path) = snapshot_path {
        config.snapshot_path = Some(snapshot_path);
    }

    config.save_to_path(path).map_err(CliError::Config)?;
    CliConfig::load_from_path(path).map_err(CliError::Config)
}

pub fn format_settings_lines(config_path: &Path, settings: &Settings) -> Vec<String> {
    let file_state = if config_path.exists() { "" } else { " (missing)" };
    vec![
        format!("Config file: {}{file_state}", config_path.display()),
        format!(
            "API URL:     {} ({})",
            settings.api_base_url, settings.api_base_url_source
        ),
        format!(
            "Snapshot:    {} ({})",
            settings.snapshot_path.display(),
            settings.snapshot_path_source
        ),
    ]
}
