use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use thiserror::Error;

const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// `None` keeps the collection in memory for the lifetime of the process.
    pub db_path: Option<PathBuf>,
    pub seed_defaults: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "HABIT_API_BIND_ADDR", "127.0.0.1:3000");

        let db_path = value_or_default(&lookup, "HABIT_API_DB_PATH", IN_MEMORY_DB);
        let db_path = (db_path != IN_MEMORY_DB).then(|| PathBuf::from(db_path));

        let seed_defaults = parse_bool(&value_or_default(
            &lookup,
            "HABIT_API_SEED_DEFAULTS",
            "true",
        ))
        .ok_or_else(|| {
            ConfigError::Invalid("HABIT_API_SEED_DEFAULTS must be true or false".to_string())
        })?;

        Ok(Self {
            bind_addr,
            db_path,
            seed_defaults,
        })
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
