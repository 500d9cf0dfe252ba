use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] habit_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Habit ID cannot be empty")]
    EmptyHabitId,
    #[error("Habit not found for id/prefix: {0}")]
    HabitNotFound(String),
    #[error("{0}")]
    AmbiguousHabitId(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
