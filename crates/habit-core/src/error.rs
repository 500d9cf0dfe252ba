//! Error types for habit-core

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::models::ValidationError;

/// Result type alias using habit-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in habit-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A create-draft field failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Habit not found
    #[error("Habit not found: {0}")]
    NotFound(String),

    /// Remote gateway error
    #[error(transparent)]
    Transport(#[from] GatewayError),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
