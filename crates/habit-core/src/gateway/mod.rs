//! Remote habit gateway: the four request/response calls against the API.
//!
//! Every call is a single attempt. Retry policy, if any, belongs to the caller.

mod http;

use thiserror::Error;

pub use http::{HealthStatus, HttpHabitGateway, DEFAULT_API_BASE_URL};

use crate::models::{Habit, ValidDraft};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),
}

impl GatewayError {
    /// HTTP status of a non-success response, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::InvalidConfiguration(_) | Self::Http(_) | Self::InvalidPayload(_) => None,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Successful delete result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Explicit 204 No Content
    NoContent,
    /// Any other 2xx status
    Acknowledged(u16),
}

/// Remote habit collection
#[allow(async_fn_in_trait)]
pub trait HabitGateway {
    /// Fetch the full remote collection
    async fn list(&self) -> GatewayResult<Vec<Habit>>;

    /// Create a habit and return the server's record
    async fn create(&self, draft: &ValidDraft) -> GatewayResult<Habit>;

    /// Flip `isDoneToday` for a server id and return the updated record
    async fn toggle(&self, id: &str) -> GatewayResult<Habit>;

    /// Delete a habit by server id
    async fn delete(&self, id: &str) -> GatewayResult<DeleteOutcome>;
}
