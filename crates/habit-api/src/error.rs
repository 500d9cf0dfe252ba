use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use habit_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_code: &'static str,
    message: String,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => ValidationError::KIND,
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error.message)
    }
}

impl From<habit_core::Error> for AppError {
    fn from(error: habit_core::Error) -> Self {
        match error {
            habit_core::Error::Validation(error) => error.into(),
            habit_core::Error::NotFound(_) => Self::NotFound("Habit not found.".to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!("Request failed: {detail}");
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error_code: self.error_code(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
