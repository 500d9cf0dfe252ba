use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use habit_core::services::HabitService;
use habit_core::{Habit, HabitDraft};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;

const BODY_NOT_OBJECT: &str = "Request body must be a JSON object.";

#[derive(Clone)]
pub struct AppState {
    service: HabitService,
}

impl AppState {
    pub const fn new(service: HabitService) -> Self {
        Self { service }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/habits", get(list_habits).post(create_habit))
        .route("/api/v1/habits/{habit_id}/toggle", patch(toggle_habit))
        .route("/api/v1/habits/{habit_id}", delete(delete_habit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Development CORS: any port on localhost or 127.0.0.1.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().is_ok_and(is_local_origin)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

fn is_local_origin(origin: &str) -> bool {
    origin.starts_with("http://localhost:") || origin.starts_with("http://127.0.0.1:")
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn list_habits(State(state): State<AppState>) -> Result<Json<Vec<Habit>>, AppError> {
    let habits = state.service.list_habits().await?;
    Ok(Json(habits))
}

async fn create_habit(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("Rejected create body: {rejection}");
        AppError::validation(BODY_NOT_OBJECT)
    })?;

    let draft = HabitDraft::from_body(&body)?.validate()?;
    let habit = state.service.create_habit(&draft).await?;
    tracing::info!(habit = %habit.id, "Created habit");
    Ok((StatusCode::CREATED, Json(habit)))
}

async fn toggle_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
) -> Result<Json<Habit>, AppError> {
    require_habit_id(&habit_id)?;
    let habit = state.service.toggle_habit(&habit_id).await?;
    Ok(Json(habit))
}

async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
) -> Result<StatusCode, AppError> {
    require_habit_id(&habit_id)?;
    state.service.delete_habit(&habit_id).await?;
    tracing::info!(habit = %habit_id, "Deleted habit");
    Ok(StatusCode::NO_CONTENT)
}

fn require_habit_id(habit_id: &str) -> Result<(), AppError> {
    if habit_id.trim().is_empty() {
        return Err(AppError::validation("Parameter 'habitId' is required."));
    }
    Ok(())
}
