//! HTTP+JSON gateway client.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{DeleteOutcome, GatewayError, GatewayResult, HabitGateway};
use crate::models::{Habit, ValidDraft};
use crate::util::{is_http_url, normalize_text_option};

/// Default API base, matching the API's default bind address.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/v1";

#[derive(Clone)]
pub struct HttpHabitGateway {
    base_url: String,
    client: Client,
}

impl std::fmt::Debug for HttpHabitGateway {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("HttpHabitGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HttpHabitGateway {
    /// Builds a client for an API base URL such as `http://localhost:3000/api/v1`.
    pub fn new(base_url: impl Into<String>) -> GatewayResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.into())?,
            client: Client::builder().build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> GatewayResult<HealthStatus> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        read_json(response, "check health").await
    }

    fn habits_url(&self) -> String {
        format!("{}/habits", self.base_url)
    }

    fn habit_url(&self, id: &str) -> String {
        format!("{}/habits/{}", self.base_url, urlencoding::encode(id))
    }
}

impl HabitGateway for HttpHabitGateway {
    async fn list(&self) -> GatewayResult<Vec<Habit>> {
        let response = self
            .client
            .get(self.habits_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        read_json(response, "fetch habits").await
    }

    async fn create(&self, draft: &ValidDraft) -> GatewayResult<Habit> {
        let response = self
            .client
            .post(self.habits_url())
            .json(draft)
            .send()
            .await?;
        read_json(response, "create habit").await
    }

    async fn toggle(&self, id: &str) -> GatewayResult<Habit> {
        let response = self
            .client
            .patch(format!("{}/toggle", self.habit_url(id)))
            .send()
            .await?;
        read_json(response, "toggle habit").await
    }

    async fn delete(&self, id: &str) -> GatewayResult<DeleteOutcome> {
        let response = self.client.delete(self.habit_url(id)).send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(DeleteOutcome::NoContent);
        }
        if !status.is_success() {
            return Err(error_from_response(response, "delete habit").await);
        }
        Ok(DeleteOutcome::Acknowledged(status.as_u16()))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> GatewayResult<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response, action).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|error| GatewayError::InvalidPayload(error.to_string()))
}

async fn error_from_response(response: Response, action: &str) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = parse_error_message(&body)
        .unwrap_or_else(|| format!("Failed to {action} (status {}).", status.as_u16()));

    if status == StatusCode::NOT_FOUND {
        GatewayError::NotFound(message)
    } else {
        GatewayError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extract the server-supplied message from an error body, if there is one.
///
/// The message is passed through verbatim; only blank ones are skipped.
fn parse_error_message(body: &str) -> Option<String> {
    let payload = serde_json::from_str::<ErrorBody>(body).ok()?;
    [payload.message, payload.error]
        .into_iter()
        .flatten()
        .find(|message| !message.trim().is_empty())
}

fn normalize_base_url(raw: String) -> GatewayResult<String> {
    let base_url = normalize_text_option(Some(raw)).ok_or_else(|| {
        GatewayError::InvalidConfiguration("API base URL must not be empty".to_string())
    })?;
    if is_http_url(&base_url) {
        Ok(base_url.trim_end_matches('/').to_string())
    } else {
        Err(GatewayError::InvalidConfiguration(
            "API base URL must include http:// or https://".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitId;
    use axum::extract::Path;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, patch};
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api/v1")
    }

    fn stub_router() -> Router {
        Router::new()
            .route(
                "/api/v1/habits",
                get(|| async {
                    Json(json!([{
                        "id": "h9",
                        "name": "Meditate",
                        "category": "Mind",
                        "points": 3,
                        "isDoneToday": false
                    }]))
                })
                .post(|Json(body): Json<Value>| async move {
                    (
                        AxumStatus::CREATED,
                        Json(json!({
                            "id": "srv-1",
                            "name": body["name"],
                            "category": body["category"],
                            "points": body["points"],
                            "isDoneToday": false
                        })),
                    )
                }),
            )
            .route(
                "/api/v1/habits/{id}/toggle",
                patch(|Path(id): Path<String>| async move {
                    if id == "h9" {
                        Ok(Json(json!({
                            "id": "h9",
                            "name": "Meditate",
                            "category": "Mind",
                            "points": 3,
                            "isDoneToday": true
                        })))
                    } else {
                        Err((
                            AxumStatus::NOT_FOUND,
                            Json(json!({ "errorCode": "NOT_FOUND", "message": "Habit not found." })),
                        ))
                    }
                }),
            )
            .route(
                "/api/v1/habits/{id}",
                axum::routing::delete(|Path(id): Path<String>| async move {
                    match id.as_str() {
                        "h9" => AxumStatus::NO_CONTENT,
                        "h8" => AxumStatus::OK,
                        _ => AxumStatus::INTERNAL_SERVER_ERROR,
                    }
                }),
            )
            .route("/api/v1/health", get(|| async { Json(json!({ "status": "ok" })) }))
    }

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url(String::new()).is_err());
        assert!(normalize_base_url("localhost:3000/api/v1".to_string()).is_err());
        assert_eq!(
            normalize_base_url(" http://localhost:3000/api/v1/ ".to_string()).unwrap(),
            "http://localhost:3000/api/v1"
        );
    }

    #[test]
    fn parse_error_message_prefers_message_field() {
        assert_eq!(
            parse_error_message(r#"{"errorCode":"NOT_FOUND","message":"Habit not found."}"#),
            Some("Habit not found.".to_string())
        );
        assert_eq!(
            parse_error_message(r#"{"error":"bad gateway"}"#),
            Some("bad gateway".to_string())
        );
        assert_eq!(parse_error_message(""), None);
        assert_eq!(parse_error_message(r#"{"message":"  "}"#), None);
    }

    #[test]
    fn long_server_messages_are_kept_whole() {
        let message = format!(" {} ", "Points value is out of range. ".repeat(10));
        let body = json!({ "errorCode": "VALIDATION_ERROR", "message": message });

        assert_eq!(parse_error_message(&body.to_string()), Some(message));
    }

    #[tokio::test]
    async fn list_create_toggle_delete_against_server() {
        let gateway = HttpHabitGateway::new(serve(stub_router()).await).unwrap();

        let habits = gateway.list().await.unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].id, HabitId::server("h9"));

        let created = gateway
            .create(&ValidDraft {
                name: "Drink water".to_string(),
                category: "Health".to_string(),
                points: 1.0,
            })
            .await
            .unwrap();
        assert_eq!(created.id, HabitId::server("srv-1"));
        assert_eq!(created.name, "Drink water");

        let toggled = gateway.toggle("h9").await.unwrap();
        assert!(toggled.is_done_today);

        assert_eq!(gateway.delete("h9").await.unwrap(), DeleteOutcome::NoContent);
        assert_eq!(
            gateway.delete("h8").await.unwrap(),
            DeleteOutcome::Acknowledged(200)
        );
        assert_eq!(gateway.health().await.unwrap().status, "ok");
    }

    #[tokio::test]
    async fn non_success_statuses_carry_messages() {
        let gateway = HttpHabitGateway::new(serve(stub_router()).await).unwrap();

        let error = gateway.toggle("missing").await.unwrap_err();
        assert!(matches!(error, GatewayError::NotFound(_)));
        assert_eq!(error.to_string(), "Habit not found.");

        let error = gateway.delete("boom").await.unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert_eq!(error.to_string(), "Failed to delete habit (status 500).");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = HttpHabitGateway::new(format!("http://{addr}/api/v1")).unwrap();
        let error = gateway.list().await.unwrap_err();
        assert!(matches!(error, GatewayError::Http(_)));
        assert_eq!(error.status(), None);
    }
}
