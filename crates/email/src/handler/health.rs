use crate::domain::response::HealthResponse;
use axum::{Json, response::IntoResponse, routing::get};
use chrono::{SecondsFormat, Utc};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Email service is running".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub fn health_routes() -> OpenApiRouter {
    OpenApiRouter::new().route("/api/health", get(health_checker_handler))
}
