//! Health check handler.

use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::config::MSG_SERVER_RUNNING;
use crate::types::ApiResponse;

/// Liveness status plus record counts
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Server running", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let stats = state.database.stats().await;

    ApiResponse::with_message(
        HealthResponse {
            status: "healthy".to_string(),
            students: stats.students,
            courses: stats.courses,
            enrollments: stats.enrollments,
        },
        MSG_SERVER_RUNNING,
    )
}
