//! Application route configuration.

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, course_routes, enrollment_routes, health_routes, student_routes,
};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::MSG_ROUTE_NOT_FOUND;
use crate::errors::AppError;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/students", student_routes())
        .nest("/courses", course_routes())
        .nest("/enrollments", enrollment_routes());

    Router::new()
        .merge(health_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .fallback(route_not_found)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::not_found(MSG_ROUTE_NOT_FOUND)
}
