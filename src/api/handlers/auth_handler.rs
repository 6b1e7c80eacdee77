//! Authentication handlers.

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::required;
use super::student_handler::CreateStudentRequest;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentStudent};
use crate::api::AppState;
use crate::config::{MSG_LOGGED_IN, MSG_REGISTERED};
use crate::domain::StudentResponse;
use crate::errors::AppResult;
use crate::services::AuthSession;
use crate::types::{ApiResponse, Created};

/// Student login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "ada@uni.edu")]
    pub email: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Token plus the authenticated student
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 604800)]
    pub expires_in: i64,
    pub student: StudentResponse,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.token.access_token,
            token_type: session.token.token_type,
            expires_in: session.token.expires_in,
            student: StudentResponse::from(session.student),
        }
    }
}

/// Create authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

/// Register a new student
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student registered", body = AuthResponse),
        (status = 400, description = "Missing field, or email / roll number taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStudentRequest>,
) -> AppResult<Created<AuthResponse>> {
    let session = state
        .auth_service
        .register(payload.into_new_student()?)
        .await?;

    Ok(Created(ApiResponse::with_message(
        AuthResponse::from(session),
        MSG_REGISTERED,
    )))
}

/// Login and get a JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let session = state
        .auth_service
        .login(required(payload.email)?, required(payload.password)?)
        .await?;

    Ok(ApiResponse::with_message(
        AuthResponse::from(session),
        MSG_LOGGED_IN,
    ))
}

/// Current student profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated student", body = StudentResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Student no longer exists")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentStudent>,
) -> AppResult<ApiResponse<StudentResponse>> {
    let student = state.student_service.get_student(current.id).await?;
    Ok(ApiResponse::success(StudentResponse::from(student)))
}
